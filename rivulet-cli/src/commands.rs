//! CLI command implementations

use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Subcommand;
use rivulet_core::config::RivuletConfig;
use rivulet_core::providers::{DemoProvider, EmbedApiProvider, StreamProvider};
use rivulet_core::resolver::StreamResolver;
use rivulet_core::types::MediaKind;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the addon HTTP server
    Server {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to bind to
        #[arg(short, long, default_value = "7000")]
        port: u16,
        /// Embed API endpoint to query, repeatable (default: RIVULET_PROVIDER_URL)
        #[arg(long = "provider", value_name = "NAME=URL")]
        providers: Vec<String>,
        /// Use canned demo streams instead of real providers
        #[arg(long)]
        demo: bool,
    },
    /// Resolve a media reference and print its streams
    Resolve {
        /// Media kind: movie or series
        kind: MediaKind,
        /// Composite id: <externalId> or <externalId>:<season>:<episode>
        composite_id: String,
        /// Embed API endpoint to query, repeatable (default: RIVULET_PROVIDER_URL)
        #[arg(long = "provider", value_name = "NAME=URL")]
        providers: Vec<String>,
        /// Use canned demo streams instead of real providers
        #[arg(long)]
        demo: bool,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Server {
            host,
            port,
            providers,
            demo,
        } => start_server(host, port, providers, demo).await,
        Commands::Resolve {
            kind,
            composite_id,
            providers,
            demo,
        } => resolve_once(kind, composite_id, providers, demo).await,
    }
}

/// Start the addon HTTP server
async fn start_server(
    host: String,
    port: u16,
    provider_specs: Vec<String>,
    demo: bool,
) -> anyhow::Result<()> {
    let resolver = build_resolver(provider_specs, demo)?;

    println!("Starting Rivulet addon server...");
    println!("URL: http://{host}:{port}");
    if demo {
        println!("Mode: Demo (using canned stream data)");
    }
    println!();
    println!("Press Ctrl+C to stop the server");

    rivulet_web::run_server(resolver, &host, port)
        .await
        .map_err(|e| anyhow::anyhow!("server failed: {e}"))
}

/// Resolve one media reference and print the resulting streams
async fn resolve_once(
    kind: MediaKind,
    composite_id: String,
    provider_specs: Vec<String>,
    demo: bool,
) -> anyhow::Result<()> {
    let resolver = build_resolver(provider_specs, demo)?;
    let response = resolver.resolve(kind, &composite_id).await;

    if response.streams.is_empty() {
        println!("No streams found for {kind} '{composite_id}'.");
        return Ok(());
    }

    println!("Streams for {kind} '{composite_id}':");
    for stream in &response.streams {
        println!("  {}", stream.title);
        println!("    {}", stream.url);
    }

    Ok(())
}

/// Build the resolution pipeline from CLI provider specs
fn build_resolver(provider_specs: Vec<String>, demo: bool) -> anyhow::Result<Arc<StreamResolver>> {
    let config = RivuletConfig::from_env();
    let providers = build_providers(&provider_specs, demo)?;
    let resolver =
        StreamResolver::new(config, providers).context("building resolution pipeline")?;
    Ok(Arc::new(resolver))
}

fn build_providers(
    specs: &[String],
    demo: bool,
) -> anyhow::Result<Vec<Arc<dyn StreamProvider>>> {
    let fallback = std::env::var("RIVULET_PROVIDER_URL").ok();
    assemble_providers(specs, demo, fallback.as_deref())
}

/// Assemble the provider set from CLI specs, the environment fallback
/// endpoint, or the demo flag
fn assemble_providers(
    specs: &[String],
    demo: bool,
    fallback_url: Option<&str>,
) -> anyhow::Result<Vec<Arc<dyn StreamProvider>>> {
    if demo {
        return Ok(vec![Arc::new(DemoProvider::new())]);
    }

    if specs.is_empty() {
        return match fallback_url.filter(|url| !url.is_empty()) {
            Some(url) => Ok(vec![
                Arc::new(EmbedApiProvider::new("Embed", url)?) as Arc<dyn StreamProvider>
            ]),
            None => bail!(
                "no providers configured; pass --provider NAME=URL, \
                 set RIVULET_PROVIDER_URL, or use --demo"
            ),
        };
    }

    specs
        .iter()
        .map(|spec| {
            let (name, url) = spec
                .split_once('=')
                .with_context(|| format!("invalid provider spec '{spec}', expected NAME=URL"))?;
            if name.is_empty() || url.is_empty() {
                bail!("invalid provider spec '{spec}', expected NAME=URL");
            }
            Ok(Arc::new(EmbedApiProvider::new(name, url)?) as Arc<dyn StreamProvider>)
        })
        .collect()
}
