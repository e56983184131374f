//! Assembly of normalized records into the final, deterministic result.

use std::collections::HashSet;

use tracing::debug;

use crate::types::StreamRecord;

/// Merges per-provider record lists into one ordered, de-duplicated result.
///
/// Ordering is purely input order: dispatch order, then source order, then
/// file order; no scoring. Records sharing a URL collapse to the first
/// occurrence because providers sometimes mirror identical files under
/// multiple source entries. An empty result is a valid outcome.
pub fn assemble(
    normalized: impl IntoIterator<Item = (String, Vec<StreamRecord>)>,
) -> Vec<StreamRecord> {
    let mut seen_urls = HashSet::new();
    let mut streams = Vec::new();

    for (provider, records) in normalized {
        let before = streams.len();
        for record in records {
            if seen_urls.insert(record.url.clone()) {
                streams.push(record);
            }
        }
        debug!(
            provider = %provider,
            kept = streams.len() - before,
            "assembled provider records"
        );
    }

    streams
}
