//! Projection of ledger state onto the in-memory story list.

use std::collections::{HashMap, HashSet};

use crate::domain::{LedgerRecord, Story};

/// Merge ledger flags into `stories`.
///
/// Every story with a matching record becomes viewed and takes the
/// record's liked flag. Everything else passes through untouched, and the
/// order of `stories` is preserved. When several records share an id the
/// first one wins, matching the ledger's own lookups.
pub fn reconcile(stories: &[Story], records: &[LedgerRecord]) -> Vec<Story> {
    let mut by_id: HashMap<&str, &LedgerRecord> = HashMap::with_capacity(records.len());
    for record in records {
        by_id.entry(record.id.as_str()).or_insert(record);
    }

    stories
        .iter()
        .map(|story| match by_id.get(story.id.as_str()) {
            Some(record) => story.with_state(true, record.is_liked),
            None => story.clone(),
        })
        .collect()
}

/// Like [`reconcile`], but only records whose id is in `ids` are applied.
pub fn reconcile_scoped<S: AsRef<str>>(
    stories: &[Story],
    records: &[LedgerRecord],
    ids: &[S],
) -> Vec<Story> {
    let wanted: HashSet<&str> = ids.iter().map(|id| id.as_ref()).collect();
    let relevant: Vec<LedgerRecord> = records
        .iter()
        .filter(|r| wanted.contains(r.id.as_str()))
        .cloned()
        .collect();
    reconcile(stories, &relevant)
}
