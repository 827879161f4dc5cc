use std::collections::HashSet;
use std::sync::Arc;

use board_core::entities::InsightRecord;
use parking_lot::RwLock;
use serde::Serialize;

use crate::error::MemoryError;

#[derive(Debug, Default)]
struct State {
    records: Vec<InsightRecord>,
    pinned: Option<i64>,
}

impl State {
    fn contains(&self, id: i64) -> bool {
        self.records.iter().any(|record| record.id == id)
    }

    fn find(&self, id: i64) -> Option<&InsightRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Pinned record if the pin resolves, else the last appended record.
    fn executive_summary(&self) -> Option<&InsightRecord> {
        self.pinned
            .and_then(|id| self.find(id))
            .or_else(|| self.records.last())
    }

    /// Everything but the executive summary, newest first, first occurrence
    /// of each id only.
    fn timeline(&self) -> Vec<InsightRecord> {
        let summary_id = self.executive_summary().map(|record| record.id);
        let mut seen = HashSet::new();
        self.records
            .iter()
            .rev()
            .filter(|record| Some(record.id) != summary_id)
            .filter(|record| seen.insert(record.id))
            .cloned()
            .collect()
    }
}

/// Shared, ordered collection of insight records with a single pin.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
}

/// Point-in-time view of the derived store state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub executive_summary: Option<InsightRecord>,
    pub timeline: Vec<InsightRecord>,
    pub pinned_id: Option<i64>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record at the end. The caller supplies the id.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::DuplicateId`] if a record with the same id is
    /// already stored; the store is left unchanged.
    pub fn append(&self, record: InsightRecord) -> Result<(), MemoryError> {
        let mut state = self.state.write();
        if state.contains(record.id) {
            return Err(MemoryError::DuplicateId { id: record.id });
        }
        tracing::debug!(id = record.id, kind = %record.kind, title = %record.title, "append record");
        state.records.push(record);
        Ok(())
    }

    /// Append a record under the first free id at or after `preferred`.
    ///
    /// Picking the id and appending happen under one lock, so concurrent
    /// callers passing the same `preferred` id still get distinct ids.
    /// Returns the id used.
    pub fn append_fresh<F>(&self, preferred: i64, build: F) -> i64
    where
        F: FnOnce(i64) -> InsightRecord,
    {
        let mut state = self.state.write();
        let mut id = preferred;
        while state.contains(id) {
            id += 1;
        }
        let mut record = build(id);
        record.id = id;
        tracing::debug!(id, kind = %record.kind, title = %record.title, "append record");
        state.records.push(record);
        id
    }

    /// Apply `patch` to the record with `id`.
    ///
    /// Returns `false`, without calling `patch`, when no record matches. The
    /// record's `id` and `kind` are restored if the patch changed them.
    pub fn update_by_id<F>(&self, id: i64, patch: F) -> bool
    where
        F: FnOnce(&mut InsightRecord),
    {
        let mut state = self.state.write();
        let Some(record) = state.records.iter_mut().find(|record| record.id == id) else {
            tracing::debug!(id, "update skipped: no such record");
            return false;
        };
        let kind = record.kind;
        patch(record);
        if record.id != id || record.kind != kind {
            tracing::warn!(id, "patch tried to change record identity; restored");
            record.id = id;
            record.kind = kind;
        }
        tracing::debug!(id, title = %record.title, "update record");
        true
    }

    /// Pin `id`, whether or not a record with that id exists.
    pub fn pin(&self, id: i64) {
        let mut state = self.state.write();
        if !state.contains(id) {
            tracing::debug!(id, "pinning id with no record");
        }
        tracing::debug!(id, previous = ?state.pinned, "pin");
        state.pinned = Some(id);
    }

    pub fn unpin(&self) {
        let mut state = self.state.write();
        tracing::debug!(previous = ?state.pinned, "unpin");
        state.pinned = None;
    }

    /// All records in insertion order.
    #[must_use]
    pub fn all(&self) -> Vec<InsightRecord> {
        self.state.read().records.clone()
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<InsightRecord> {
        self.state.read().find(id).cloned()
    }

    #[must_use]
    pub fn pinned_id(&self) -> Option<i64> {
        self.state.read().pinned
    }

    /// The pinned record if the pin resolves, otherwise the most recently
    /// appended record, otherwise `None`.
    #[must_use]
    pub fn executive_summary(&self) -> Option<InsightRecord> {
        self.state.read().executive_summary().cloned()
    }

    /// All records except the executive summary, most recent first, with
    /// duplicate ids collapsed to their first occurrence.
    #[must_use]
    pub fn timeline(&self) -> Vec<InsightRecord> {
        self.state.read().timeline()
    }

    /// Executive summary, timeline and pin, taken under one read lock.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read();
        StoreSnapshot {
            executive_summary: state.executive_summary().cloned(),
            timeline: state.timeline(),
            pinned_id: state.pinned,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use board_core::enums::InsightKind;
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(id: i64) -> InsightRecord {
        InsightRecord::loading(id, &format!("Record {id}"), InsightKind::Brief)
    }

    fn ids(records: &[InsightRecord]) -> Vec<i64> {
        records.iter().map(|record| record.id).collect()
    }

    #[test]
    fn empty_store_has_no_summary() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.executive_summary(), None);
        assert!(store.timeline().is_empty());
    }

    #[test]
    fn all_keeps_insertion_order() {
        let store = MemoryStore::new();
        for id in [3, 1, 2] {
            store.append(record(id)).unwrap();
        }
        assert_eq!(ids(&store.all()), vec![3, 1, 2]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn duplicate_append_is_rejected() {
        let store = MemoryStore::new();
        store.append(record(1)).unwrap();
        assert_eq!(
            store.append(record(1)),
            Err(MemoryError::DuplicateId { id: 1 })
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn append_fresh_skips_taken_ids() {
        let store = MemoryStore::new();
        store.append(record(100)).unwrap();
        store.append(record(101)).unwrap();
        let id = store.append_fresh(100, record);
        assert_eq!(id, 102);
        assert_eq!(ids(&store.all()), vec![100, 101, 102]);
    }

    #[test]
    fn unresolvable_pin_falls_back_to_last() {
        let store = MemoryStore::new();
        store.append(record(1)).unwrap();
        store.append(record(2)).unwrap();
        store.pin(99);
        assert_eq!(store.pinned_id(), Some(99));
        assert_eq!(store.executive_summary().map(|r| r.id), Some(2));
        assert_eq!(ids(&store.timeline()), vec![1]);
    }

    #[test]
    fn pinned_record_is_summary() {
        let store = MemoryStore::new();
        for id in 1..=3 {
            store.append(record(id)).unwrap();
        }
        store.pin(1);
        assert_eq!(store.executive_summary().map(|r| r.id), Some(1));
        assert_eq!(ids(&store.timeline()), vec![3, 2]);

        store.unpin();
        assert_eq!(store.pinned_id(), None);
        assert_eq!(store.executive_summary().map(|r| r.id), Some(3));
        assert_eq!(ids(&store.timeline()), vec![2, 1]);
    }

    #[test]
    fn pinning_a_middle_record_keeps_the_rest_newest_first() {
        let store = MemoryStore::new();
        for id in [1, 2, 3] {
            store.append(record(id)).unwrap();
        }
        store.pin(2);
        assert_eq!(store.executive_summary().map(|r| r.id), Some(2));
        assert_eq!(ids(&store.timeline()), vec![3, 1]);
    }

    #[test]
    fn panicking_patch_leaves_store_usable() {
        let store = MemoryStore::new();
        store.append(record(1)).unwrap();
        let handle = store.clone();
        let outcome = std::thread::spawn(move || {
            handle.update_by_id(1, |_| panic!("patch failed"));
        })
        .join();
        assert!(outcome.is_err());

        assert!(store.update_by_id(1, |r| r.fail("Record 1")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_missing_id_is_noop() {
        let store = MemoryStore::new();
        store.append(record(1)).unwrap();
        let before = store.all();
        let mut called = false;
        assert!(!store.update_by_id(2, |_| called = true));
        assert!(!called);
        assert_eq!(store.all(), before);
    }

    #[test]
    fn update_applies_patch_in_place() {
        let store = MemoryStore::new();
        store.append(record(1)).unwrap();
        store.append(record(2)).unwrap();
        assert!(store.update_by_id(1, |r| r.fail("Record 1")));
        assert_eq!(store.get(1).map(|r| r.title), Some("Record 1 (Error)".to_string()));
        assert_eq!(ids(&store.all()), vec![1, 2]);
    }

    #[test]
    fn update_cannot_change_identity() {
        let store = MemoryStore::new();
        store.append(record(1)).unwrap();
        assert!(store.update_by_id(1, |r| {
            r.id = 50;
            r.kind = InsightKind::Alert;
            r.description = "changed".to_string();
        }));
        let stored = store.get(1).unwrap();
        assert_eq!(stored.kind, InsightKind::Brief);
        assert_eq!(stored.description, "changed");
        assert_eq!(store.get(50), None);
    }

    #[test]
    fn snapshot_matches_views() {
        let store = MemoryStore::new();
        store.append(record(1)).unwrap();
        store.append(record(2)).unwrap();
        store.pin(1);
        let snapshot = store.snapshot();
        assert_eq!(snapshot.executive_summary, store.executive_summary());
        assert_eq!(snapshot.timeline, store.timeline());
        assert_eq!(snapshot.pinned_id, Some(1));

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["pinnedId"], 1);
        assert_eq!(json["executiveSummary"]["id"], 1);
        assert_eq!(json["timeline"][0]["id"], 2);
    }

    #[test]
    fn timeline_collapses_duplicate_ids() {
        let state = State {
            records: vec![record(1), record(2), record(1), record(3)],
            pinned: None,
        };
        assert_eq!(state.executive_summary().map(|r| r.id), Some(3));
        assert_eq!(ids(&state.timeline()), vec![1, 2]);
    }

    #[test]
    fn clones_share_state() {
        let store = MemoryStore::new();
        let handle = store.clone();
        handle.append(record(1)).unwrap();
        assert_eq!(store.len(), 1);
    }
}
