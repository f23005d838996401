//! Record id generation.

use crate::errors::{AppError, AppResult};
use crate::models::record::RecordId;
use std::collections::BTreeSet;

/// Monotonic id source. Never hands out the same id twice, even after the
/// record holding the highest id is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    /// `None` once the id space is used up.
    next: Option<RecordId>,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self { next: Some(1) }
    }
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence continuing after the largest of `ids` (1 when empty).
    ///
    /// `kind` names the records in errors. Duplicate ids and a largest id
    /// with no successor are rejected.
    pub fn after<I: IntoIterator<Item = RecordId>>(kind: &str, ids: I) -> AppResult<Self> {
        let mut seen = BTreeSet::new();
        for id in ids {
            if !seen.insert(id) {
                return Err(AppError::Seed(format!("duplicate {kind} id {id}")));
            }
        }
        let max = seen.last().copied().unwrap_or(0);
        let next = max.checked_add(1).ok_or_else(|| {
            AppError::Seed(format!("{kind} id {max} leaves no room for new records"))
        })?;
        Ok(Self { next: Some(next) })
    }

    pub fn next_id(&mut self) -> AppResult<RecordId> {
        let id = self
            .next
            .ok_or_else(|| AppError::Unsupported("record id space exhausted".into()))?;
        self.next = id.checked_add(1);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_after_existing_ids() {
        let mut seq = IdSequence::after("budget type", [3, 9, 4]).unwrap();
        assert_eq!(seq.next_id().unwrap(), 10);
        assert_eq!(seq.next_id().unwrap(), 11);
    }

    #[test]
    fn empty_sequence_starts_at_one() {
        assert_eq!(IdSequence::after("course", Vec::new()).unwrap().next_id().unwrap(), 1);
    }

    #[test]
    fn rapid_inserts_never_collide() {
        let mut seq = IdSequence::new();
        let ids: Vec<_> = (0..1000).map(|_| seq.next_id().unwrap()).collect();
        let mut dedup = ids.clone();
        dedup.dedup();
        assert_eq!(ids, dedup);
    }

    #[test]
    fn largest_possible_id_cannot_be_continued() {
        let err = IdSequence::after("budget type", [1, RecordId::MAX]).unwrap_err();
        assert!(matches!(err, AppError::Seed(msg) if msg.contains("no room")));
    }

    #[test]
    fn last_id_is_handed_out_once() {
        let mut seq = IdSequence::after("material", [RecordId::MAX - 1]).unwrap();
        assert_eq!(seq.next_id().unwrap(), RecordId::MAX);
        assert!(seq.next_id().is_err());
        assert!(seq.next_id().is_err());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = IdSequence::after("budget type", [1, 2, 1]).unwrap_err();
        assert!(matches!(err, AppError::Seed(msg) if msg == "duplicate budget type id 1"));
    }
}
