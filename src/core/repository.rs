//! Storage seam behind every list controller.
//!
//! Implementations can be a plain vector owned by one controller or a store
//! shared between several pages.

use crate::core::ids::IdSequence;
use crate::errors::{AppError, AppResult};
use crate::models::record::{Record, RecordId};

/// Core repository trait for CRUD operations on one record type.
pub trait Repository<R: Record> {
    /// Snapshot of all records in insertion order.
    fn records(&self) -> Vec<R>;

    fn get(&self, id: RecordId) -> Option<R>;

    /// Append a record under a freshly assigned id and return that id.
    fn insert(&mut self, record: R) -> AppResult<RecordId>;

    /// Replace the record with the same id.
    fn replace(&mut self, record: R) -> AppResult<()>;

    /// Remove and return the record with `id`.
    fn remove(&mut self, id: RecordId) -> AppResult<R>;

    fn len(&self) -> usize {
        self.records().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory vector store with monotonic ids.
#[derive(Debug, Clone)]
pub struct VecStore<R> {
    items: Vec<R>,
    ids: IdSequence,
}

impl<R: Record> Default for VecStore<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            ids: IdSequence::new(),
        }
    }
}

impl<R: Record> VecStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with records that already carry ids.
    ///
    /// Fails with `AppError::Seed` on duplicate ids or when the largest id
    /// leaves no room for new records.
    pub fn with_records(items: Vec<R>) -> AppResult<Self> {
        let ids = IdSequence::after(R::KIND, items.iter().map(|r| r.id()))?;
        Ok(Self { items, ids })
    }
}

impl<R: Record> Repository<R> for VecStore<R> {
    fn records(&self) -> Vec<R> {
        self.items.clone()
    }

    fn get(&self, id: RecordId) -> Option<R> {
        self.items.iter().find(|r| r.id() == id).cloned()
    }

    fn insert(&mut self, mut record: R) -> AppResult<RecordId> {
        let id = self.ids.next_id()?;
        record.set_id(id);
        self.items.push(record);
        Ok(id)
    }

    fn replace(&mut self, record: R) -> AppResult<()> {
        let id = record.id();
        let slot = self
            .items
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(AppError::NotFound { kind: R::KIND, id })?;
        *slot = record;
        Ok(())
    }

    fn remove(&mut self, id: RecordId) -> AppResult<R> {
        let pos = self
            .items
            .iter()
            .position(|r| r.id() == id)
            .ok_or(AppError::NotFound { kind: R::KIND, id })?;
        Ok(self.items.remove(pos))
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BudgetType;

    fn store() -> VecStore<BudgetType> {
        VecStore::with_records(vec![
            BudgetType::new(1, "Capex"),
            BudgetType::new(2, "Opex"),
            BudgetType::new(3, "Grant"),
        ])
        .unwrap()
    }

    #[test]
    fn insert_assigns_next_id() {
        let mut s = store();
        let id = s.insert(BudgetType::new(0, "Reserve")).unwrap();
        assert_eq!(id, 4);
        assert_eq!(s.get(4).unwrap().budget_type, "Reserve");
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let mut s = store();
        s.remove(3).unwrap();
        assert_eq!(s.insert(BudgetType::new(0, "Reserve")).unwrap(), 4);
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let mut s = store();
        let removed = s.remove(2).unwrap();
        assert_eq!(removed.budget_type, "Opex");
        let names: Vec<_> = s.records().into_iter().map(|b| b.budget_type).collect();
        assert_eq!(names, ["Capex", "Grant"]);
    }

    #[test]
    fn duplicate_seed_ids_are_rejected() {
        let err = VecStore::with_records(vec![
            BudgetType::new(1, "Capex"),
            BudgetType::new(1, "Opex"),
        ])
        .unwrap_err();
        assert!(matches!(err, AppError::Seed(_)));
    }

    #[test]
    fn replace_unknown_id_is_not_found() {
        let mut s = store();
        let err = s.replace(BudgetType::new(99, "Ghost")).unwrap_err();
        assert!(matches!(err, AppError::NotFound { id: 99, .. }));
    }
}
