//! Shared facility store.
//!
//! One store is owned by the workspace and handed to both the facility list
//! screen and the slot-booking page, so an edit made on one is visible on
//! the other. Writes are last-writer-wins.

use crate::core::ids::IdSequence;
use crate::core::repository::Repository;
use crate::errors::{AppError, AppResult};
use crate::models::facility::{Facility, FacilityPatch};
use crate::models::record::{Record, RecordId};
use std::cell::RefCell;
use std::rc::Rc;

pub trait FacilityRepository {
    /// Append a facility under a fresh id and return that id. The first id
    /// handed out is `max(existing) + 1`; ids of deleted facilities are not reused.
    fn add_facility(&mut self, data: Facility) -> AppResult<RecordId>;

    /// Merge `patch` into the facility with `id` and return the result.
    fn update_facility(&mut self, id: RecordId, patch: &FacilityPatch) -> AppResult<Facility>;

    fn facility_by_id(&self, id: RecordId) -> Option<Facility>;

    fn facilities(&self) -> Vec<Facility>;
}

#[derive(Debug, Clone)]
pub struct FacilityStore {
    facilities: Vec<Facility>,
    ids: IdSequence,
}

impl Default for FacilityStore {
    fn default() -> Self {
        Self {
            facilities: Vec::new(),
            ids: IdSequence::new(),
        }
    }
}

impl FacilityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with seeded facilities; their ids must be unique.
    pub fn with_facilities(facilities: Vec<Facility>) -> AppResult<Self> {
        let ids = IdSequence::after(Facility::KIND, facilities.iter().map(|f| f.id))?;
        Ok(Self { facilities, ids })
    }

    fn remove(&mut self, id: RecordId) -> AppResult<Facility> {
        let pos = self
            .facilities
            .iter()
            .position(|f| f.id == id)
            .ok_or(AppError::NotFound {
                kind: Facility::KIND,
                id,
            })?;
        Ok(self.facilities.remove(pos))
    }
}

impl FacilityRepository for FacilityStore {
    fn add_facility(&mut self, mut data: Facility) -> AppResult<RecordId> {
        let id = self.ids.next_id()?;
        data.id = id;
        self.facilities.push(data);
        Ok(id)
    }

    fn update_facility(&mut self, id: RecordId, patch: &FacilityPatch) -> AppResult<Facility> {
        let facility = self
            .facilities
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(AppError::NotFound {
                kind: Facility::KIND,
                id,
            })?;
        patch.apply(facility);
        Ok(facility.clone())
    }

    fn facility_by_id(&self, id: RecordId) -> Option<Facility> {
        self.facilities.iter().find(|f| f.id == id).cloned()
    }

    fn facilities(&self) -> Vec<Facility> {
        self.facilities.clone()
    }
}

/// Cloneable handle to one [`FacilityStore`].
#[derive(Debug, Clone, Default)]
pub struct SharedFacilities(Rc<RefCell<FacilityStore>>);

impl SharedFacilities {
    pub fn new(store: FacilityStore) -> Self {
        Self(Rc::new(RefCell::new(store)))
    }
}

impl FacilityRepository for SharedFacilities {
    fn add_facility(&mut self, data: Facility) -> AppResult<RecordId> {
        self.0.borrow_mut().add_facility(data)
    }

    fn update_facility(&mut self, id: RecordId, patch: &FacilityPatch) -> AppResult<Facility> {
        self.0.borrow_mut().update_facility(id, patch)
    }

    fn facility_by_id(&self, id: RecordId) -> Option<Facility> {
        self.0.borrow().facility_by_id(id)
    }

    fn facilities(&self) -> Vec<Facility> {
        self.0.borrow().facilities()
    }
}

/// Lets the generic list controller drive the shared store.
impl Repository<Facility> for SharedFacilities {
    fn records(&self) -> Vec<Facility> {
        self.facilities()
    }

    fn get(&self, id: RecordId) -> Option<Facility> {
        self.facility_by_id(id)
    }

    fn insert(&mut self, record: Facility) -> AppResult<RecordId> {
        self.add_facility(record)
    }

    fn replace(&mut self, record: Facility) -> AppResult<()> {
        self.update_facility(record.id, &FacilityPatch::full(&record))
            .map(|_| ())
    }

    fn remove(&mut self, id: RecordId) -> AppResult<Facility> {
        self.0.borrow_mut().remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::list::ListController;
    use crate::models::facility::tests::sample;
    use crate::utils::time::format_time;

    #[test]
    fn add_assigns_max_plus_one() {
        let mut store = FacilityStore::new();
        assert_eq!(store.add_facility(sample("Room A")).unwrap(), 1);
        let mut b = sample("Room B");
        b.id = 10;
        let mut seeded = FacilityStore::with_facilities(vec![b]).unwrap();
        assert_eq!(seeded.add_facility(sample("Room C")).unwrap(), 11);
        seeded.remove(11).unwrap();
        assert_eq!(seeded.add_facility(sample("Room D")).unwrap(), 12);
    }

    #[test]
    fn seeded_ids_must_be_unique_and_continuable() {
        let mut a = sample("Room A");
        a.id = 3;
        let mut b = sample("Room B");
        b.id = 3;
        assert!(matches!(
            FacilityStore::with_facilities(vec![a.clone(), b]),
            Err(AppError::Seed(_))
        ));

        a.id = RecordId::MAX;
        assert!(matches!(
            FacilityStore::with_facilities(vec![a]),
            Err(AppError::Seed(_))
        ));
    }

    #[test]
    fn update_merges_patch() {
        let mut store = FacilityStore::new();
        let id = store.add_facility(sample("Room A")).unwrap();
        let patch = FacilityPatch {
            capacity: Some(12),
            ..FacilityPatch::default()
        };
        let updated = store.update_facility(id, &patch).unwrap();
        assert_eq!(updated.capacity, 12);
        assert_eq!(updated.name, "Room A");
        assert!(store.update_facility(99, &patch).is_err());
    }

    #[test]
    fn lookup_of_unknown_id_is_none() {
        let store = FacilityStore::new();
        assert!(store.facility_by_id(1).is_none());
    }

    #[test]
    fn edits_on_one_page_are_visible_on_the_other() {
        let shared = SharedFacilities::default();
        let mut list = ListController::new(shared.clone(), 10);
        let mut booking = shared.clone();

        let id = list.insert(sample("Room A")).unwrap();
        assert_eq!(booking.facility_by_id(id).unwrap().name, "Room A");

        let patch = FacilityPatch::from_field("slot.closes", "17:30").unwrap();
        booking.update_facility(id, &patch).unwrap();
        let seen = list.get(id).unwrap();
        assert_eq!(format_time(&seen.slot.closes), "17:30");

        list.delete(id).unwrap();
        assert!(booking.facility_by_id(id).is_none());
    }

    #[test]
    fn form_edit_goes_through_update() {
        let shared = SharedFacilities::default();
        let mut list = ListController::new(shared.clone(), 10);
        let id = list.insert(sample("Room A")).unwrap();
        list.open_edit(id).unwrap();
        list.set_field("name", "Board room").unwrap();
        list.submit().unwrap();
        assert_eq!(shared.facility_by_id(id).unwrap().name, "Board room");
    }
}
