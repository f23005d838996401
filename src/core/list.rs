//! Generic list controller: collection, filter row, page cursor, column
//! editor and the add/edit modal of one admin screen.

use crate::core::columns::FieldListEditor;
use crate::core::filter::FilterSet;
use crate::core::form::{EntityForm, FormMode};
use crate::core::modal::Modal;
use crate::core::paginate::{Page, clamp_page, paginate, total_pages};
use crate::core::repository::{Repository, VecStore};
use crate::errors::{AppError, AppResult};
use crate::models::record::{Editable, Record, RecordId};

/// What a successful form submit did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    Added(RecordId),
    Updated(RecordId),
}

impl Submitted {
    pub fn id(&self) -> RecordId {
        match self {
            Submitted::Added(id) | Submitted::Updated(id) => *id,
        }
    }
}

pub struct ListController<R, S = VecStore<R>> {
    store: S,
    filters: FilterSet,
    page: usize,
    page_size: usize,
    columns: FieldListEditor,
    modal: Modal<EntityForm<R>>,
}

impl<R: Record, S: Repository<R>> ListController<R, S> {
    pub fn new(store: S, page_size: usize) -> Self {
        Self {
            store,
            filters: FilterSet::new(),
            page: 1,
            page_size: page_size.max(1),
            columns: FieldListEditor::for_record::<R>(),
            modal: Modal::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn records(&self) -> Vec<R> {
        self.store.records()
    }

    pub fn get(&self, id: RecordId) -> Option<R> {
        self.store.get(id)
    }

    // ------------------------------------------------
    // Filter row
    // ------------------------------------------------

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Set one filter value. Any filter change goes back to page 1.
    pub fn set_filter(&mut self, field: &str, value: &str) -> AppResult<()> {
        if !R::columns().contains(&field) {
            return Err(AppError::UnknownField {
                kind: R::KIND,
                field: field.to_string(),
            });
        }
        self.filters.set(field, value);
        self.page = 1;
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.page = 1;
    }

    pub fn filtered(&self) -> Vec<R> {
        self.filters.apply(&self.store.records())
    }

    // ------------------------------------------------
    // Pagination
    // ------------------------------------------------

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), self.page_size)
    }

    /// Move to `page`, clamped to the available pages. Returns the page shown.
    pub fn set_page(&mut self, page: usize) -> usize {
        self.page = clamp_page(page, self.total_pages());
        self.page
    }

    pub fn next_page(&mut self) -> usize {
        self.set_page(self.page + 1)
    }

    pub fn prev_page(&mut self) -> usize {
        self.set_page(self.page.saturating_sub(1))
    }

    pub fn current_page(&self) -> Page<R> {
        paginate(&self.filtered(), self.page, self.page_size)
    }

    fn clamp_cursor(&mut self) {
        self.page = clamp_page(self.page, self.total_pages());
    }

    // ------------------------------------------------
    // Collection mutations
    // ------------------------------------------------

    pub fn insert(&mut self, record: R) -> AppResult<RecordId> {
        self.store.insert(record)
    }

    pub fn replace(&mut self, record: R) -> AppResult<()> {
        self.store.replace(record)?;
        self.clamp_cursor();
        Ok(())
    }

    pub fn delete(&mut self, id: RecordId) -> AppResult<R> {
        let removed = self.store.remove(id)?;
        self.clamp_cursor();
        Ok(removed)
    }

    // ------------------------------------------------
    // Column editor
    // ------------------------------------------------

    pub fn columns(&self) -> &FieldListEditor {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut FieldListEditor {
        &mut self.columns
    }
}

impl<R: Editable, S: Repository<R>> ListController<R, S> {
    pub fn open_add(&mut self) -> AppResult<()> {
        if !R::supports_quick_add() {
            return Err(AppError::Unsupported(format!(
                "new {} records are created through the wizard",
                R::KIND
            )));
        }
        self.modal.open(EntityForm::for_add());
        Ok(())
    }

    pub fn open_edit(&mut self, id: RecordId) -> AppResult<()> {
        let record = self
            .store
            .get(id)
            .ok_or(AppError::NotFound { kind: R::KIND, id })?;
        self.modal.open(EntityForm::for_edit(&record));
        Ok(())
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn backdrop_blurred(&self) -> bool {
        self.modal.backdrop_blurred()
    }

    pub fn form(&self) -> Option<&EntityForm<R>> {
        self.modal.content()
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> AppResult<()> {
        self.modal
            .content_mut()
            .ok_or(AppError::NoOpenForm)?
            .set_field(field, value)
    }

    /// Validate the open form and commit it. On validation failure nothing
    /// is mutated and the modal stays open with its error map filled.
    pub fn submit(&mut self) -> AppResult<Submitted> {
        let form = self.modal.content_mut().ok_or(AppError::NoOpenForm)?;
        let mode = form.mode();
        let record = form.submit()?;

        let outcome = match mode {
            FormMode::Add => Submitted::Added(self.store.insert(record)?),
            FormMode::Edit(id) => {
                self.store.replace(record)?;
                Submitted::Updated(id)
            }
        };

        self.modal.close();
        self.clamp_cursor();
        Ok(outcome)
    }

    /// Close the modal, discarding the draft. Returns whether one was open.
    pub fn cancel(&mut self) -> bool {
        self.modal.close().is_some()
    }
}
