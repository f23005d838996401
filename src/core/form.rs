//! Draft-bound entity form.

use crate::core::validation::{FieldErrors, trim_draft, validate};
use crate::errors::{AppError, AppResult};
use crate::models::record::{Draft, Editable, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(RecordId),
}

/// A form over a draft of `R`. Errors are filled on submit and cleared per
/// field as soon as that field changes.
#[derive(Debug, Clone)]
pub struct EntityForm<R> {
    mode: FormMode,
    draft: Draft,
    errors: FieldErrors,
    base: Option<R>,
}

impl<R: Editable> EntityForm<R> {
    /// Empty draft with every form field present.
    pub fn for_add() -> Self {
        let draft = R::form_fields()
            .iter()
            .map(|f| (f.name.to_string(), String::new()))
            .collect();
        Self {
            mode: FormMode::Add,
            draft,
            errors: FieldErrors::new(),
            base: None,
        }
    }

    pub fn for_edit(record: &R) -> Self {
        Self {
            mode: FormMode::Edit(record.id()),
            draft: record.to_draft(),
            errors: FieldErrors::new(),
            base: Some(record.clone()),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Patch one field of the draft and drop its pending error.
    pub fn set_field(&mut self, field: &str, value: &str) -> AppResult<()> {
        if !R::form_fields().iter().any(|f| f.name == field) {
            return Err(AppError::UnknownField {
                kind: R::KIND,
                field: field.to_string(),
            });
        }
        self.draft.insert(field.to_string(), value.to_string());
        self.errors.remove(field);
        Ok(())
    }

    /// Validate the trimmed draft and build the record.
    ///
    /// On failure the error map is kept on the form and returned inside
    /// `AppError::Validation`; a value the record type cannot hold is
    /// reported against its field the same way. In edit mode the record
    /// keeps its id.
    pub fn submit(&mut self) -> AppResult<R> {
        let trimmed = trim_draft(&self.draft);
        if let Err(errors) = validate(R::form_fields(), &trimmed) {
            self.errors = errors.clone();
            return Err(AppError::Validation(errors));
        }
        self.errors.clear();

        let mut record = match R::from_draft(&trimmed, self.base.as_ref()) {
            Ok(record) => record,
            Err(AppError::InvalidField { field, value }) => {
                let label = R::form_fields()
                    .iter()
                    .find(|f| f.name == field)
                    .map_or(field.as_str(), |f| f.label);
                let message = format!("{label} cannot hold '{value}'");
                self.errors.insert(field, message);
                return Err(AppError::Validation(self.errors.clone()));
            }
            Err(e) => return Err(e),
        };
        if let FormMode::Edit(id) = self.mode {
            record.set_id(id);
        }
        Ok(record)
    }
}
