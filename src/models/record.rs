//! Common record contract shared by every admin screen.

use crate::core::validation::FieldSpec;
use crate::errors::{AppError, AppResult};
use crate::utils::formatting::humanize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::str::FromStr;

/// Numeric identifier of a record, unique within its list.
pub type RecordId = u64;

/// Raw form input: field name → text as typed by the user.
pub type Draft = BTreeMap<String, String>;

/// A flat bag of scalar fields with a numeric id.
pub trait Record: Clone + Debug + Serialize + DeserializeOwned {
    /// Human name of the entity ("budget type", "material", ...).
    const KIND: &'static str;

    fn id(&self) -> RecordId;

    fn set_id(&mut self, id: RecordId);

    /// Field names accepted by the filter row, in table column order.
    fn columns() -> &'static [&'static str];

    /// Columns of [`Record::columns`] that start disabled in the table.
    fn hidden_columns() -> &'static [&'static str] {
        &[]
    }

    /// String representation of a field, `None` when the record has no such field.
    fn field(&self, name: &str) -> Option<String>;

    /// Column header for a field.
    fn label(name: &str) -> String {
        default_label(name)
    }
}

pub fn default_label(name: &str) -> String {
    if name == "id" { "ID".into() } else { humanize(name) }
}

/// A record that can be built from a validated draft.
pub trait Editable: Record {
    fn form_fields() -> &'static [FieldSpec];

    /// Build the record from a trimmed, validated draft.
    ///
    /// `base` is the record being edited, if any; fields that the form does
    /// not cover are carried over from it.
    fn from_draft(draft: &Draft, base: Option<&Self>) -> AppResult<Self>;

    fn to_draft(&self) -> Draft {
        Self::form_fields()
            .iter()
            .map(|f| (f.name.to_string(), self.field(f.name).unwrap_or_default()))
            .collect()
    }

    /// Whether new records may be created through the plain form.
    fn supports_quick_add() -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// Draft accessors used by `from_draft` implementations
// ---------------------------------------------------------------------------

pub(crate) fn text(draft: &Draft, key: &str) -> String {
    draft.get(key).cloned().unwrap_or_default()
}

pub(crate) fn opt_text(draft: &Draft, key: &str) -> Option<String> {
    draft.get(key).filter(|v| !v.is_empty()).cloned()
}

pub(crate) fn parse_value<T: FromStr>(draft: &Draft, key: &str) -> AppResult<T> {
    let raw = text(draft, key);
    raw.parse::<T>().map_err(|_| AppError::InvalidField {
        field: key.to_string(),
        value: raw,
    })
}

/// Like [`parse_value`] but an empty input yields `T::default()`.
pub(crate) fn parse_or_default<T: FromStr + Default>(draft: &Draft, key: &str) -> AppResult<T> {
    match opt_text(draft, key) {
        Some(_) => parse_value(draft, key),
        None => Ok(T::default()),
    }
}

pub(crate) fn parse_flag(draft: &Draft, key: &str, default: bool) -> AppResult<bool> {
    match opt_text(draft, key) {
        None => Ok(default),
        Some(raw) => crate::utils::formatting::parse_bool(&raw).ok_or(AppError::InvalidField {
            field: key.to_string(),
            value: raw,
        }),
    }
}
