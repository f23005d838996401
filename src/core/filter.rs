//! Filter row: per-field substring filters combined with AND.

use crate::models::record::Record;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    values: BTreeMap<String, String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter text for a field. An empty value removes the filter.
    pub fn set(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.values.remove(field);
        } else {
            self.values.insert(field.to_string(), value.to_string());
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// A record matches when every filter value is a case-insensitive
    /// substring of the field. A field the record lacks never matches.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.values.iter().all(|(field, needle)| {
            let needle = needle.trim().to_lowercase();
            record
                .field(field)
                .is_some_and(|v| v.to_lowercase().contains(&needle))
        })
    }

    pub fn apply<R: Record>(&self, records: &[R]) -> Vec<R> {
        records
            .iter()
            .filter(|r| self.matches(*r))
            .cloned()
            .collect()
    }
}
