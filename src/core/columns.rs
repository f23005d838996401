//! Column editor: ordered list of `{id, label, enabled}` entries.

use crate::errors::{AppError, AppResult};
use crate::models::record::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnField {
    pub id: String,
    pub label: String,
    pub enabled: bool,
    /// User-added column with no backing record field.
    pub custom: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldListEditor {
    fields: Vec<ColumnField>,
    next_custom: u32,
}

impl Default for FieldListEditor {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            next_custom: 1,
        }
    }
}

impl FieldListEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Editor holding the built-in columns of `R`; only the hidden ones
    /// start disabled.
    pub fn for_record<R: Record>() -> Self {
        let fields = R::columns()
            .iter()
            .map(|name| ColumnField {
                id: name.to_string(),
                label: R::label(name),
                enabled: !R::hidden_columns().contains(name),
                custom: false,
            })
            .collect();
        Self {
            fields,
            next_custom: 1,
        }
    }

    pub fn fields(&self) -> &[ColumnField] {
        &self.fields
    }

    pub fn visible(&self) -> impl Iterator<Item = &ColumnField> {
        self.fields.iter().filter(|f| f.enabled)
    }

    pub fn get(&self, id: &str) -> Option<&ColumnField> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Append an enabled custom column and return its id (`custom-N`).
    pub fn append(&mut self, label: &str) -> AppResult<String> {
        let label = clean_label(label)?;
        let id = format!("custom-{}", self.next_custom);
        self.next_custom += 1;
        self.fields.push(ColumnField {
            id: id.clone(),
            label,
            enabled: true,
            custom: true,
        });
        Ok(id)
    }

    pub fn rename(&mut self, id: &str, label: &str) -> AppResult<()> {
        let label = clean_label(label)?;
        self.find_mut(id)?.label = label;
        Ok(())
    }

    /// Flip visibility; returns the new state.
    pub fn toggle(&mut self, id: &str) -> AppResult<bool> {
        let field = self.find_mut(id)?;
        field.enabled = !field.enabled;
        Ok(field.enabled)
    }

    pub fn remove(&mut self, id: &str) -> AppResult<ColumnField> {
        let pos = self
            .fields
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| AppError::ColumnNotFound(id.to_string()))?;
        Ok(self.fields.remove(pos))
    }

    fn find_mut(&mut self, id: &str) -> AppResult<&mut ColumnField> {
        self.fields
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| AppError::ColumnNotFound(id.to_string()))
    }
}

fn clean_label(label: &str) -> AppResult<String> {
    let label = label.trim();
    if label.is_empty() {
        return Err(AppError::EmptyColumnLabel);
    }
    Ok(label.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetType, Course};

    #[test]
    fn starts_with_builtin_columns() {
        let ed = FieldListEditor::for_record::<BudgetType>();
        let ids: Vec<_> = ed.visible().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["id", "budget_type"]);
        assert_eq!(ed.get("budget_type").unwrap().label, "Budget type");
    }

    #[test]
    fn hidden_columns_start_disabled() {
        let mut ed = FieldListEditor::for_record::<Course>();
        assert!(!ed.get("description").unwrap().enabled);
        assert!(ed.visible().all(|f| f.id != "description"));
        assert!(ed.toggle("description").unwrap());
        assert!(ed.visible().any(|f| f.id == "description"));
    }

    #[test]
    fn append_rename_toggle_remove() {
        let mut ed = FieldListEditor::for_record::<BudgetType>();
        let id = ed.append("Owner").unwrap();
        assert_eq!(id, "custom-1");
        ed.rename(&id, "Cost owner").unwrap();
        assert_eq!(ed.get(&id).unwrap().label, "Cost owner");
        assert!(!ed.toggle(&id).unwrap());
        assert_eq!(ed.visible().count(), 2);
        ed.remove(&id).unwrap();
        assert_eq!(ed.fields().len(), 2);
    }

    #[test]
    fn custom_ids_are_not_reused_after_remove() {
        let mut ed = FieldListEditor::new();
        let a = ed.append("A").unwrap();
        ed.remove(&a).unwrap();
        assert_eq!(ed.append("B").unwrap(), "custom-2");
    }

    #[test]
    fn rejects_empty_labels_and_unknown_ids() {
        let mut ed = FieldListEditor::new();
        assert!(matches!(ed.append("  "), Err(AppError::EmptyColumnLabel)));
        assert!(matches!(ed.toggle("nope"), Err(AppError::ColumnNotFound(_))));
    }
}
