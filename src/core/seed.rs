//! Seed files: initial records for a session, in JSON or YAML.

use crate::core::ids::IdSequence;
use crate::errors::{AppError, AppResult};
use crate::models::record::Record;
use crate::models::{BudgetType, Course, Facility, Material, MaterialType};
use crate::utils::path::is_yaml;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub budget_types: Vec<BudgetType>,
    #[serde(default)]
    pub material_types: Vec<MaterialType>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub facilities: Vec<Facility>,
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl SeedData {
    pub fn total(&self) -> usize {
        self.budget_types.len()
            + self.material_types.len()
            + self.materials.len()
            + self.facilities.len()
            + self.courses.len()
    }

    /// Parse seed text; `yaml` selects the format.
    pub fn parse(content: &str, yaml: bool) -> AppResult<Self> {
        let seed: Self = if yaml {
            serde_yaml::from_str(content)?
        } else {
            serde_json::from_str(content)?
        };
        seed.check_ids()?;
        Ok(seed)
    }

    /// Ids must be unique within each list and leave room for new records.
    pub fn check_ids(&self) -> AppResult<()> {
        check_list(&self.budget_types)?;
        check_list(&self.material_types)?;
        check_list(&self.materials)?;
        check_list(&self.facilities)?;
        check_list(&self.courses)
    }

    /// Load a seed file. `.yml`/`.yaml` files are YAML, anything else JSON.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::Seed(format!(
                "file not found: {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content, is_yaml(path))
    }
}

fn check_list<R: Record>(records: &[R]) -> AppResult<()> {
    IdSequence::after(R::KIND, records.iter().map(R::id)).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_default_to_empty() {
        let seed = SeedData::parse(r#"{"budget_types":[{"id":1,"budget_type":"Capex"}]}"#, false)
            .unwrap();
        assert_eq!(seed.budget_types.len(), 1);
        assert!(seed.materials.is_empty());
        assert_eq!(seed.total(), 1);
    }

    #[test]
    fn parses_yaml_with_nested_facility() {
        let yaml = r#"
facilities:
  - id: 4
    name: Court 1
    location: Block B
    capacity: 4
    fee: { amount: 10, unit: slot }
    payment: { mode: both, advance_percent: 0 }
    slot: { opens: "07:00:00", closes: "21:00:00", minutes: 60 }
"#;
        let seed = SeedData::parse(yaml, true).unwrap();
        assert_eq!(seed.facilities[0].id, 4);
        assert!(seed.facilities[0].active);
        assert_eq!(seed.facilities[0].slot.slots_per_day(), 14);
    }

    #[test]
    fn duplicate_ids_in_one_list_are_rejected() {
        let json = r#"{"budget_types":[{"id":1,"budget_type":"Capex"},{"id":1,"budget_type":"Opex"}]}"#;
        let err = SeedData::parse(json, false).unwrap_err();
        assert!(matches!(err, AppError::Seed(msg) if msg == "duplicate budget type id 1"));
    }

    #[test]
    fn same_id_in_different_lists_is_fine() {
        let json = r#"{
            "budget_types":[{"id":1,"budget_type":"Capex"}],
            "material_types":[{"id":1,"name":"Sheet","code":"SH"}]
        }"#;
        assert_eq!(SeedData::parse(json, false).unwrap().total(), 2);
    }

    #[test]
    fn largest_id_is_rejected() {
        let json = r#"{"budget_types":[{"id":18446744073709551615,"budget_type":"Capex"}]}"#;
        assert!(matches!(SeedData::parse(json, false), Err(AppError::Seed(_))));
    }

    #[test]
    fn missing_file_is_a_seed_error() {
        let err = SeedData::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, AppError::Seed(_)));
    }
}
