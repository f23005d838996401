use crate::core::validation::{FieldSpec, Rule};
use crate::errors::AppResult;
use crate::models::record::{
    Draft, Editable, Record, RecordId, default_label, opt_text, parse_flag, parse_or_default,
    parse_value, text,
};
use crate::utils::date;
use crate::utils::formatting::{format_amount, yes_no};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Purchasable item master record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: RecordId,
    pub code: String,
    pub name: String,
    /// Name of a material type. Not checked against the material-type list.
    pub material_type: String,
    pub uom: String,
    #[serde(default)]
    pub hsn_code: Option<String>,
    #[serde(default)]
    pub gst_rate: f64,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub reorder_level: u32,
    #[serde(default)]
    pub min_stock: u32,
    #[serde(default)]
    pub max_stock: u32,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
}

fn default_active() -> bool {
    true
}

const UOMS: &[&str] = &["pcs", "kg", "g", "l", "ml", "m", "box", "set"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "code",
        "Code",
        &[
            Rule::Required,
            Rule::MaxLen(20),
            Rule::Pattern {
                regex: r"^[A-Za-z0-9/_-]+$",
                message: "may contain only letters, digits, '/', '-' and '_'",
            },
        ],
    ),
    FieldSpec::new(
        "name",
        "Name",
        &[Rule::Required, Rule::MinLen(2), Rule::MaxLen(80)],
    ),
    FieldSpec::new("material_type", "Material type", &[Rule::Required]),
    FieldSpec::new("uom", "Unit of measure", &[Rule::Required, Rule::OneOf(UOMS)]),
    FieldSpec::new(
        "hsn_code",
        "HSN code",
        &[Rule::Pattern {
            regex: r"^[0-9]{4,8}$",
            message: "must be 4 to 8 digits",
        }],
    ),
    FieldSpec::new(
        "gst_rate",
        "GST rate",
        &[Rule::Numeric, Rule::Range { min: 0.0, max: 100.0 }],
    ),
    FieldSpec::new(
        "unit_price",
        "Unit price",
        &[
            Rule::Required,
            Rule::Numeric,
            Rule::Range {
                min: 0.0,
                max: 1.0e9,
            },
        ],
    ),
    FieldSpec::new("reorder_level", "Reorder level", &[Rule::Unsigned, Rule::Range { min: 0.0, max: 1.0e9 }]),
    FieldSpec::new("min_stock", "Minimum stock", &[Rule::Unsigned, Rule::Range { min: 0.0, max: 1.0e9 }]),
    FieldSpec::new("max_stock", "Maximum stock", &[Rule::Unsigned, Rule::Range { min: 0.0, max: 1.0e9 }]),
    FieldSpec::new("brand", "Brand", &[Rule::MaxLen(40)]),
    FieldSpec::new("description", "Description", &[Rule::MaxLen(200)]),
    FieldSpec::new("active", "Active", &[Rule::Bool]),
    FieldSpec::new("valid_from", "Valid from", &[Rule::Date]),
];

impl Record for Material {
    const KIND: &'static str = "material";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "code",
            "name",
            "material_type",
            "uom",
            "hsn_code",
            "gst_rate",
            "unit_price",
            "reorder_level",
            "min_stock",
            "max_stock",
            "brand",
            "description",
            "active",
            "valid_from",
        ]
    }

    fn field(&self, name: &str) -> Option<String> {
        let v = match name {
            "id" => self.id.to_string(),
            "code" => self.code.clone(),
            "name" => self.name.clone(),
            "material_type" => self.material_type.clone(),
            "uom" => self.uom.clone(),
            "hsn_code" => self.hsn_code.clone().unwrap_or_default(),
            "gst_rate" => format_amount(self.gst_rate),
            "unit_price" => format_amount(self.unit_price),
            "reorder_level" => self.reorder_level.to_string(),
            "min_stock" => self.min_stock.to_string(),
            "max_stock" => self.max_stock.to_string(),
            "brand" => self.brand.clone().unwrap_or_default(),
            "description" => self.description.clone().unwrap_or_default(),
            "active" => yes_no(self.active),
            "valid_from" => date::format_optional_date(self.valid_from.as_ref()),
            _ => return None,
        };
        Some(v)
    }

    fn label(name: &str) -> String {
        match name {
            "uom" => "UoM".into(),
            "hsn_code" => "HSN".into(),
            "gst_rate" => "GST %".into(),
            other => default_label(other),
        }
    }
}

impl Editable for Material {
    fn form_fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn from_draft(draft: &Draft, base: Option<&Self>) -> AppResult<Self> {
        let valid_from = match opt_text(draft, "valid_from") {
            Some(raw) => Some(date::parse_date(&raw).ok_or(
                crate::errors::AppError::InvalidField {
                    field: "valid_from".into(),
                    value: raw,
                },
            )?),
            None => None,
        };

        Ok(Self {
            id: base.map(|b| b.id).unwrap_or_default(),
            code: text(draft, "code"),
            name: text(draft, "name"),
            material_type: text(draft, "material_type"),
            uom: text(draft, "uom").to_lowercase(),
            hsn_code: opt_text(draft, "hsn_code"),
            gst_rate: parse_or_default(draft, "gst_rate")?,
            unit_price: parse_value(draft, "unit_price")?,
            reorder_level: parse_or_default(draft, "reorder_level")?,
            min_stock: parse_or_default(draft, "min_stock")?,
            max_stock: parse_or_default(draft, "max_stock")?,
            brand: opt_text(draft, "brand"),
            description: opt_text(draft, "description"),
            active: parse_flag(draft, "active", true)?,
            valid_from,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::validate;

    fn draft() -> Draft {
        [
            ("code", "MS-001"),
            ("name", "Mild steel sheet"),
            ("material_type", "Raw"),
            ("uom", "kg"),
            ("unit_price", "72.5"),
            ("min_stock", "10"),
            ("valid_from", "2025-04-01"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn builds_material_with_defaults_for_empty_optionals() {
        let d = draft();
        validate(Material::form_fields(), &d).unwrap();
        let m = Material::from_draft(&d, None).unwrap();
        assert_eq!(m.unit_price, 72.5);
        assert_eq!(m.min_stock, 10);
        assert_eq!(m.reorder_level, 0);
        assert!(m.active);
        assert_eq!(m.hsn_code, None);
        assert_eq!(m.valid_from, NaiveDate::from_ymd_opt(2025, 4, 1));
    }

    #[test]
    fn rejects_unknown_unit_and_bad_hsn() {
        let mut d = draft();
        d.insert("uom".into(), "bucket".into());
        d.insert("hsn_code".into(), "12".into());
        let errs = validate(Material::form_fields(), &d).unwrap_err();
        assert!(errs.get("uom").is_some());
        assert_eq!(errs.get("hsn_code"), Some("HSN code must be 4 to 8 digits"));
    }

    #[test]
    fn draft_round_trips_through_field_strings() {
        let m = Material::from_draft(&draft(), None).unwrap();
        let back = Material::from_draft(&m.to_draft(), Some(&m)).unwrap();
        assert_eq!(m, back);
    }
}
