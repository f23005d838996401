use crate::core::validation::{FieldSpec, Rule};
use crate::errors::AppResult;
use crate::models::record::{Draft, Editable, Record, RecordId, opt_text, text};
use serde::{Deserialize, Serialize};

/// Category a material belongs to (raw, consumable, packaging, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialType {
    pub id: RecordId,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "name",
        "Name",
        &[Rule::Required, Rule::MinLen(2), Rule::MaxLen(60)],
    ),
    FieldSpec::new(
        "code",
        "Code",
        &[
            Rule::Required,
            Rule::MaxLen(10),
            Rule::Pattern {
                regex: r"^[A-Za-z0-9_-]+$",
                message: "may contain only letters, digits, '-' and '_'",
            },
        ],
    ),
    FieldSpec::new("description", "Description", &[Rule::MaxLen(200)]),
];

impl Record for MaterialType {
    const KIND: &'static str = "material type";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name", "code", "description"]
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "name" => Some(self.name.clone()),
            "code" => Some(self.code.clone()),
            "description" => Some(self.description.clone().unwrap_or_default()),
            _ => None,
        }
    }
}

impl Editable for MaterialType {
    fn form_fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn from_draft(draft: &Draft, base: Option<&Self>) -> AppResult<Self> {
        Ok(Self {
            id: base.map(|b| b.id).unwrap_or_default(),
            name: text(draft, "name"),
            code: text(draft, "code"),
            description: opt_text(draft, "description"),
        })
    }
}
