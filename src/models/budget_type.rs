use crate::core::validation::{FieldSpec, Rule};
use crate::errors::AppResult;
use crate::models::record::{Draft, Editable, Record, RecordId, text};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetType {
    pub id: RecordId,
    pub budget_type: String,
}

impl BudgetType {
    pub fn new(id: RecordId, budget_type: impl Into<String>) -> Self {
        Self {
            id,
            budget_type: budget_type.into(),
        }
    }
}

const FIELDS: &[FieldSpec] = &[FieldSpec::new(
    "budget_type",
    "Budget type",
    &[
        Rule::Required,
        Rule::MinLen(3),
        Rule::MaxLen(50),
        Rule::Pattern {
            regex: r"^[A-Za-z ]+$",
            message: "may contain only letters and spaces",
        },
    ],
)];

impl Record for BudgetType {
    const KIND: &'static str = "budget type";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn columns() -> &'static [&'static str] {
        &["id", "budget_type"]
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "budget_type" => Some(self.budget_type.clone()),
            _ => None,
        }
    }
}

impl Editable for BudgetType {
    fn form_fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn from_draft(draft: &Draft, base: Option<&Self>) -> AppResult<Self> {
        Ok(Self {
            id: base.map(|b| b.id).unwrap_or_default(),
            budget_type: text(draft, "budget_type"),
        })
    }
}
