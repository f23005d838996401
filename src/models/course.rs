use crate::core::validation::{FieldSpec, Rule};
use crate::errors::{AppError, AppResult};
use crate::models::record::{
    Draft, Editable, Record, RecordId, default_label, parse_value, text,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub const CODES: &'static [&'static str] = &["beginner", "intermediate", "advanced"];

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Beginner => "beginner",
            CourseLevel::Intermediate => "intermediate",
            CourseLevel::Advanced => "advanced",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "beginner" => Some(CourseLevel::Beginner),
            "intermediate" => Some(CourseLevel::Intermediate),
            "advanced" => Some(CourseLevel::Advanced),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumSection {
    pub title: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// Skill-growth course, created through the course wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: RecordId,
    pub title: String,
    pub category: String,
    pub level: CourseLevel,
    pub duration_hours: u32,
    pub summary: String,
    pub description: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub curriculum: Vec<CurriculumSection>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
}

pub(crate) const DETAIL_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "title",
        "Title",
        &[Rule::Required, Rule::MinLen(3), Rule::MaxLen(100)],
    ),
    FieldSpec::new("category", "Category", &[Rule::Required, Rule::MaxLen(40)]),
    FieldSpec::new(
        "level",
        "Level",
        &[Rule::Required, Rule::OneOf(CourseLevel::CODES)],
    ),
    FieldSpec::new(
        "duration_hours",
        "Duration (hours)",
        &[
            Rule::Required,
            Rule::Unsigned,
            Rule::Range {
                min: 1.0,
                max: 1000.0,
            },
        ],
    ),
];

pub(crate) const DESCRIPTION_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("summary", "Summary", &[Rule::Required, Rule::MaxLen(160)]),
    FieldSpec::new(
        "description",
        "Description",
        &[Rule::Required, Rule::MinLen(20)],
    ),
];

const FORM_FIELDS: &[FieldSpec] = &[
    DETAIL_FIELDS[0],
    DETAIL_FIELDS[1],
    DETAIL_FIELDS[2],
    DETAIL_FIELDS[3],
    DESCRIPTION_FIELDS[0],
    DESCRIPTION_FIELDS[1],
];

impl Record for Course {
    const KIND: &'static str = "course";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "title",
            "category",
            "level",
            "duration_hours",
            "summary",
            "description",
            "highlights",
            "sections",
            "faqs",
        ]
    }

    fn hidden_columns() -> &'static [&'static str] {
        &["description"]
    }

    fn field(&self, name: &str) -> Option<String> {
        let v = match name {
            "id" => self.id.to_string(),
            "title" => self.title.clone(),
            "category" => self.category.clone(),
            "level" => self.level.as_str().to_string(),
            "duration_hours" => self.duration_hours.to_string(),
            "summary" => self.summary.clone(),
            "description" => self.description.clone(),
            "highlights" => self.highlights.len().to_string(),
            "sections" => self.curriculum.len().to_string(),
            "faqs" => self.faqs.len().to_string(),
            _ => return None,
        };
        Some(v)
    }

    fn label(name: &str) -> String {
        match name {
            "duration_hours" => "Hours".into(),
            "faqs" => "FAQs".into(),
            other => default_label(other),
        }
    }
}

/// The plain form only covers the scalar fields; list fields are edited in
/// the wizard and carried over from the edited course.
impl Editable for Course {
    fn form_fields() -> &'static [FieldSpec] {
        FORM_FIELDS
    }

    fn from_draft(draft: &Draft, base: Option<&Self>) -> AppResult<Self> {
        let raw_level = text(draft, "level");
        let level = CourseLevel::from_code(&raw_level).ok_or(AppError::InvalidField {
            field: "level".into(),
            value: raw_level,
        })?;

        Ok(Self {
            id: base.map(|b| b.id).unwrap_or_default(),
            title: text(draft, "title"),
            category: text(draft, "category"),
            level,
            duration_hours: parse_value(draft, "duration_hours")?,
            summary: text(draft, "summary"),
            description: text(draft, "description"),
            highlights: base.map(|b| b.highlights.clone()).unwrap_or_default(),
            curriculum: base.map(|b| b.curriculum.clone()).unwrap_or_default(),
            faqs: base.map(|b| b.faqs.clone()).unwrap_or_default(),
        })
    }

    fn supports_quick_add() -> bool {
        false
    }
}
