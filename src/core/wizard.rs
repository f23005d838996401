//! Five-step course wizard.
//!
//! `details → description → curriculum → faqs → preview`. Moving forward
//! validates the current step; moving back never does. Going back from the
//! first step leaves the wizard and discards the draft.

use crate::core::list::{ListController, Submitted};
use crate::core::repository::Repository;
use crate::core::validation::{FieldErrors, trim_draft, validate};
use crate::errors::{AppError, AppResult};
use crate::models::course::{
    Course, CourseLevel, CurriculumSection, DESCRIPTION_FIELDS, DETAIL_FIELDS, Faq,
};
use crate::models::record::{Draft, Editable, RecordId};
use clap::ValueEnum;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Details,
    Description,
    Curriculum,
    Faqs,
    Preview,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Details,
        WizardStep::Description,
        WizardStep::Curriculum,
        WizardStep::Faqs,
        WizardStep::Preview,
    ];

    pub fn next(self) -> Option<Self> {
        match self {
            WizardStep::Details => Some(WizardStep::Description),
            WizardStep::Description => Some(WizardStep::Curriculum),
            WizardStep::Curriculum => Some(WizardStep::Faqs),
            WizardStep::Faqs => Some(WizardStep::Preview),
            WizardStep::Preview => None,
        }
    }

    pub fn prev(self) -> Option<Self> {
        match self {
            WizardStep::Details => None,
            WizardStep::Description => Some(WizardStep::Details),
            WizardStep::Curriculum => Some(WizardStep::Description),
            WizardStep::Faqs => Some(WizardStep::Curriculum),
            WizardStep::Preview => Some(WizardStep::Faqs),
        }
    }

    /// 1-based position, for "step 2/5" displays.
    pub fn number(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0) + 1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WizardStep::Details => "details",
            WizardStep::Description => "description",
            WizardStep::Curriculum => "curriculum",
            WizardStep::Faqs => "faqs",
            WizardStep::Preview => "preview",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dynamically sized list fields of the course draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WizardList {
    Highlights,
    Curriculum,
    Faqs,
}

/// Result of [`CourseWizard::back`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    Moved(WizardStep),
    Exited,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseDraft {
    pub fields: Draft,
    pub highlights: Vec<String>,
    pub curriculum: Vec<CurriculumSection>,
    pub faqs: Vec<Faq>,
}

#[derive(Debug, Clone)]
pub struct CourseWizard {
    step: WizardStep,
    editing: Option<RecordId>,
    draft: CourseDraft,
    errors: FieldErrors,
}

impl Default for CourseWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseWizard {
    pub fn new() -> Self {
        let fields = scalar_specs()
            .map(|f| (f.name.to_string(), String::new()))
            .collect();
        Self {
            step: WizardStep::Details,
            editing: None,
            draft: CourseDraft {
                fields,
                ..CourseDraft::default()
            },
            errors: FieldErrors::new(),
        }
    }

    /// Wizard pre-filled from an existing course; finishing replaces it.
    pub fn for_course(course: &Course) -> Self {
        Self {
            step: WizardStep::Details,
            editing: Some(course.id),
            draft: CourseDraft {
                fields: course.to_draft(),
                highlights: course.highlights.clone(),
                curriculum: course.curriculum.clone(),
                faqs: course.faqs.clone(),
            },
            errors: FieldErrors::new(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn editing(&self) -> Option<RecordId> {
        self.editing
    }

    pub fn draft(&self) -> &CourseDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    // ------------------------------------------------
    // Draft editing
    // ------------------------------------------------

    pub fn set_field(&mut self, field: &str, value: &str) -> AppResult<()> {
        if !scalar_specs().any(|f| f.name == field) {
            return Err(AppError::UnknownField {
                kind: "course",
                field: field.to_string(),
            });
        }
        self.draft
            .fields
            .insert(field.to_string(), value.to_string());
        self.errors.remove(field);
        Ok(())
    }

    pub fn push_highlight(&mut self, text: &str) {
        self.draft.highlights.push(text.to_string());
        self.errors.remove("highlights");
    }

    pub fn push_section(&mut self, title: &str, summary: &str) {
        self.draft.curriculum.push(CurriculumSection {
            title: title.to_string(),
            summary: summary.to_string(),
        });
        self.errors.remove("curriculum");
    }

    pub fn push_faq(&mut self, question: &str, answer: &str) {
        self.draft.faqs.push(Faq {
            question: question.to_string(),
            answer: answer.to_string(),
        });
    }

    /// Remove the entry at `index` (0-based) from one of the list fields.
    pub fn remove_item(&mut self, list: WizardList, index: usize) -> AppResult<()> {
        let len = match list {
            WizardList::Highlights => self.draft.highlights.len(),
            WizardList::Curriculum => self.draft.curriculum.len(),
            WizardList::Faqs => self.draft.faqs.len(),
        };
        if index >= len {
            return Err(AppError::Wizard(format!(
                "no entry {index} in {} ({len} entries)",
                list_name(list)
            )));
        }
        match list {
            WizardList::Highlights => {
                self.draft.highlights.remove(index);
            }
            WizardList::Curriculum => {
                self.draft.curriculum.remove(index);
            }
            WizardList::Faqs => {
                self.draft.faqs.remove(index);
            }
        }
        // indexed error keys no longer line up
        self.errors.clear();
        Ok(())
    }

    // ------------------------------------------------
    // Transitions
    // ------------------------------------------------

    pub fn validate_step(&self, step: WizardStep) -> Result<(), FieldErrors> {
        let fields = trim_draft(&self.draft.fields);
        let mut errors = FieldErrors::new();

        match step {
            WizardStep::Details => validate(DETAIL_FIELDS, &fields)?,
            WizardStep::Description => {
                if let Err(e) = validate(DESCRIPTION_FIELDS, &fields) {
                    errors = e;
                }
                if self.draft.highlights.is_empty() {
                    errors.insert("highlights", "Add at least one highlight");
                }
                for (i, h) in self.draft.highlights.iter().enumerate() {
                    if h.trim().is_empty() {
                        errors.insert(format!("highlights[{i}]"), "Highlight is required");
                    }
                }
            }
            WizardStep::Curriculum => {
                if self.draft.curriculum.is_empty() {
                    errors.insert("curriculum", "Add at least one section");
                }
                for (i, s) in self.draft.curriculum.iter().enumerate() {
                    if s.title.trim().is_empty() {
                        errors.insert(format!("curriculum[{i}].title"), "Section title is required");
                    }
                }
            }
            WizardStep::Faqs => {
                for (i, faq) in self.draft.faqs.iter().enumerate() {
                    if faq.question.trim().is_empty() {
                        errors.insert(format!("faqs[{i}].question"), "Question is required");
                    }
                    if faq.answer.trim().is_empty() {
                        errors.insert(format!("faqs[{i}].answer"), "Answer is required");
                    }
                }
            }
            WizardStep::Preview => {}
        }

        errors.into_result()
    }

    /// Validate the current step and move forward.
    pub fn next(&mut self) -> AppResult<WizardStep> {
        let Some(next) = self.step.next() else {
            return Err(AppError::Wizard(
                "already at the preview step: use `wizard finish`".into(),
            ));
        };
        if let Err(errors) = self.validate_step(self.step) {
            self.errors = errors.clone();
            return Err(AppError::Validation(errors));
        }
        self.errors.clear();
        self.step = next;
        Ok(next)
    }

    pub fn back(&mut self) -> BackOutcome {
        match self.step.prev() {
            Some(prev) => {
                self.step = prev;
                BackOutcome::Moved(prev)
            }
            None => BackOutcome::Exited,
        }
    }

    /// Assemble the course from the draft, after checking every step.
    pub fn build(&self) -> AppResult<Course> {
        let mut errors = FieldErrors::new();
        for step in WizardStep::ALL {
            if let Err(e) = self.validate_step(step) {
                for (k, v) in e.iter() {
                    errors.insert(k, v);
                }
            }
        }
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let fields = trim_draft(&self.draft.fields);
        let base = Course {
            id: self.editing.unwrap_or_default(),
            title: String::new(),
            category: String::new(),
            level: CourseLevel::Beginner,
            duration_hours: 0,
            summary: String::new(),
            description: String::new(),
            highlights: trim_all(&self.draft.highlights),
            curriculum: self
                .draft
                .curriculum
                .iter()
                .map(|s| CurriculumSection {
                    title: s.title.trim().to_string(),
                    summary: s.summary.trim().to_string(),
                })
                .collect(),
            faqs: self
                .draft
                .faqs
                .iter()
                .map(|f| Faq {
                    question: f.question.trim().to_string(),
                    answer: f.answer.trim().to_string(),
                })
                .collect(),
        };
        Course::from_draft(&fields, Some(&base))
    }

    /// Terminal action of the preview step: append a new course or replace
    /// the edited one.
    pub fn finish<S: Repository<Course>>(
        &mut self,
        courses: &mut ListController<Course, S>,
    ) -> AppResult<Submitted> {
        if self.step != WizardStep::Preview {
            return Err(AppError::Wizard(format!(
                "finish is only available on the preview step (current: {})",
                self.step
            )));
        }
        let course = match self.build() {
            Ok(c) => c,
            Err(AppError::Validation(errors)) => {
                self.errors = errors.clone();
                return Err(AppError::Validation(errors));
            }
            Err(e) => return Err(e),
        };

        match self.editing {
            Some(id) => {
                courses.replace(course)?;
                Ok(Submitted::Updated(id))
            }
            None => Ok(Submitted::Added(courses.insert(course)?)),
        }
    }
}

fn scalar_specs() -> impl Iterator<Item = &'static crate::core::validation::FieldSpec> {
    DETAIL_FIELDS.iter().chain(DESCRIPTION_FIELDS.iter())
}

fn trim_all(items: &[String]) -> Vec<String> {
    items.iter().map(|s| s.trim().to_string()).collect()
}

fn list_name(list: WizardList) -> &'static str {
    match list {
        WizardList::Highlights => "highlights",
        WizardList::Curriculum => "curriculum",
        WizardList::Faqs => "faqs",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::repository::VecStore;

    fn filled() -> CourseWizard {
        let mut w = CourseWizard::new();
        w.set_field("title", " Rust for admins ").unwrap();
        w.set_field("category", "Programming").unwrap();
        w.set_field("level", "beginner").unwrap();
        w.set_field("duration_hours", "12").unwrap();
        w.set_field("summary", "Ownership without tears").unwrap();
        w.set_field("description", "A practical tour of the language for tool builders.")
            .unwrap();
        w.push_highlight("Hands-on labs");
        w.push_section("Basics", "syntax and cargo");
        w.push_faq("Prerequisites?", "None.");
        w
    }

    fn walk_to_preview(w: &mut CourseWizard) {
        while w.step() != WizardStep::Preview {
            w.next().unwrap();
        }
    }

    #[test]
    fn steps_follow_fixed_linear_order() {
        let mut w = filled();
        let mut seen = vec![w.step()];
        while let Ok(s) = w.next() {
            seen.push(s);
        }
        assert_eq!(seen, WizardStep::ALL);
        assert_eq!(w.step().number(), 5);
    }

    #[test]
    fn forward_is_gated_by_step_validation() {
        let mut w = CourseWizard::new();
        w.set_field("title", "Rust").unwrap();
        let err = w.next().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(w.step(), WizardStep::Details);
        assert_eq!(w.errors().get("category"), Some("Category is required"));
        w.set_field("category", "Programming").unwrap();
        assert!(w.errors().get("category").is_none());
    }

    #[test]
    fn description_step_requires_a_highlight() {
        let mut w = filled();
        w.remove_item(WizardList::Highlights, 0).unwrap();
        w.next().unwrap();
        let err = w.next().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(w.errors().get("highlights"), Some("Add at least one highlight"));
    }

    #[test]
    fn blank_faq_answer_blocks_the_faq_step() {
        let mut w = filled();
        w.push_faq("Certificate?", "  ");
        w.next().unwrap();
        w.next().unwrap();
        w.next().unwrap();
        assert_eq!(w.step(), WizardStep::Faqs);
        assert!(w.next().is_err());
        assert_eq!(w.errors().get("faqs[1].answer"), Some("Answer is required"));
    }

    #[test]
    fn back_from_first_step_exits() {
        let mut w = filled();
        w.next().unwrap();
        assert_eq!(w.back(), BackOutcome::Moved(WizardStep::Details));
        assert_eq!(w.back(), BackOutcome::Exited);
    }

    #[test]
    fn finish_appends_a_trimmed_course() {
        let mut courses: ListController<Course> = ListController::new(VecStore::new(), 10);
        let mut w = filled();
        assert!(w.finish(&mut courses).is_err());
        walk_to_preview(&mut w);
        let outcome = w.finish(&mut courses).unwrap();
        assert_eq!(outcome, Submitted::Added(1));
        let course = courses.get(1).unwrap();
        assert_eq!(course.title, "Rust for admins");
        assert_eq!(course.level, CourseLevel::Beginner);
        assert_eq!(course.highlights, ["Hands-on labs"]);
        assert_eq!(course.faqs.len(), 1);
    }

    #[test]
    fn editing_replaces_the_existing_course() {
        let mut courses: ListController<Course> = ListController::new(VecStore::new(), 10);
        let mut w = filled();
        walk_to_preview(&mut w);
        w.finish(&mut courses).unwrap();
        let original = courses.get(1).unwrap();

        let mut w = CourseWizard::for_course(&original);
        w.set_field("level", "advanced").unwrap();
        w.push_section("Async", "");
        walk_to_preview(&mut w);
        assert_eq!(w.finish(&mut courses).unwrap(), Submitted::Updated(1));

        assert_eq!(courses.len(), 1);
        let updated = courses.get(1).unwrap();
        assert_eq!(updated.level, CourseLevel::Advanced);
        assert_eq!(updated.curriculum.len(), 2);
    }

    #[test]
    fn remove_out_of_range_is_an_error() {
        let mut w = CourseWizard::new();
        assert!(matches!(
            w.remove_item(WizardList::Faqs, 0),
            Err(AppError::Wizard(_))
        ));
    }
}
