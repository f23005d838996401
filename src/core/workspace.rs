//! Composition root of a session: one list controller per screen, the
//! shared facility store, the course wizard and the audit log.

use crate::config::Config;
use crate::core::audit::AuditLog;
use crate::core::columns::FieldListEditor;
use crate::core::facility_store::{FacilityRepository, FacilityStore, SharedFacilities};
use crate::core::filter::FilterSet;
use crate::core::form::EntityForm;
use crate::core::list::{ListController, Submitted};
use crate::core::repository::{Repository, VecStore};
use crate::core::seed::SeedData;
use crate::core::wizard::{BackOutcome, CourseWizard, WizardStep};
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, export_records};
use crate::models::facility::FacilityPatch;
use crate::models::record::{Editable, RecordId};
use crate::models::{BudgetType, Course, Facility, Material, MaterialType, Screen};
use crate::ui::render::{render_form, render_page};
use std::path::Path;

/// Type-erased view of one list screen, used by the shell and the CLI.
pub trait ScreenView {
    fn kind(&self) -> &'static str;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn render_list(&self, title: &str, cfg: &Config) -> String;
    /// Open form with its inline errors, if any.
    fn render_form(&self) -> Option<String>;

    fn filters(&self) -> &FilterSet;
    fn set_filter(&mut self, field: &str, value: &str) -> AppResult<()>;
    fn clear_filters(&mut self);
    fn set_page(&mut self, page: usize) -> usize;
    fn next_page(&mut self) -> usize;
    fn prev_page(&mut self) -> usize;

    fn open_add(&mut self) -> AppResult<()>;
    fn open_edit(&mut self, id: RecordId) -> AppResult<()>;
    fn set_field(&mut self, field: &str, value: &str) -> AppResult<()>;
    fn submit(&mut self) -> AppResult<Submitted>;
    fn cancel(&mut self) -> bool;
    fn is_modal_open(&self) -> bool;
    fn delete(&mut self, id: RecordId) -> AppResult<()>;

    fn columns(&self) -> &FieldListEditor;
    fn columns_mut(&mut self) -> &mut FieldListEditor;

    /// Export the filtered records. Returns how many were written.
    fn export(&self, format: ExportFormat, path: &Path) -> AppResult<usize>;

    /// Validate a draft with the add form rules, without storing anything.
    fn check_draft(&self, pairs: &[(String, String)]) -> AppResult<()>;
}

impl<R: Editable, S: Repository<R>> ScreenView for ListController<R, S> {
    fn kind(&self) -> &'static str {
        R::KIND
    }

    fn len(&self) -> usize {
        ListController::len(self)
    }

    fn render_list(&self, title: &str, cfg: &Config) -> String {
        render_page(
            title,
            &self.current_page(),
            ListController::columns(self),
            ListController::filters(self),
            self.backdrop_blurred(),
            cfg,
        )
    }

    fn render_form(&self) -> Option<String> {
        self.form().map(render_form)
    }

    fn filters(&self) -> &FilterSet {
        ListController::filters(self)
    }

    fn set_filter(&mut self, field: &str, value: &str) -> AppResult<()> {
        ListController::set_filter(self, field, value)
    }

    fn clear_filters(&mut self) {
        ListController::clear_filters(self)
    }

    fn set_page(&mut self, page: usize) -> usize {
        ListController::set_page(self, page)
    }

    fn next_page(&mut self) -> usize {
        ListController::next_page(self)
    }

    fn prev_page(&mut self) -> usize {
        ListController::prev_page(self)
    }

    fn open_add(&mut self) -> AppResult<()> {
        ListController::open_add(self)
    }

    fn open_edit(&mut self, id: RecordId) -> AppResult<()> {
        ListController::open_edit(self, id)
    }

    fn set_field(&mut self, field: &str, value: &str) -> AppResult<()> {
        ListController::set_field(self, field, value)
    }

    fn submit(&mut self) -> AppResult<Submitted> {
        ListController::submit(self)
    }

    fn cancel(&mut self) -> bool {
        ListController::cancel(self)
    }

    fn is_modal_open(&self) -> bool {
        ListController::is_modal_open(self)
    }

    fn delete(&mut self, id: RecordId) -> AppResult<()> {
        ListController::delete(self, id).map(|_| ())
    }

    fn columns(&self) -> &FieldListEditor {
        ListController::columns(self)
    }

    fn columns_mut(&mut self) -> &mut FieldListEditor {
        ListController::columns_mut(self)
    }

    fn export(&self, format: ExportFormat, path: &Path) -> AppResult<usize> {
        export_records(&self.filtered(), format, path)
    }

    fn check_draft(&self, pairs: &[(String, String)]) -> AppResult<()> {
        let mut form = EntityForm::<R>::for_add();
        for (field, value) in pairs {
            form.set_field(field, value)?;
        }
        form.submit().map(|_| ())
    }
}

/// Column editor operations, as issued by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnEdit {
    Add(String),
    Rename { id: String, label: String },
    Toggle(String),
    Remove(String),
}

pub struct Workspace {
    active: Screen,
    budget_types: ListController<BudgetType>,
    material_types: ListController<MaterialType>,
    materials: ListController<Material>,
    facilities: ListController<Facility, SharedFacilities>,
    courses: ListController<Course>,
    /// Handle of the slot-booking page on the facility store.
    booking: SharedFacilities,
    wizard: Option<CourseWizard>,
    audit: AuditLog,
}

impl Workspace {
    /// Build every screen from seeded records.
    ///
    /// Fails with `AppError::Seed` when a list repeats an id or its largest
    /// id leaves no room for new records.
    pub fn from_seed(cfg: &Config, seed: SeedData) -> AppResult<Self> {
        let total = seed.total();
        let shared = SharedFacilities::new(FacilityStore::with_facilities(seed.facilities)?);

        let mut ws = Self {
            active: Screen::BudgetTypes,
            budget_types: ListController::new(
                VecStore::with_records(seed.budget_types)?,
                cfg.page_size_for(Screen::BudgetTypes),
            ),
            material_types: ListController::new(
                VecStore::with_records(seed.material_types)?,
                cfg.page_size_for(Screen::MaterialTypes),
            ),
            materials: ListController::new(
                VecStore::with_records(seed.materials)?,
                cfg.page_size_for(Screen::Materials),
            ),
            facilities: ListController::new(shared.clone(), cfg.page_size_for(Screen::Facilities)),
            courses: ListController::new(
                VecStore::with_records(seed.courses)?,
                cfg.page_size_for(Screen::Courses),
            ),
            booking: shared,
            wizard: None,
            audit: AuditLog::new(),
        };
        if total > 0 {
            ws.audit
                .record("seed", "workspace", format!("{total} record(s) loaded"));
        }
        Ok(ws)
    }

    // ------------------------------------------------
    // Screens
    // ------------------------------------------------

    pub fn active(&self) -> Screen {
        self.active
    }

    pub fn set_active(&mut self, screen: Screen) {
        self.active = screen;
    }

    pub fn screen(&self, screen: Screen) -> &dyn ScreenView {
        match screen {
            Screen::BudgetTypes => &self.budget_types,
            Screen::MaterialTypes => &self.material_types,
            Screen::Materials => &self.materials,
            Screen::Facilities => &self.facilities,
            Screen::Courses => &self.courses,
        }
    }

    pub fn screen_mut(&mut self, screen: Screen) -> &mut dyn ScreenView {
        match screen {
            Screen::BudgetTypes => &mut self.budget_types,
            Screen::MaterialTypes => &mut self.material_types,
            Screen::Materials => &mut self.materials,
            Screen::Facilities => &mut self.facilities,
            Screen::Courses => &mut self.courses,
        }
    }

    pub fn current(&self) -> &dyn ScreenView {
        self.screen(self.active)
    }

    pub fn current_mut(&mut self) -> &mut dyn ScreenView {
        self.screen_mut(self.active)
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    // ------------------------------------------------
    // Audited mutations on the active screen
    // ------------------------------------------------

    pub fn submit(&mut self) -> AppResult<Submitted> {
        let screen = self.active;
        let outcome = self.screen_mut(screen).submit()?;
        let kind = self.screen(screen).kind();
        match outcome {
            Submitted::Added(id) => self.audit.record("add", kind, format!("#{id} added")),
            Submitted::Updated(id) => self.audit.record("edit", kind, format!("#{id} updated")),
        }
        Ok(outcome)
    }

    pub fn delete(&mut self, id: RecordId) -> AppResult<()> {
        let screen = self.active;
        self.screen_mut(screen).delete(id)?;
        let kind = self.screen(screen).kind();
        self.audit.record("del", kind, format!("#{id} deleted"));
        Ok(())
    }

    pub fn edit_columns(&mut self, edit: ColumnEdit) -> AppResult<String> {
        let screen = self.active;
        let cols = self.screen_mut(screen).columns_mut();
        let (op, message) = match &edit {
            ColumnEdit::Add(label) => {
                let id = cols.append(label)?;
                ("column-add", format!("{id} \"{}\"", label.trim()))
            }
            ColumnEdit::Rename { id, label } => {
                cols.rename(id, label)?;
                ("column-rename", format!("{id} → \"{}\"", label.trim()))
            }
            ColumnEdit::Toggle(id) => {
                let on = cols.toggle(id)?;
                (
                    "column-toggle",
                    format!("{id} {}", if on { "shown" } else { "hidden" }),
                )
            }
            ColumnEdit::Remove(id) => {
                cols.remove(id)?;
                ("column-remove", id.clone())
            }
        };
        self.audit.record(op, screen.as_str(), message.clone());
        Ok(message)
    }

    pub fn export(&mut self, format: ExportFormat, path: &Path) -> AppResult<usize> {
        let screen = self.active;
        let count = self.screen(screen).export(format, path)?;
        self.audit.record(
            "export",
            screen.as_str(),
            format!("{count} record(s) → {}", path.display()),
        );
        Ok(count)
    }

    // ------------------------------------------------
    // Slot booking (shared facility store)
    // ------------------------------------------------

    pub fn facility(&self, id: RecordId) -> AppResult<Facility> {
        self.booking.facility_by_id(id).ok_or(AppError::NotFound {
            kind: "facility",
            id,
        })
    }

    pub fn update_slot(&mut self, id: RecordId, field: &str, value: &str) -> AppResult<Facility> {
        let patch = FacilityPatch::from_field(field, value)?;
        let updated = self.booking.update_facility(id, &patch)?;
        self.audit
            .record("update", "facility", format!("#{id} {field} = {}", value.trim()));
        Ok(updated)
    }

    // ------------------------------------------------
    // Course wizard
    // ------------------------------------------------

    pub fn wizard(&self) -> Option<&CourseWizard> {
        self.wizard.as_ref()
    }

    pub fn wizard_mut(&mut self) -> AppResult<&mut CourseWizard> {
        self.wizard.as_mut().ok_or(AppError::NoWizard)
    }

    pub fn start_wizard(&mut self) -> &CourseWizard {
        self.wizard.insert(CourseWizard::new())
    }

    pub fn edit_in_wizard(&mut self, id: RecordId) -> AppResult<&CourseWizard> {
        let course = self.courses.get(id).ok_or(AppError::NotFound {
            kind: "course",
            id,
        })?;
        Ok(self.wizard.insert(CourseWizard::for_course(&course)))
    }

    pub fn wizard_next(&mut self) -> AppResult<WizardStep> {
        self.wizard_mut()?.next()
    }

    /// Step back; leaving the first step discards the wizard.
    pub fn wizard_back(&mut self) -> AppResult<BackOutcome> {
        let outcome = self.wizard_mut()?.back();
        if outcome == BackOutcome::Exited {
            self.wizard = None;
        }
        Ok(outcome)
    }

    pub fn finish_wizard(&mut self) -> AppResult<Submitted> {
        let wizard = self.wizard.as_mut().ok_or(AppError::NoWizard)?;
        let outcome = wizard.finish(&mut self.courses)?;
        self.wizard = None;
        let verb = match outcome {
            Submitted::Added(_) => "created",
            Submitted::Updated(_) => "updated",
        };
        self.audit
            .record("wizard", "course", format!("#{} {verb}", outcome.id()));
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::facility::tests::sample;

    fn workspace() -> Workspace {
        let seed = SeedData {
            budget_types: vec![BudgetType::new(1, "Capex"), BudgetType::new(2, "Opex")],
            facilities: vec![Facility {
                id: 1,
                ..sample("Court A")
            }],
            ..SeedData::default()
        };
        Workspace::from_seed(&Config::default(), seed).unwrap()
    }

    #[test]
    fn seed_with_unusable_ids_is_refused() {
        let top = SeedData {
            budget_types: vec![BudgetType::new(RecordId::MAX, "Capex")],
            ..SeedData::default()
        };
        assert!(matches!(
            Workspace::from_seed(&Config::default(), top),
            Err(AppError::Seed(_))
        ));

        let twins = SeedData {
            budget_types: vec![BudgetType::new(1, "Capex"), BudgetType::new(1, "Opex")],
            ..SeedData::default()
        };
        assert!(matches!(
            Workspace::from_seed(&Config::default(), twins),
            Err(AppError::Seed(_))
        ));
    }

    #[test]
    fn seed_load_is_audited() {
        let ws = workspace();
        assert_eq!(ws.screen(Screen::BudgetTypes).len(), 2);
        assert_eq!(ws.audit().entries()[0].operation, "seed");
    }

    #[test]
    fn add_through_active_screen() {
        let mut ws = workspace();
        ws.current_mut().open_add().unwrap();
        ws.current_mut().set_field("budget_type", "Grant").unwrap();
        let outcome = ws.submit().unwrap();

        assert_eq!(outcome, Submitted::Added(3));
        assert_eq!(ws.current().len(), 3);
        assert!(!ws.current().is_modal_open());
        assert_eq!(ws.audit().entries().last().unwrap().operation, "add");
    }

    #[test]
    fn failed_submit_is_not_audited() {
        let mut ws = workspace();
        ws.current_mut().open_add().unwrap();
        ws.current_mut().set_field("budget_type", "Ca").unwrap();
        assert!(matches!(ws.submit(), Err(AppError::Validation(_))));
        assert_eq!(ws.audit().entries().len(), 1);
        assert!(ws.current().render_form().unwrap().contains("at least 3"));
    }

    #[test]
    fn slot_update_is_visible_on_the_facility_list() {
        let mut ws = workspace();
        ws.update_slot(1, "capacity", "12").unwrap();
        assert_eq!(ws.facilities.get(1).unwrap().capacity, 12);

        ws.set_active(Screen::Facilities);
        ws.current_mut().open_edit(1).unwrap();
        ws.current_mut().set_field("name", "Court B").unwrap();
        ws.submit().unwrap();
        assert_eq!(ws.facility(1).unwrap().name, "Court B");
        assert_eq!(ws.facility(1).unwrap().capacity, 12);
    }

    #[test]
    fn slot_update_rejects_invalid_values() {
        let mut ws = workspace();
        assert!(ws.update_slot(1, "capacity", "lots").is_err());
        assert!(matches!(
            ws.update_slot(9, "capacity", "3"),
            Err(AppError::NotFound { .. })
        ));
        assert_eq!(ws.facility(1).unwrap().capacity, 8);
    }

    #[test]
    fn column_edits_are_scoped_to_the_active_screen() {
        let mut ws = workspace();
        let msg = ws.edit_columns(ColumnEdit::Add("Owner".into())).unwrap();
        assert!(msg.starts_with("custom-1"));
        assert!(ws.screen(Screen::BudgetTypes).columns().get("custom-1").is_some());
        assert!(ws.screen(Screen::Materials).columns().get("custom-1").is_none());
        assert!(matches!(
            ws.edit_columns(ColumnEdit::Toggle("nope".into())),
            Err(AppError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn wizard_requires_start() {
        let mut ws = workspace();
        assert!(matches!(ws.wizard_next(), Err(AppError::NoWizard)));
        ws.start_wizard();
        assert_eq!(ws.wizard_back().unwrap(), BackOutcome::Exited);
        assert!(ws.wizard().is_none());
    }

    #[test]
    fn check_draft_does_not_store() {
        let ws = workspace();
        let view = ws.screen(Screen::BudgetTypes);
        assert!(
            view.check_draft(&[("budget_type".into(), "Travel".into())])
                .is_ok()
        );
        assert!(
            view.check_draft(&[("budget_type".into(), "Ca".into())])
                .is_err()
        );
        assert_eq!(view.len(), 2);
    }
}
