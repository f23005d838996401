//! Text rendering of list pages, forms and the wizard.

use crate::config::Config;
use crate::core::columns::FieldListEditor;
use crate::core::filter::FilterSet;
use crate::core::form::{EntityForm, FormMode};
use crate::core::paginate::Page;
use crate::core::validation::FieldErrors;
use crate::core::wizard::{CourseWizard, WizardStep};
use crate::models::Facility;
use crate::models::record::{Editable, Record};
use crate::utils::formatting::{bold, dim};
use crate::utils::table::Table;
use crate::utils::time::format_time;

/// Table of the current page, followed by the pagination footer.
pub fn render_page<R: Record>(
    title: &str,
    page: &Page<R>,
    columns: &FieldListEditor,
    filters: &FilterSet,
    blurred: bool,
    cfg: &Config,
) -> String {
    let mut out = String::new();
    out.push_str(&bold(title));
    if blurred {
        out.push_str(&dim("  [form open, background blurred]"));
    }
    out.push('\n');

    if !filters.is_empty() {
        let active: Vec<String> = filters.iter().map(|(k, v)| format!("{k}~\"{v}\"")).collect();
        out.push_str(&format!("Filters: {}\n", active.join(", ")));
    }

    let visible: Vec<_> = columns.visible().collect();
    if page.is_empty() {
        out.push_str("No data\n");
        return out;
    }

    let mut table = Table::new(visible.iter().map(|c| c.label.clone()), cfg.max_cell_width);
    for record in &page.items {
        let row = visible
            .iter()
            .map(|c| {
                if c.custom {
                    String::new()
                } else {
                    record.field(&c.id).unwrap_or_default()
                }
            })
            .collect();
        table.add_row(row);
    }
    out.push_str(&table.render(&cfg.separator_char));
    out.push_str(&format!(
        "Page {}/{} · {} item{}\n",
        page.page,
        page.total_pages,
        page.total_items,
        if page.total_items == 1 { "" } else { "s" }
    ));
    out
}

fn field_lines(
    out: &mut String,
    specs: &[crate::core::validation::FieldSpec],
    value: impl Fn(&str) -> String,
    errors: &FieldErrors,
) {
    for spec in specs {
        let marker = if spec.is_required() { "*" } else { " " };
        out.push_str(&format!(
            "  {}{} [{}]: {}\n",
            spec.label,
            marker,
            spec.name,
            value(spec.name)
        ));
        if let Some(err) = errors.get(spec.name) {
            out.push_str(&format!("      ! {err}\n"));
        }
    }
}

pub fn render_form<R: Editable>(form: &EntityForm<R>) -> String {
    let mut out = match form.mode() {
        FormMode::Add => format!("New {}\n", R::KIND),
        FormMode::Edit(id) => format!("Edit {} #{}\n", R::KIND, id),
    };
    field_lines(
        &mut out,
        R::form_fields(),
        |name| form.draft().get(name).cloned().unwrap_or_default(),
        form.errors(),
    );
    out
}

pub fn render_wizard(w: &CourseWizard) -> String {
    let step = w.step();
    let title = match w.editing() {
        Some(id) => format!("Edit course #{id}"),
        None => "New course".to_string(),
    };
    let mut out = format!(
        "{} · step {}/{}: {}\n",
        title,
        step.number(),
        WizardStep::ALL.len(),
        step
    );

    let draft = w.draft();
    let errors = w.errors();
    let show_all = step == WizardStep::Preview;
    let value = |name: &str| draft.fields.get(name).cloned().unwrap_or_default();

    if step == WizardStep::Details || show_all {
        field_lines(&mut out, crate::models::course::DETAIL_FIELDS, value, errors);
    }
    if step == WizardStep::Description || show_all {
        field_lines(&mut out, crate::models::course::DESCRIPTION_FIELDS, value, errors);
        out.push_str("  Highlights:\n");
        list_lines(&mut out, "highlights", draft.highlights.iter().cloned(), errors);
    }
    if step == WizardStep::Curriculum || show_all {
        out.push_str("  Curriculum:\n");
        list_lines(
            &mut out,
            "curriculum",
            draft.curriculum.iter().map(|s| {
                if s.summary.is_empty() {
                    s.title.clone()
                } else {
                    format!("{} ({})", s.title, s.summary)
                }
            }),
            errors,
        );
    }
    if step == WizardStep::Faqs || show_all {
        out.push_str("  FAQs:\n");
        list_lines(
            &mut out,
            "faqs",
            draft.faqs.iter().map(|f| format!("Q: {} / A: {}", f.question, f.answer)),
            errors,
        );
    }
    out
}

fn list_lines(
    out: &mut String,
    key: &str,
    items: impl Iterator<Item = String>,
    errors: &FieldErrors,
) {
    let mut empty = true;
    for (i, item) in items.enumerate() {
        empty = false;
        out.push_str(&format!("    [{i}] {item}\n"));
    }
    if empty {
        out.push_str("    (none)\n");
    }
    let prefix = format!("{key}[");
    for (k, msg) in errors.iter() {
        if k == key || k.starts_with(&prefix) {
            out.push_str(&format!("      ! {k}: {msg}\n"));
        }
    }
}

/// Slot-booking view of one facility.
pub fn render_slots(f: &Facility) -> String {
    let mut out = format!(
        "{} #{} · {} · {}\n",
        bold(&f.name),
        f.id,
        f.location,
        if f.active { "active" } else { "inactive" }
    );
    out.push_str(&format!(
        "Open {}–{}, {}-minute slots, capacity {}\n",
        format_time(&f.slot.opens),
        format_time(&f.slot.closes),
        f.slot.minutes,
        f.capacity
    ));
    out.push_str(&format!(
        "Fee {} per {} · payment {} · {}% advance\n",
        f.field("fee.amount").unwrap_or_default(),
        f.fee.unit.as_str(),
        f.payment.mode.as_str(),
        f.payment.advance_percent
    ));
    let starts = f.slot.slot_starts();
    if starts.is_empty() {
        out.push_str("No bookable slots\n");
    } else {
        let list: Vec<String> = starts.iter().map(format_time).collect();
        out.push_str(&format!("Slots ({}): {}\n", starts.len(), list.join(" ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::paginate::paginate;
    use crate::models::BudgetType;

    fn page(records: &[BudgetType]) -> Page<BudgetType> {
        paginate(records, 1, 5)
    }

    #[test]
    fn empty_page_shows_placeholder() {
        let out = render_page(
            "Budget types",
            &page(&[]),
            &FieldListEditor::for_record::<BudgetType>(),
            &FilterSet::new(),
            false,
            &Config::default(),
        );
        assert!(out.contains("No data"));
    }

    #[test]
    fn hidden_columns_are_not_rendered() {
        let mut cols = FieldListEditor::for_record::<BudgetType>();
        cols.toggle("id").unwrap();
        cols.append("Owner").unwrap();
        let out = render_page(
            "Budget types",
            &page(&[BudgetType::new(1, "Capex")]),
            &cols,
            &FilterSet::new(),
            true,
            &Config::default(),
        );
        assert!(out.contains("Budget type"));
        assert!(out.contains("Owner"));
        assert!(!out.lines().any(|l| l.starts_with("ID")));
        assert!(out.contains("background blurred"));
        assert!(out.contains("Page 1/1 · 1 item"));
    }

    #[test]
    fn form_shows_inline_errors() {
        let mut form = EntityForm::<BudgetType>::for_add();
        form.set_field("budget_type", "C4").unwrap();
        let _ = form.submit();
        let out = render_form(&form);
        assert!(out.starts_with("New budget type"));
        assert!(out.contains("! Budget type must be at least 3 characters"));
    }
}
