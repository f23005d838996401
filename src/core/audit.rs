//! In-memory operation log of the current session.

use ansi_term::Colour;
use chrono::{DateTime, Local};

#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub at: DateTime<Local>,
    pub operation: String,
    pub target: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

/// Colour used for an operation in the printed log.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" | "update" => Colour::Yellow,
        "seed" => Colour::Blue,
        "wizard" => Colour::Purple,
        "export" => Colour::RGB(255, 153, 51),
        other if other.starts_with("column") => Colour::Cyan,
        _ => Colour::White,
    }
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, operation: &str, target: &str, message: impl Into<String>) {
        self.entries.push(AuditEntry {
            at: Local::now(),
            operation: operation.to_string(),
            target: target.to_string(),
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One line per entry: `#n  time  op (target)  message`.
    pub fn render(&self) -> String {
        let width = self
            .entries
            .iter()
            .map(|e| op_target(e).chars().count())
            .max()
            .unwrap_or(0)
            .min(40);

        let mut out = String::new();
        for (i, e) in self.entries.iter().enumerate() {
            let label = format!("{:<width$}", op_target(e), width = width);
            out.push_str(&format!(
                "{:>3}  {}  {}  {}\n",
                i + 1,
                e.at.format("%FT%T%:z"),
                color_for_operation(&e.operation).paint(label),
                e.message
            ));
        }
        out
    }
}

fn op_target(e: &AuditEntry) -> String {
    if e.target.is_empty() {
        e.operation.clone()
    } else {
        format!("{} ({})", e.operation, e.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_entries_in_order() {
        let mut log = AuditLog::new();
        assert!(log.is_empty());
        log.record("add", "materials", "Added material #1");
        log.record("del", "materials", "Deleted material #1");
        let ops: Vec<_> = log.entries().iter().map(|e| e.operation.as_str()).collect();
        assert_eq!(ops, ["add", "del"]);
    }

    #[test]
    fn render_includes_target_and_message() {
        let mut log = AuditLog::new();
        log.record("seed", "", "Loaded 3 records");
        log.record("edit", "budget-types", "Updated budget type #2");
        let out = log.render();
        assert!(out.contains("seed"));
        assert!(out.contains("edit (budget-types)"));
        assert!(out.contains("Updated budget type #2"));
        assert_eq!(out.lines().count(), 2);
    }
}
