//! Table rendering utilities for CLI outputs.

use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    max_width: usize,
}

impl Table {
    /// Columns start as wide as their header; cells wider than `max_width`
    /// wrap onto extra lines.
    pub fn new<I, S>(headers: I, max_width: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = headers
            .into_iter()
            .map(|h| {
                let header = h.into();
                let width = UnicodeWidthStr::width(header.as_str());
                Column { header, width }
            })
            .collect();
        Self {
            columns,
            rows: Vec::new(),
            max_width: max_width.max(4),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        for (col, cell) in self.columns.iter_mut().zip(row.iter()) {
            let w = UnicodeWidthStr::width(cell.as_str()).min(self.max_width);
            col.width = col.width.max(w);
        }
        self.rows.push(row);
    }

    pub fn render(&self, separator: &str) -> String {
        let mut out = String::new();

        // Header
        let header: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        out.push_str(&self.render_line(&header));

        let total: usize =
            self.columns.iter().map(|c| c.width).sum::<usize>() + self.columns.len().saturating_sub(1);
        let sep = if separator.is_empty() { "-" } else { separator };
        out.push_str(&sep.repeat(total));
        out.push('\n');

        // Rows
        for row in &self.rows {
            out.push_str(&self.render_line(row));
        }

        out
    }

    fn render_line(&self, row: &[String]) -> String {
        let wrapped: Vec<Vec<String>> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                if cell.is_empty() {
                    vec![String::new()]
                } else {
                    textwrap::wrap(cell, col.width.max(1))
                        .into_iter()
                        .map(|l| l.into_owned())
                        .collect()
                }
            })
            .collect();

        let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);
        let mut out = String::new();
        for line in 0..height {
            let cells: Vec<String> = self
                .columns
                .iter()
                .zip(&wrapped)
                .map(|(col, lines)| pad(lines.get(line).map(String::as_str).unwrap_or(""), col.width))
                .collect();
            out.push_str(cells.join(" ").trim_end());
            out.push('\n');
        }
        out
    }
}

/// Left-align to a display width (not a char count).
fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}
