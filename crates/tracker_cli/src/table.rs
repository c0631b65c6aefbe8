//! Plain-text table rendering for query results.
//!
//! Layout follows the classic console table: a header row, a dashed rule
//! under each column, then one line per row. Column widths are measured in
//! terminal cells so non-ASCII names stay aligned.

use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row; missing trailing cells render blank, extra cells are dropped.
    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        cells.resize(self.headers.len(), String::new());
        self.rows.push(cells);
        self
    }

    pub fn render(&self) -> String {
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(column, header)| {
                self.rows
                    .iter()
                    .map(|row| row[column].width())
                    .chain(std::iter::once(header.width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        push_line(&mut out, &self.headers, &widths);
        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        push_line(&mut out, &rule, &widths);
        for row in &self.rows {
            push_line(&mut out, row, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (index, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if index > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::Table;

    #[test]
    fn aligns_columns_to_widest_cell() {
        let rendered = Table::new(["ID", "Name"])
            .row(["1", "Engineering"])
            .row(["12", "Legal"])
            .render();

        assert_eq!(
            rendered,
            "ID  Name\n--  -----------\n1   Engineering\n12  Legal\n"
        );
    }

    #[test]
    fn pads_short_rows_and_measures_wide_characters() {
        let rendered = Table::new(["Name", "Manager"])
            .row(["José"])
            .row(["李雷", "Ada"])
            .render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Name  Manager");
        assert_eq!(lines[2], "José");
        assert_eq!(lines[3], "李雷  Ada");
    }
}
