//! Fixed-width text tables
//!
//! A [`TableSchema`] declares the columns of a table: display name and
//! whether the column sorts numerically. Rows are built from fight records
//! or leaderboard totals (see [`schemas`]), sorted by a column picked from a
//! free-text hint, and laid out left-aligned into a [`TableGrid`] where every
//! line has the same width.

pub mod format;
pub mod schemas;

use std::cmp::Ordering;
use std::fmt;

pub use schemas::{
    ENEMY, FRIENDLY, LEADERBOARD, enemy_rows, friendly_rows, leaderboard_rows, render_enemy,
    render_friendly, render_leaderboard,
};

/// How a column orders its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Highest first
    Numeric,
    /// Case-insensitive A to Z
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    pub const fn numeric(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Numeric,
        }
    }

    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Text,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub columns: &'static [Column],
    /// Column used when no hint is given or the hint matches nothing
    pub default_sort: usize,
}

impl TableSchema {
    /// Pick the sort column for a hint.
    ///
    /// The hint is matched case-insensitively as a substring of the column
    /// names, first match in declared order wins.
    pub fn sort_column(&self, hint: Option<&str>) -> usize {
        let Some(hint) = hint.map(str::trim).filter(|h| !h.is_empty()) else {
            return self.default_sort;
        };
        let hint = hint.to_lowercase();
        self.columns
            .iter()
            .position(|c| c.name.to_lowercase().contains(&hint))
            .unwrap_or(self.default_sort)
    }
}

/// A display-ready cell. Numeric cells carry the value they sort by, which
/// need not match their text (elapsed time shows as "3m 12s" but sorts by ms).
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number { value: f64, display: String },
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    pub fn int(value: u64) -> Self {
        Cell::Number {
            value: value as f64,
            display: value.to_string(),
        }
    }

    pub fn signed(value: i64) -> Self {
        Cell::Number {
            value: value as f64,
            display: value.to_string(),
        }
    }

    /// Fixed number of decimals
    pub fn fixed(value: f64, decimals: usize) -> Self {
        Cell::Number {
            value,
            display: format!("{value:.decimals$}"),
        }
    }

    pub fn keyed(value: f64, display: impl Into<String>) -> Self {
        Cell::Number {
            value,
            display: display.into(),
        }
    }

    pub fn display(&self) -> &str {
        match self {
            Cell::Text(s) => s,
            Cell::Number { display, .. } => display,
        }
    }

    fn sort_value(&self) -> Option<f64> {
        match self {
            Cell::Text(_) => None,
            Cell::Number { value, .. } => Some(*value),
        }
    }
}

pub type RenderRow = Vec<Cell>;

/// Header line plus data lines, all padded to the same width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableGrid {
    header: String,
    rows: Vec<String>,
}

impl TableGrid {
    pub fn from_lines(header: String, rows: Vec<String>) -> Self {
        Self { header, rows }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for TableGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header)?;
        for row in &self.rows {
            f.write_str("\n")?;
            f.write_str(row)?;
        }
        Ok(())
    }
}

/// Sort rows by the column the hint resolves to and lay them out as a grid.
///
/// Sorting is stable, so rows that tie keep their input order.
pub fn render(mut rows: Vec<RenderRow>, schema: &TableSchema, sort_hint: Option<&str>) -> TableGrid {
    let sort_index = schema.sort_column(sort_hint);
    if let Some(column) = schema.columns.get(sort_index) {
        rows.sort_by(|a, b| compare(a.get(sort_index), b.get(sort_index), column.kind));
    }

    let mut widths: Vec<usize> = schema.columns.iter().map(|c| width(c.name)).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(width(cell.display()));
        }
    }

    let header = layout(schema.columns.iter().map(|c| c.name), &widths);
    let lines = rows
        .iter()
        .map(|row| {
            let cells = (0..schema.columns.len())
                .map(|i| row.get(i).map(Cell::display).unwrap_or(""));
            layout(cells, &widths)
        })
        .collect();

    TableGrid::from_lines(header, lines)
}

fn compare(a: Option<&Cell>, b: Option<&Cell>, kind: ColumnKind) -> Ordering {
    match kind {
        ColumnKind::Numeric => {
            let a = a.and_then(Cell::sort_value);
            let b = b.and_then(Cell::sort_value);
            match (a, b) {
                (Some(a), Some(b)) => b.total_cmp(&a),
                // Rows without a value sink to the bottom
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }
        ColumnKind::Text => {
            let a = a.map(|c| c.display().to_lowercase()).unwrap_or_default();
            let b = b.map(|c| c.display().to_lowercase()).unwrap_or_default();
            a.cmp(&b)
        }
    }
}

/// Left-aligned cells padded to the column width, one space between columns.
fn layout<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut line = String::new();
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            line.push(' ');
        }
        line.push_str(cell);
        line.extend(std::iter::repeat_n(' ', widths[i].saturating_sub(width(cell))));
    }
    line
}

/// Display width in characters
pub(crate) fn width(s: &str) -> usize {
    s.chars().count()
}
