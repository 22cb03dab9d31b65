//! 生セルグリッド
//!
//! One worksheet as read from disk: an immutable, rectangular grid of
//! heterogeneous cells. It carries no schema; column meaning is inferred later.

use std::fmt;

/// Single cell value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Whitespace-only text counts as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(n) => n.is_nan(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => write!(f, "{}", s),
            // 整数値は小数点なしで表示
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Cell::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Rectangular cell grid (rows padded with `Cell::Empty`)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawCellGrid {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl RawCellGrid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();
        Self { rows, width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(&EMPTY)
    }

    /// Iterate one column top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().filter_map(move |r| r.get(col))
    }

    /// Copy without the columns whose every cell is empty.
    pub fn without_empty_columns(&self) -> Self {
        let keep: Vec<usize> = (0..self.width)
            .filter(|&c| self.column(c).any(|cell| !cell.is_empty()))
            .collect();

        let rows = self
            .rows
            .iter()
            .map(|r| keep.iter().map(|&c| r[c].clone()).collect())
            .collect();

        Self { rows, width: keep.len() }
    }

    /// Copy without the first `n` rows.
    pub fn skip_rows(&self, n: usize) -> Self {
        Self {
            rows: self.rows.iter().skip(n).cloned().collect(),
            width: self.width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_display_integral_number() {
        assert_eq!(Cell::Number(25.0).to_string(), "25");
        assert_eq!(Cell::Number(2.5).to_string(), "2.5");
        assert_eq!(Cell::Empty.to_string(), "");
    }

    #[test]
    fn test_cell_is_empty() {
        assert!(Cell::Empty.is_empty());
        assert!(Cell::text("   ").is_empty());
        assert!(Cell::Number(f64::NAN).is_empty());
        assert!(!Cell::Number(0.0).is_empty());
        assert!(!Cell::text("Base").is_empty());
    }

    #[test]
    fn test_grid_pads_rows() {
        let grid = RawCellGrid::new(vec![vec![Cell::text("a")], vec![Cell::text("b"), Cell::Number(3.0)]]);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.cell(0, 1), &Cell::Empty);
        assert_eq!(grid.cell(9, 9), &Cell::Empty);
    }

    #[test]
    fn test_without_empty_columns() {
        let grid = RawCellGrid::new(vec![
            vec![Cell::text("Auto"), Cell::Empty, Cell::text("LeBron James")],
            vec![Cell::text("Base"), Cell::text(" "), Cell::text("Stephen Curry")],
        ]);
        let compact = grid.without_empty_columns();
        assert_eq!(compact.width(), 2);
        assert_eq!(compact.cell(1, 1), &Cell::text("Stephen Curry"));
    }

    #[test]
    fn test_skip_rows() {
        let grid = RawCellGrid::new(vec![vec![Cell::text("Player")], vec![Cell::text("A")]]);
        let body = grid.skip_rows(1);
        assert_eq!(body.height(), 1);
        assert_eq!(body.cell(0, 0), &Cell::text("A"));
    }
}
