use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate on the 9x9 board (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a new position
    pub fn new(row: usize, col: usize) -> Self {
        debug_assert!(row < 9 && col < 9);
        Self { row, col }
    }

    /// Top-left corner of the 3x3 box containing this position
    pub fn box_anchor(&self) -> (usize, usize) {
        ((self.row / 3) * 3, (self.col / 3) * 3)
    }
}

/// A 9x9 Sudoku board. Each cell holds a digit 1-9 or is empty.
///
/// `Clone` produces an independent deep copy; recorded solutions rely on
/// this, since the working grid keeps mutating after a snapshot is taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Option<u8>; 9]; 9],
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl Grid {
    /// Create a grid with all 81 cells empty
    pub fn empty() -> Self {
        Self {
            cells: [[None; 9]; 9],
        }
    }

    /// Create a grid from raw cell values
    pub fn from_cells(cells: [[Option<u8>; 9]; 9]) -> Self {
        Self { cells }
    }

    /// Parse a grid from an 81-character string.
    ///
    /// Digits 1-9 are givens; `.` and `0` are empty cells. Returns `None`
    /// on any other character or a wrong length.
    pub fn from_string(s: &str) -> Option<Self> {
        if s.len() != 81 {
            return None;
        }

        let mut cells = [[None; 9]; 9];
        for (i, c) in s.chars().enumerate() {
            cells[i / 9][i % 9] = match c {
                '.' | '0' => None,
                '1'..='9' => Some(c as u8 - b'0'),
                _ => return None,
            };
        }
        Some(Self { cells })
    }

    /// Get the value at a position (None if empty)
    pub fn get(&self, pos: Position) -> Option<u8> {
        self.cells[pos.row][pos.col]
    }

    /// Set or clear the value at a position
    pub fn set(&mut self, pos: Position, value: Option<u8>) {
        debug_assert!(value.map_or(true, |v| (1..=9).contains(&v)));
        self.cells[pos.row][pos.col] = value;
    }

    /// First empty cell in row-major order (row 0-8, column 0-8 within
    /// each row), or `None` when the grid is full.
    ///
    /// The search component depends on this exact scan order; it is what
    /// makes solution discovery order deterministic.
    pub fn first_empty(&self) -> Option<Position> {
        for row in 0..9 {
            for col in 0..9 {
                if self.cells[row][col].is_none() {
                    return Some(Position::new(row, col));
                }
            }
        }
        None
    }

    /// Check whether placing `digit` at `pos` violates any Sudoku
    /// constraint against the currently filled cells.
    ///
    /// Checks the row, then the column, then the 3x3 box, stopping at the
    /// first conflict. The target cell itself is not inspected: callers
    /// must only ask about cells that are currently empty.
    pub fn is_valid(&self, pos: Position, digit: u8) -> bool {
        // Row
        for col in 0..9 {
            if self.cells[pos.row][col] == Some(digit) {
                return false;
            }
        }

        // Column
        for row in 0..9 {
            if self.cells[row][pos.col] == Some(digit) {
                return false;
            }
        }

        // 3x3 box
        let (box_row, box_col) = pos.box_anchor();
        for row in box_row..box_row + 3 {
            for col in box_col..box_col + 3 {
                if self.cells[row][col] == Some(digit) {
                    return false;
                }
            }
        }

        true
    }

    /// Check if every cell is filled
    pub fn is_complete(&self) -> bool {
        self.first_empty().is_none()
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_none())
            .count()
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        81 - self.empty_count()
    }

    /// Render as an 81-character line, `.` for empty cells
    pub fn to_line(&self) -> String {
        let mut result = String::with_capacity(81);
        for row in &self.cells {
            for cell in row {
                match cell {
                    Some(v) => result.push(char::from(b'0' + v)),
                    None => result.push('.'),
                }
            }
        }
        result
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..9 {
            if row > 0 && row % 3 == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for col in 0..9 {
                if col > 0 && col % 3 == 0 {
                    write!(f, "| ")?;
                }
                match self.cells[row][col] {
                    Some(v) => write!(f, "{} ", v)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    #[test]
    fn test_from_string_round_trip() {
        let grid = Grid::from_string(PUZZLE).unwrap();
        assert_eq!(grid.get(Position::new(0, 0)), Some(5));
        assert_eq!(grid.get(Position::new(0, 2)), None);
        assert_eq!(grid.get(Position::new(8, 8)), Some(9));

        // to_line uses '.' for empty; re-parsing gives the same grid
        let line = grid.to_line();
        assert_eq!(Grid::from_string(&line).unwrap(), grid);
    }

    #[test]
    fn test_from_string_accepts_dots_and_zeros() {
        let dots = ".".repeat(81);
        let zeros = "0".repeat(81);
        assert_eq!(
            Grid::from_string(&dots).unwrap(),
            Grid::from_string(&zeros).unwrap()
        );
    }

    #[test]
    fn test_from_string_rejects_bad_input() {
        assert!(Grid::from_string("123").is_none());
        assert!(Grid::from_string(&"x".repeat(81)).is_none());
        let mut with_space = PUZZLE.to_string();
        with_space.replace_range(0..1, " ");
        assert!(Grid::from_string(&with_space).is_none());
    }

    #[test]
    fn test_first_empty_is_row_major() {
        let mut grid = Grid::empty();
        assert_eq!(grid.first_empty(), Some(Position::new(0, 0)));

        // Fill row 0 and the start of row 1
        for col in 0..9 {
            grid.set(Position::new(0, col), Some(col as u8 + 1));
        }
        grid.set(Position::new(1, 0), Some(4));
        assert_eq!(grid.first_empty(), Some(Position::new(1, 1)));
    }

    #[test]
    fn test_is_valid_row_conflict() {
        let mut grid = Grid::empty();
        grid.set(Position::new(0, 0), Some(5));
        assert!(!grid.is_valid(Position::new(0, 8), 5));
        assert!(grid.is_valid(Position::new(0, 8), 6));
    }

    #[test]
    fn test_is_valid_column_conflict() {
        let mut grid = Grid::empty();
        grid.set(Position::new(0, 4), Some(7));
        assert!(!grid.is_valid(Position::new(8, 4), 7));
        assert!(grid.is_valid(Position::new(8, 4), 1));
    }

    #[test]
    fn test_is_valid_box_conflict() {
        let mut grid = Grid::empty();
        grid.set(Position::new(0, 0), Some(3));
        // (2, 2) shares the top-left box but neither row nor column
        assert!(!grid.is_valid(Position::new(2, 2), 3));
        // (3, 3) is in a different box, row, and column
        assert!(grid.is_valid(Position::new(3, 3), 3));
    }

    #[test]
    fn test_counts() {
        let grid = Grid::from_string(PUZZLE).unwrap();
        assert_eq!(grid.filled_count(), 30);
        assert_eq!(grid.empty_count(), 51);
        assert!(!grid.is_complete());
        assert!(Grid::empty().empty_count() == 81);
    }

    #[test]
    fn test_display_shows_box_separators() {
        let rendered = Grid::from_string(PUZZLE).unwrap().to_string();
        assert!(rendered.contains("------+-------+------"));
        assert!(rendered.starts_with("5 3 . "));
    }

    #[test]
    fn test_serde_round_trip() {
        let grid = Grid::from_string(PUZZLE).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }
}
