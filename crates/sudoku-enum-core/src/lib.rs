//! Sudoku enumeration engine.
//!
//! A plain backtracking solver that collects every valid completion of a
//! partially filled 9x9 board into an ordered list, stopping early once a
//! caller-supplied cap is reached. Discovery order is deterministic:
//! empty cells are filled in row-major order and digits tried 1 through
//! 9, so searching the same board always yields the same sequence.
//!
//! ```
//! use sudoku_enum_core::{Grid, Solver, DEFAULT_SOLUTION_LIMIT};
//!
//! let puzzle = Grid::from_string(
//!     "530070000600195000098000060800060003400803001700020006060000280000419005000080079",
//! )
//! .unwrap();
//!
//! let mut solver = Solver::new(&puzzle);
//! assert!(solver.validate_initial());
//!
//! solver.find_all_solutions(DEFAULT_SOLUTION_LIMIT).unwrap();
//! assert_eq!(solver.solutions().len(), 1);
//! ```

mod grid;
mod solver;

pub use grid::{Grid, Position};
pub use solver::{SearchOutcome, SolveError, Solver, DEFAULT_SOLUTION_LIMIT};
