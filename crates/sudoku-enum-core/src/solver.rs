use crate::grid::{Grid, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Solution cap used by hosts that do not pick their own
pub const DEFAULT_SOLUTION_LIMIT: usize = 1000;

/// How a search run ended.
///
/// `LimitReached` means the solution list holds exactly `limit` entries
/// and the tree may contain more completions; hosts must report this as
/// "at least N", not "exactly N". `Exhausted` means the whole tree was
/// explored and the count is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome {
    Exhausted,
    LimitReached,
}

/// Caller-contract violations rejected before any search work is done
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// `find_all_solutions` was called with a limit of zero
    ZeroLimit,
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::ZeroLimit => write!(f, "solution limit must be at least 1"),
        }
    }
}

impl std::error::Error for SolveError {}

/// Backtracking solver that enumerates every valid completion of a
/// partially filled board, up to a caller-supplied cap.
///
/// The solver owns one mutable working grid, deep-copied from the input
/// at construction, and a list of solution snapshots. During search the
/// working grid is mutated destructively (place, recurse, undo); each
/// recorded solution is an independent copy taken at the moment the grid
/// became full.
///
/// Enumeration is deterministic: empty cells are chosen in row-major
/// order and digits tried in ascending order, so for the same input the
/// solution list is identical across runs (it is the lexicographic order
/// of the completed grids).
///
/// A `Solver` is single-threaded state. Sharing one instance across
/// concurrent searches is not supported; hosts that solve puzzles in
/// parallel use one solver per puzzle.
pub struct Solver {
    board: Grid,
    solutions: Vec<Grid>,
}

impl Solver {
    /// Create a solver from an initial board.
    ///
    /// The board is deep-copied in; later caller-side mutation of the
    /// original has no effect on the solver.
    pub fn new(initial: &Grid) -> Self {
        Self {
            board: initial.clone(),
            solutions: Vec::new(),
        }
    }

    /// Current state of the working grid.
    ///
    /// After a search this is whatever the final backtrack step left
    /// behind; callers wanting a specific result must read `solutions`.
    pub fn board(&self) -> &Grid {
        &self.board
    }

    /// Solutions accumulated by the last search, in discovery order
    pub fn solutions(&self) -> &[Grid] {
        &self.solutions
    }

    /// Check that the pre-filled cells are internally consistent.
    ///
    /// Every filled cell is temporarily treated as empty and re-checked
    /// against the rest of the board with its own value as the candidate.
    /// Returns false on the first cell whose value conflicts with another
    /// given. This does not guarantee a solution exists, only that the
    /// givens contradict nothing; hosts must refuse to search a board
    /// that fails here.
    pub fn validate_initial(&self) -> bool {
        let mut scratch = self.board.clone();
        for row in 0..9 {
            for col in 0..9 {
                let pos = Position::new(row, col);
                if let Some(digit) = scratch.get(pos) {
                    scratch.set(pos, None);
                    let ok = scratch.is_valid(pos, digit);
                    scratch.set(pos, Some(digit));
                    if !ok {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Enumerate valid completions of the working grid, collecting at
    /// most `limit` of them into the solution list.
    ///
    /// The solution list is reset first. A limit of zero is a caller
    /// error and is rejected before any search work. An empty solution
    /// list after a successful return is a normal outcome meaning the
    /// board has no valid completion.
    pub fn find_all_solutions(&mut self, limit: usize) -> Result<SearchOutcome, SolveError> {
        if limit == 0 {
            return Err(SolveError::ZeroLimit);
        }
        Ok(self.run_search(limit))
    }

    /// Find one solution and promote it into the working grid.
    ///
    /// Equivalent to `find_all_solutions(1)`; on success the working grid
    /// is replaced by the first (and only recorded) solution. On failure
    /// the working grid is left in its post-search state, which carries
    /// no meaning.
    pub fn solve_single(&mut self) -> bool {
        self.run_search(1);
        match self.solutions.first() {
            Some(solution) => {
                self.board = solution.clone();
                true
            }
            None => false,
        }
    }

    fn run_search(&mut self, limit: usize) -> SearchOutcome {
        self.solutions.clear();
        if self.search(limit) {
            SearchOutcome::LimitReached
        } else {
            SearchOutcome::Exhausted
        }
    }

    /// One backtracking step. Returns true to stop the whole search (the
    /// cap was hit), false to keep exploring siblings.
    fn search(&mut self, limit: usize) -> bool {
        let pos = match self.board.first_empty() {
            Some(pos) => pos,
            None => {
                // Grid is full: snapshot it. Stop the search only when
                // the cap is hit; otherwise backtrack for more.
                self.solutions.push(self.board.clone());
                return self.solutions.len() >= limit;
            }
        };

        for digit in 1..=9u8 {
            if !self.board.is_valid(pos, digit) {
                continue;
            }

            self.board.set(pos, Some(digit));
            if self.search(limit) {
                // Cap hit somewhere below: propagate without undoing
                return true;
            }
            self.board.set(pos, None);
        }

        // All nine digits exhausted at this cell: let the parent move on
        false
    }
}
