use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use sudoku_enum_core::{Grid, SearchOutcome, Solver, DEFAULT_SOLUTION_LIMIT};

/// Enumerate the solutions of a 9x9 Sudoku board
#[derive(Parser)]
#[command(
    name = "sudoku-enum",
    version,
    about = "Enumerates all valid completions of a Sudoku board, up to a cap"
)]
struct Cli {
    /// Board as 81 characters: digits 1-9 for givens, '.' or '0' for empty
    puzzle: Option<String>,

    /// Read the board from a file instead (whitespace is ignored)
    #[arg(long, value_name = "PATH", conflicts_with = "puzzle")]
    file: Option<PathBuf>,

    /// Maximum number of solutions to collect
    #[arg(long, default_value_t = DEFAULT_SOLUTION_LIMIT)]
    limit: usize,

    /// Stop at the first solution
    #[arg(long)]
    first: bool,

    /// Emit machine-readable JSON instead of text
    #[arg(long)]
    json: bool,

    /// Maximum number of solution grids printed in text mode
    #[arg(long, value_name = "N", default_value_t = 4)]
    max_print: usize,
}

// Exit codes: 0 = solved, 1 = usage error, 2 = contradictory givens,
// 3 = no valid completion exists.
fn main() -> ExitCode {
    let cli = Cli::parse();

    let board = match load_board(&cli) {
        Ok(board) => board,
        Err(msg) => {
            eprintln!("error: {msg}");
            return ExitCode::from(1);
        }
    };

    if cli.limit == 0 {
        eprintln!("error: --limit must be at least 1");
        return ExitCode::from(1);
    }

    let mut solver = Solver::new(&board);

    if !solver.validate_initial() {
        if cli.json {
            let report = serde_json::json!({
                "puzzle": board.to_line(),
                "error": "contradictory givens",
            });
            println!("{report}");
        } else {
            eprintln!("The board's givens contradict each other; refusing to search.");
        }
        return ExitCode::from(2);
    }

    let limit = if cli.first { 1 } else { cli.limit };
    let outcome = match solver.find_all_solutions(limit) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(1);
        }
    };

    let count = solver.solutions().len();
    let limit_reached = outcome == SearchOutcome::LimitReached;

    if cli.json {
        let solutions: Vec<String> = solver.solutions().iter().map(Grid::to_line).collect();
        let report = serde_json::json!({
            "puzzle": board.to_line(),
            "count": count,
            "limit": limit,
            "limit_reached": limit_reached,
            "solutions": solutions,
        });
        println!("{report}");
        return if count == 0 {
            ExitCode::from(3)
        } else {
            ExitCode::SUCCESS
        };
    }

    if count == 0 {
        println!("No valid completion exists for this board.");
        return ExitCode::from(3);
    }

    if limit_reached {
        println!("{count} solutions found (limit reached).");
    } else if count == 1 {
        println!("Exactly 1 solution.");
    } else {
        println!("Exactly {count} solutions.");
    }

    for (i, solution) in solver.solutions().iter().take(cli.max_print).enumerate() {
        println!("\nSolution {}:", i + 1);
        print!("{solution}");
    }
    if count > cli.max_print {
        println!("\n(showing first {} of {count})", cli.max_print);
    }

    ExitCode::SUCCESS
}

fn load_board(cli: &Cli) -> Result<Grid, String> {
    if let Some(path) = &cli.file {
        let raw = fs::read_to_string(path)
            .map_err(|err| format!("cannot read {}: {err}", path.display()))?;
        parse_board(&raw)
    } else if let Some(puzzle) = &cli.puzzle {
        parse_board(puzzle)
    } else {
        Err("provide a puzzle string or --file <PATH>".to_string())
    }
}

/// Parse a board from user input, ignoring whitespace so multi-line
/// layouts from files work too.
fn parse_board(raw: &str) -> Result<Grid, String> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    Grid::from_string(&compact).ok_or_else(|| {
        format!(
            "expected 81 cells of 1-9, '.' or '0', got {} characters",
            compact.len()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_board_single_line() {
        let line =
            "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
        let board = parse_board(line).unwrap();
        assert_eq!(board.filled_count(), 30);
    }

    #[test]
    fn test_parse_board_ignores_whitespace() {
        // Nine rows each starting with 5 is contradictory, but parsing
        // does not care; only the shape matters here.
        let layout = "5........\n".repeat(9);
        let board = parse_board(&layout).unwrap();
        assert_eq!(board.filled_count(), 9);
    }

    #[test]
    fn test_parse_board_rejects_wrong_length() {
        assert!(parse_board("12345").is_err());
        let err = parse_board("12345").unwrap_err();
        assert!(err.contains("got 5 characters"));
    }

    #[test]
    fn test_parse_board_rejects_stray_characters() {
        let bad = "x".repeat(81);
        assert!(parse_board(&bad).is_err());
    }
}
