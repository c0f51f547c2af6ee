//! Analyze command - evaluate a saved board
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_board(), analyze_board(), print_report()
//! - Level 4: formatting utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use checkers_core::{
    generate_moves, Board, CheckersAI, EngineConfig, Evaluation, Move, SelectError, Side,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Board JSON file: 8 rows of 8 cell codes (0 empty, 1 red pawn,
    /// 2 black pawn, 3 red queen, 4 black queen)
    #[arg(value_name = "FILE")]
    pub board: PathBuf,

    /// Side the AI picks a move for
    #[arg(long, default_value = "black", value_parser = parse_side)]
    pub side: Side,

    /// AI search depth (overrides the config file)
    #[arg(long)]
    pub depth: Option<u32>,
}

/// Everything printed for one board
struct Analysis {
    evaluation: Evaluation,
    red_moves: Vec<Move>,
    black_moves: Vec<Move>,
    side: Side,
    choice: Result<Move, SelectError>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run analyze command
pub fn run(args: AnalyzeArgs, mut engine: EngineConfig) -> Result<()> {
    if let Some(depth) = args.depth {
        engine.depth = depth;
    }

    let board = load_board(&args.board)?;
    let analysis = analyze_board(&board, args.side, &engine);
    print_report(&board, &analysis);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_board(path: &Path) -> Result<Board> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read board file: {}", path.display()))?;
    let board: Board = serde_json::from_str(&content)
        .with_context(|| format!("Invalid board in {}", path.display()))?;

    if !board.light_squares_empty() {
        tracing::warn!("Board has pieces on light squares; analysis may be meaningless");
    }
    Ok(board)
}

fn analyze_board(board: &Board, side: Side, engine: &EngineConfig) -> Analysis {
    let mut ai = CheckersAI::from_config(engine);

    Analysis {
        evaluation: ai.evaluate(board),
        red_moves: generate_moves(board, Side::Red),
        black_moves: generate_moves(board, Side::Black),
        side,
        choice: ai.select_move_for(board, side),
    }
}

fn print_report(board: &Board, analysis: &Analysis) {
    println!("{}", render_board(board));
    println!("Score (red positive): {:.2}", analysis.evaluation.score);
    println!(
        "Pieces: {} red, {} black",
        analysis.evaluation.piece_counts.red, analysis.evaluation.piece_counts.black
    );

    print_moves("Red", &analysis.red_moves);
    print_moves("Black", &analysis.black_moves);

    match &analysis.choice {
        Ok(mv) => println!("\nAI move for {}: {}", analysis.side, format_move(mv)),
        Err(SelectError::NoValidMoves { diagnostics }) => {
            println!("\nAI ({}) has no valid moves:", analysis.side);
            for piece in diagnostics {
                let neighbors: Vec<String> = piece
                    .neighbors
                    .iter()
                    .map(|n| format!("({},{})={}", n.position.row, n.position.col, n.cell as u8))
                    .collect();
                println!(
                    "  ({},{}) {:?}: {}",
                    piece.position.row,
                    piece.position.col,
                    piece.cell,
                    neighbors.join(" ")
                );
            }
        }
        Err(e) => println!("\nAI ({}): {}", analysis.side, e),
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn parse_side(s: &str) -> Result<Side, String> {
    match s.to_ascii_lowercase().as_str() {
        "red" => Ok(Side::Red),
        "black" => Ok(Side::Black),
        other => Err(format!("unknown side '{}', expected red or black", other)),
    }
}

fn print_moves(label: &str, moves: &[Move]) {
    println!("\n{} moves ({}):", label, moves.len());
    for mv in moves {
        println!("  {}", format_move(mv));
    }
}

fn format_move(mv: &Move) -> String {
    let mut text = format!(
        "({},{}) -> ({},{})",
        mv.from.row, mv.from.col, mv.to.row, mv.to.col
    );
    if mv.is_capture() {
        let jumped: Vec<String> = mv
            .captured
            .iter()
            .map(|p| format!("({},{})", p.row, p.col))
            .collect();
        text.push_str(&format!(" x {}", jumped.join(" ")));
    }
    text
}

/// Text diagram with row 7 at the top
fn render_board(board: &Board) -> String {
    let rows: [[u8; 8]; 8] = (*board).into();
    let mut out = String::from("  0 1 2 3 4 5 6 7\n");
    for (r, row) in rows.iter().enumerate().rev() {
        out.push_str(&r.to_string());
        for &code in row {
            let symbol = match code {
                1 => 'r',
                2 => 'b',
                3 => 'R',
                4 => 'B',
                _ => '.',
            };
            out.push(' ');
            out.push(symbol);
        }
        out.push('\n');
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================
