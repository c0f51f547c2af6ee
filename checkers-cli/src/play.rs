//! Play command - AI self-play from the standard opening
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_games(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;

use checkers_core::{CheckersAI, EngineConfig, Game, GameResult, Move, PieceCounts};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Number of games to play
    #[arg(long, default_value = "1")]
    pub games: usize,

    /// AI search depth (overrides the config file)
    #[arg(long)]
    pub depth: Option<u32>,

    /// Maximum plies per game before it is called unfinished
    #[arg(long, default_value = "200")]
    pub max_moves: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    seed: u64,
    result: GameResult,
    final_counts: PieceCounts,
    moves: Vec<Move>,
}

/// Aggregated results
#[derive(Clone, Debug)]
struct PlayResults {
    games: Vec<GameRecord>,
    red_wins: usize,
    black_wins: usize,
    unfinished: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Resolve the engine settings
/// 2. Play all games in parallel
/// 3. Report results
pub fn run(args: PlayArgs, mut engine: EngineConfig) -> Result<()> {
    if let Some(depth) = args.depth {
        if depth == 0 {
            anyhow::bail!("--depth must be at least 1");
        }
        engine.depth = depth;
    }

    tracing::info!(
        "Starting self-play: {} games, depth={}, max_moves={}",
        args.games,
        engine.depth,
        args.max_moves
    );

    let results = play_games(&engine, args.games, args.max_moves);

    report_results(&results, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play every game on the rayon pool. Game `i` is seeded with `base + i`.
fn play_games(engine: &EngineConfig, games: usize, max_moves: usize) -> PlayResults {
    let base_seed = engine.seed.unwrap_or_else(rand::random);

    let progress = ProgressBar::new(games as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("self-play [{elapsed}] {wide_bar:.cyan/blue} {pos:>4}/{len:4} {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let records: Vec<GameRecord> = (0..games)
        .into_par_iter()
        .progress_with(progress)
        .map(|i| play_single_game(engine, i + 1, base_seed.wrapping_add(i as u64), max_moves))
        .collect();

    for record in &records {
        tracing::debug!(
            "Game {}: {:?} after {} moves",
            record.game_number,
            record.result,
            record.moves.len()
        );
    }

    compute_statistics(records)
}

/// Report results
fn report_results(results: &PlayResults, json: bool) -> Result<()> {
    if json {
        print_json_results(results)
    } else {
        print_text_results(results);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn play_single_game(
    engine: &EngineConfig,
    game_number: usize,
    seed: u64,
    max_moves: usize,
) -> GameRecord {
    let mut ai = CheckersAI::from_config(&EngineConfig {
        seed: Some(seed),
        ..engine.clone()
    });

    let (game, moves) = ai.play_game(Game::new(), max_moves);

    GameRecord {
        game_number,
        seed,
        result: game.result(),
        final_counts: game.board.piece_counts(),
        moves,
    }
}

fn compute_statistics(games: Vec<GameRecord>) -> PlayResults {
    let count = |result: GameResult| games.iter().filter(|g| g.result == result).count();
    let red_wins = count(GameResult::RedWins);
    let black_wins = count(GameResult::BlackWins);
    let unfinished = count(GameResult::Ongoing);

    let total_moves: usize = games.iter().map(|g| g.moves.len()).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    PlayResults {
        games,
        red_wins,
        black_wins,
        unfinished,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn percent(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

fn print_json_results(results: &PlayResults) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonGame<'a> {
        game_number: usize,
        seed: u64,
        result: GameResult,
        final_counts: PieceCounts,
        moves: &'a [Move],
    }

    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        total_games: usize,
        red_wins: usize,
        black_wins: usize,
        unfinished: usize,
        avg_moves: f32,
        games: Vec<JsonGame<'a>>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        red_wins: results.red_wins,
        black_wins: results.black_wins,
        unfinished: results.unfinished,
        avg_moves: results.avg_moves,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                seed: g.seed,
                result: g.result,
                final_counts: g.final_counts,
                moves: &g.moves,
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_text_results(results: &PlayResults) {
    let total = results.games.len();

    println!("\n=== Self-play Results ===");
    println!("Total games: {}", total);
    println!(
        "Red wins:    {} ({:.1}%)",
        results.red_wins,
        percent(results.red_wins, total)
    );
    println!(
        "Black wins:  {} ({:.1}%)",
        results.black_wins,
        percent(results.black_wins, total)
    );
    println!(
        "Unfinished:  {} ({:.1}%)",
        results.unfinished,
        percent(results.unfinished, total)
    );
    println!("Avg moves:   {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {} (seed {}): {:?} in {} moves, {} red / {} black left",
            game.game_number,
            game.seed,
            game.result,
            game.moves.len(),
            game.final_counts.red,
            game.final_counts.black
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use checkers_core::Position;

    fn record(game_number: usize, result: GameResult, plies: usize) -> GameRecord {
        GameRecord {
            game_number,
            seed: game_number as u64,
            result,
            final_counts: PieceCounts::default(),
            moves: vec![Move::step(Position::new(2, 2), Position::new(3, 3)); plies],
        }
    }

    #[test]
    fn test_compute_statistics_empty() {
        let results = compute_statistics(vec![]);
        assert_eq!(results.red_wins, 0);
        assert_eq!(results.black_wins, 0);
        assert_eq!(results.unfinished, 0);
        assert_eq!(results.avg_moves, 0.0);
    }

    #[test]
    fn test_compute_statistics() {
        let results = compute_statistics(vec![
            record(1, GameResult::RedWins, 10),
            record(2, GameResult::BlackWins, 20),
            record(3, GameResult::RedWins, 30),
            record(4, GameResult::Ongoing, 40),
        ]);
        assert_eq!(results.red_wins, 2);
        assert_eq!(results.black_wins, 1);
        assert_eq!(results.unfinished, 1);
        assert_eq!(results.avg_moves, 25.0);
    }

    #[test]
    fn test_seeded_games_are_reproducible() {
        let engine = EngineConfig {
            depth: 1,
            ..EngineConfig::default()
        };
        let a = play_single_game(&engine, 1, 99, 20);
        let b = play_single_game(&engine, 1, 99, 20);
        assert_eq!(a.moves, b.moves);
        assert!(a.moves.len() <= 20);
        assert!(!a.moves.is_empty());
    }
}
