use std::{
    io::{stdin, stdout},
    path::PathBuf,
};

use anyhow::Result;
use chess_practice_core::{
    config::{Difficulty, GameConfig, TimeControl},
    console::{start_console, start_puzzle_console},
    game::Color,
    puzzle::{load_catalog, PuzzleTrainer},
};
use clap::{Parser, Subcommand};
use heuristic_bot::HeuristicEngine;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "practice", about = "Practice games and daily puzzles")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play a timed game against the heuristic opponent.
    Play {
        /// TOML file with game settings. Flags below override it.
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// Seconds per side: 300, 600 or 900.
        #[arg(long)]
        time_control: Option<TimeControl>,
        #[arg(long)]
        think_delay_ms: Option<u64>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        color: Option<Color>,
    },
    /// Work through a puzzle catalog.
    Puzzle {
        /// TOML catalog of `[[puzzles]]`; the daily puzzles when omitted.
        #[arg(long)]
        puzzles: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Play {
            config,
            difficulty,
            time_control,
            think_delay_ms,
            seed,
            color,
        } => {
            let mut game_config = match config {
                Some(path) => GameConfig::load(path)?,
                None => GameConfig::default(),
            };
            game_config.difficulty = difficulty.unwrap_or(game_config.difficulty);
            game_config.time_control = time_control.unwrap_or(game_config.time_control);
            game_config.think_delay_ms = think_delay_ms.unwrap_or(game_config.think_delay_ms);
            game_config.human = color.unwrap_or(game_config.human);
            game_config.seed = seed.or(game_config.seed);
            info!(config = ?game_config, "starting practice game");

            let mut engine = match game_config.seed {
                Some(seed) => HeuristicEngine::seeded(game_config.difficulty, seed),
                None => HeuristicEngine::new(game_config.difficulty),
            };

            let state = start_console(game_config, &mut engine, stdin().lock(), &mut stdout())?;
            info!(moves = state.history.len(), termination = ?state.termination, "session closed");
        }
        Command::Puzzle { puzzles } => {
            let trainer = match puzzles {
                Some(path) => PuzzleTrainer::new(load_catalog(path)?)?,
                None => PuzzleTrainer::default(),
            };

            let trainer = start_puzzle_console(trainer, stdin().lock(), &mut stdout())?;
            info!(score = trainer.score(), "puzzle session closed");
        }
    }

    Ok(())
}
