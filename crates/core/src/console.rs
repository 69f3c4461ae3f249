//! Line-oriented front end for the practice game and the puzzle trainer.

use std::{
    io::{BufRead, Write},
    thread,
    time::{Duration, Instant},
};

use anyhow::Result;
use tracing::{debug, trace};

use crate::{
    config::GameConfig,
    notation::{parse_coordinate_move, parse_square},
    puzzle::{PuzzleTrainer, HINT},
    session::{format_clock, Action, GameState},
    Engine,
};

const GAME_HELP: &str = "commands: start | move <e2e4> | select <e2> | resign | reset | board | history | clock | quit";
const PUZZLE_HELP: &str = "commands: move <e2e4> | select <e2> | hint | reset | next | board | quit";

/// Turns wall time into whole-second clock ticks.
struct TickSource {
    last: Instant,
}

impl TickSource {
    fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    fn restart(&mut self) {
        self.last = Instant::now();
    }

    fn catch_up(&mut self, mut state: GameState) -> GameState {
        if !state.is_live() {
            self.restart();
            return state;
        }

        let seconds = self.last.elapsed().as_secs();
        self.last += Duration::from_secs(seconds);

        for _ in 0..seconds {
            if !state.is_live() {
                break;
            }
            state = state.reduce(Action::Tick);
        }

        state
    }
}

fn respond(out: &mut impl Write, msg: &str) -> Result<()> {
    writeln!(out, "{msg}")?;
    out.flush()?;
    trace!("Responded with: {msg}");
    Ok(())
}

/// Plays one game against `engine`, reading commands from `input` until `quit`
/// or end of input. Returns the final state.
pub fn start_console(
    config: GameConfig,
    engine: &mut impl Engine,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<GameState> {
    let mut state = GameState::new(config);
    let mut ticks = TickSource::new();

    respond(
        out,
        &format!(
            "Practice game: {} difficulty, {} per side, you play {}",
            config.difficulty,
            format_clock(config.time_control.seconds()),
            config.human
        ),
    )?;
    respond(out, GAME_HELP)?;

    for line in input.lines() {
        let line = line?;
        debug!("Received Message: {line}");

        let mut segments = line.split_whitespace();
        let Some(command) = segments.next() else {
            continue;
        };
        let args = segments.collect::<Vec<_>>().join(" ");

        state = ticks.catch_up(state);
        let was_over = state.is_over();

        match command {
            "quit" | "exit" => break,
            "help" => respond(out, GAME_HELP)?,
            "start" => {
                state = state.reduce(Action::Start);
                ticks.restart();
                respond(out, &state.to_string())?;
            }
            "reset" => {
                state = state.reduce(Action::Reset);
                respond(out, "Game reset. Type start to play again.")?;
            }
            "resign" => state = state.reduce(Action::Resign),
            "board" | "d" => respond(out, &state.to_string())?,
            "history" => respond(out, &render_history(&state.history))?,
            "clock" => respond(
                out,
                &format!(
                    "white {}  black {}",
                    format_clock(state.clocks.white),
                    format_clock(state.clocks.black)
                ),
            )?,
            "select" => match parse_square(&args) {
                Ok(pos) => {
                    state = state.reduce(Action::SelectSquare(pos));
                    let targets = state
                        .highlighted
                        .iter()
                        .map(|p| p.to_string())
                        .collect::<Vec<_>>();
                    respond(out, &format!("Destinations: {}", targets.join(" ")))?;
                }
                Err(e) => respond(out, &e.to_string())?,
            },
            _ => {
                let src = if command == "move" { args } else { line.clone() };
                match parse_coordinate_move(&src) {
                    Ok((from, to)) if state.is_playable(from, to) => {
                        state = state.reduce(Action::Move { from, to });
                        if let Some(m) = state.history.last() {
                            respond(out, m)?;
                        }
                    }
                    Ok(_) => respond(out, &format!("Illegal move: {}", src.trim()))?,
                    Err(_) => respond(out, &format!("Unknown command: {line}"))?,
                }
            }
        }

        if state.awaiting_opponent() {
            respond(out, "Opponent is thinking...")?;
            thread::sleep(config.think_delay());
            state = ticks.catch_up(state);
            let played = state.history.len();
            state = state.opponent_reply(engine);
            if state.history.len() > played {
                if let Some(m) = state.history.last() {
                    respond(out, m)?;
                }
            }
        }

        if !was_over {
            if let Some(termination) = state.termination {
                respond(out, &termination.to_string())?;
            }
        }
    }

    Ok(state)
}

fn render_history(history: &[String]) -> String {
    if history.is_empty() {
        return "No moves yet".to_string();
    }

    history
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| format!("{}. {}", i + 1, pair.join("  ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Runs the puzzle trainer until `quit` or end of input.
pub fn start_puzzle_console(
    mut trainer: PuzzleTrainer,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<PuzzleTrainer> {
    respond(out, &describe_puzzle(&trainer))?;
    respond(out, PUZZLE_HELP)?;

    for line in input.lines() {
        let line = line?;
        debug!("Received Message: {line}");

        let mut segments = line.split_whitespace();
        let Some(command) = segments.next() else {
            continue;
        };
        let args = segments.collect::<Vec<_>>().join(" ");
        let was_solved = trainer.is_solved();

        match command {
            "quit" | "exit" => break,
            "help" => respond(out, PUZZLE_HELP)?,
            "board" | "d" => respond(out, &trainer.to_string())?,
            "hint" => {
                if trainer.use_hint() {
                    respond(out, &format!("Hint: {HINT} ({} left)", trainer.hints()))?;
                } else {
                    respond(out, "No hints available")?;
                }
            }
            "reset" => {
                trainer.reset_puzzle();
                respond(out, &trainer.to_string())?;
            }
            "next" => {
                trainer.next_puzzle();
                respond(out, &describe_puzzle(&trainer))?;
            }
            "select" => match parse_square(&args) {
                Ok(pos) => {
                    if let Some(m) = trainer.select_square(pos) {
                        respond(out, &m)?;
                    }
                }
                Err(e) => respond(out, &e.to_string())?,
            },
            _ => {
                let src = if command == "move" { args } else { line.clone() };
                match parse_coordinate_move(&src) {
                    Ok((from, to)) => match trainer.play(from, to) {
                        Some(m) => respond(out, &m)?,
                        None => respond(out, &format!("Cannot play {}", src.trim()))?,
                    },
                    Err(_) => respond(out, &format!("Unknown command: {line}"))?,
                }
            }
        }

        if !was_solved && trainer.is_solved() {
            respond(
                out,
                &format!(
                    "Puzzle solved! +{} points (score {})",
                    trainer.puzzle().difficulty.points(),
                    trainer.score()
                ),
            )?;
        }
    }

    Ok(trainer)
}

fn describe_puzzle(trainer: &PuzzleTrainer) -> String {
    let puzzle = trainer.puzzle();
    format!(
        "{} ({:?}): {}\n{}",
        puzzle.title, puzzle.difficulty, puzzle.description, trainer
    )
}
