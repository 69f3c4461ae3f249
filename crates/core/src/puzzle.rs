use std::{fs, path::Path};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    game::{Board, BoardPos, Color},
    notation::parse_coordinate_move,
};

pub const STARTING_HINTS: u8 = 3;
pub const HINT: &str = "Look for the most powerful move!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PuzzleDifficulty {
    Easy,
    Medium,
    Hard,
}

impl PuzzleDifficulty {
    pub const fn points(self) -> u32 {
        match self {
            PuzzleDifficulty::Easy => 10,
            PuzzleDifficulty::Medium => 25,
            PuzzleDifficulty::Hard => 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub id: String,
    pub title: String,
    pub difficulty: PuzzleDifficulty,
    /// Board in layout notation, see [`crate::layout`].
    pub layout: String,
    /// Expected line. Entries that are not coordinate moves are theme tags.
    pub solution: Vec<String>,
    pub description: String,
}

impl Puzzle {
    pub fn board(&self) -> Board {
        Board::from_layout(&self.layout)
    }

    pub fn solution_moves(&self) -> Vec<(BoardPos, BoardPos)> {
        self.solution
            .iter()
            .filter_map(|entry| parse_coordinate_move(entry).ok())
            .collect()
    }
}

fn puzzle(
    id: &str,
    title: &str,
    difficulty: PuzzleDifficulty,
    layout: &str,
    solution: [&str; 2],
    description: &str,
) -> Puzzle {
    Puzzle {
        id: id.to_string(),
        title: title.to_string(),
        difficulty,
        layout: layout.to_string(),
        solution: solution.iter().map(|s| s.to_string()).collect(),
        description: description.to_string(),
    }
}

pub fn daily_puzzles() -> Vec<Puzzle> {
    vec![
        puzzle(
            "1",
            "Checkmate in 2",
            PuzzleDifficulty::Easy,
            "4k3/8/8/8/8/8/4Q3/4K3",
            ["e2-e8", "checkmate"],
            "White to move. Find the checkmate!",
        ),
        puzzle(
            "2",
            "Fork Attack",
            PuzzleDifficulty::Medium,
            "4k3/8/8/3r4/8/2N5/8/4K3",
            ["c3-b5", "fork"],
            "White knight can fork the king and rook!",
        ),
        puzzle(
            "3",
            "Queen Sacrifice",
            PuzzleDifficulty::Hard,
            "6k1/5ppp/8/8/8/8/5PPP/3Q2K1",
            ["d1-d8", "sacrifice"],
            "Sometimes the boldest move wins!",
        ),
    ]
}

#[derive(Debug, Deserialize)]
struct PuzzleCatalog {
    puzzles: Vec<Puzzle>,
}

/// Reads a TOML document made of `[[puzzles]]` tables.
pub fn parse_catalog(src: &str) -> Result<Vec<Puzzle>> {
    let catalog: PuzzleCatalog = toml::from_str(src).context("Failed to parse puzzle catalog")?;
    if catalog.puzzles.is_empty() {
        return Err(anyhow!("Puzzle catalog is empty"));
    }

    Ok(catalog.puzzles)
}

pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<Puzzle>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read puzzle catalog {}", path.display()))?;
    parse_catalog(&contents)
}

/// Walks through a puzzle catalog. White pieces move freely (no legality
/// checks) and a puzzle counts as solved once the last move mentions the
/// eighth rank or two moves have been made.
#[derive(Debug, Clone)]
pub struct PuzzleTrainer {
    catalog: Vec<Puzzle>,
    index: usize,
    board: Board,
    selected: Option<BoardPos>,
    history: Vec<String>,
    solved: bool,
    hints: u8,
    score: u32,
}

impl PuzzleTrainer {
    pub fn new(catalog: Vec<Puzzle>) -> Result<Self> {
        let board = catalog
            .first()
            .map(Puzzle::board)
            .ok_or_else(|| anyhow!("Puzzle catalog is empty"))?;

        Ok(Self::with_board(catalog, board))
    }

    fn with_board(catalog: Vec<Puzzle>, board: Board) -> Self {
        Self {
            catalog,
            index: 0,
            board,
            selected: None,
            history: vec![],
            solved: false,
            hints: STARTING_HINTS,
            score: 0,
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.catalog[self.index]
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selected(&self) -> Option<BoardPos> {
        self.selected
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn hints(&self) -> u8 {
        self.hints
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Handles a click. Returns the recorded move when the click completed one.
    pub fn select_square(&mut self, pos: BoardPos) -> Option<String> {
        if self.solved || !pos.is_valid() {
            return None;
        }

        let Some(from) = self.selected.take() else {
            if self.board[pos].is_some_and(|p| p.is_playing(Color::White)) {
                self.selected = Some(pos);
            }
            return None;
        };

        self.play(from, pos)
    }

    /// Moves a white piece from `from` to `to` without consulting the
    /// selection. Nothing happens for a non-white origin or a null move.
    pub fn play(&mut self, from: BoardPos, to: BoardPos) -> Option<String> {
        self.selected = None;
        if self.solved || from == to || !from.is_valid() || !to.is_valid() {
            return None;
        }

        if !self.board[from].is_some_and(|p| p.is_playing(Color::White)) {
            return None;
        }

        Some(self.move_piece(from, to))
    }

    fn move_piece(&mut self, from: BoardPos, to: BoardPos) -> String {
        let piece = self.board[from].take();
        self.board[to] = piece;

        let m = format!("{from}-{to}");
        debug!(puzzle = %self.puzzle().id, %m, "puzzle move");
        self.history.push(m.clone());
        self.check_solution();
        m
    }

    fn check_solution(&mut self) {
        let Some(last) = self.history.last() else {
            return;
        };

        if last.contains('8') || self.history.len() >= 2 {
            let points = self.puzzle().difficulty.points();
            self.solved = true;
            self.score += points;
            info!(puzzle = %self.puzzle().id, points, score = self.score, "puzzle solved");
        }
    }

    /// Spends a hint. Returns `false` when none are left or the puzzle is done.
    pub fn use_hint(&mut self) -> bool {
        if self.hints == 0 || self.solved {
            return false;
        }

        self.hints -= 1;
        true
    }

    pub fn reset_puzzle(&mut self) {
        self.board = self.puzzle().board();
        self.selected = None;
        self.history.clear();
        self.solved = false;
    }

    /// Moves on to the next puzzle, wrapping around. Hints and score carry over.
    pub fn next_puzzle(&mut self) {
        self.index = (self.index + 1) % self.catalog.len();
        self.reset_puzzle();
    }
}

impl Default for PuzzleTrainer {
    fn default() -> Self {
        let catalog = daily_puzzles();
        let board = catalog[0].board();
        Self::with_board(catalog, board)
    }
}
