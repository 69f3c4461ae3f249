//! Game state for a practice game against an [`Engine`].
//!
//! [`GameState`] is a snapshot; [`GameState::reduce`] consumes it together with
//! an [`Action`] and returns the next snapshot. Nothing else mutates it, so a
//! game can be replayed by feeding the same actions again.

use std::fmt::Display;

use tracing::{debug, info};

use crate::{
    config::GameConfig,
    game::{Board, BoardPos, Color, Piece},
    util::SquareSet,
    Engine,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// The loser had no destinations left for any piece.
    Checkmate,
    Timeout,
    Resignation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Termination {
    pub winner: Color,
    pub reason: TerminationReason,
}

impl Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.reason {
            TerminationReason::Checkmate => write!(f, "Checkmate! {} wins", self.winner),
            TerminationReason::Timeout => write!(f, "Time's up! {} wins", self.winner),
            TerminationReason::Resignation => {
                write!(f, "{} resigned, {} wins", self.winner.opposite(), self.winner)
            }
        }
    }
}

/// Pieces removed from the board, grouped by the color of the piece.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedPieces {
    pub white: Vec<Piece>,
    pub black: Vec<Piece>,
}

impl CapturedPieces {
    pub fn get(&self, color: Color) -> &[Piece] {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn push(&mut self, piece: Piece) {
        match piece.color {
            Color::White => self.white.push(piece),
            Color::Black => self.black.push(piece),
        }
    }
}

/// Remaining seconds per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clocks {
    pub white: u32,
    pub black: u32,
}

impl Clocks {
    pub fn new(seconds: u32) -> Self {
        Self {
            white: seconds,
            black: seconds,
        }
    }

    pub fn get(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    fn get_mut(&mut self, color: Color) -> &mut u32 {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}

/// `m:ss`, as shown next to each player.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    /// A click on a square by the human player.
    SelectSquare(BoardPos),
    /// An already validated move for the side to move.
    Move { from: BoardPos, to: BoardPos },
    Resign,
    /// One second elapsed on the clock of the side to move.
    Tick,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub side_to_move: Color,
    pub selected: Option<BoardPos>,
    pub highlighted: SquareSet,
    pub history: Vec<String>,
    pub captured: CapturedPieces,
    pub clocks: Clocks,
    pub started: bool,
    pub termination: Option<Termination>,
    pub config: GameConfig,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        Self {
            board: Board::default(),
            side_to_move: Color::White,
            selected: None,
            highlighted: SquareSet::default(),
            history: vec![],
            captured: CapturedPieces::default(),
            clocks: Clocks::new(config.time_control.seconds()),
            started: false,
            termination: None,
            config,
        }
    }

    /// Same as [`GameState::new`] but starting from an arbitrary position.
    pub fn with_board(config: GameConfig, board: Board, side_to_move: Color) -> Self {
        Self {
            board,
            side_to_move,
            ..Self::new(config)
        }
    }

    pub fn is_over(&self) -> bool {
        self.termination.is_some()
    }

    pub fn is_live(&self) -> bool {
        self.started && !self.is_over()
    }

    pub fn awaiting_opponent(&self) -> bool {
        self.is_live() && self.side_to_move == self.config.opponent()
    }

    /// Whether the human may play `from`-`to` right now.
    pub fn is_playable(&self, from: BoardPos, to: BoardPos) -> bool {
        self.is_live()
            && self.side_to_move == self.config.human
            && self.board.get(from).is_some_and(|p| p.is_playing(self.side_to_move))
            && self.board.legal_destinations(from).contains(to)
    }

    pub fn reduce(self, action: Action) -> Self {
        debug!(?action, side_to_move = %self.side_to_move, "reducing");

        match action {
            Action::Start => self.start(),
            Action::SelectSquare(pos) => self.select_square(pos),
            Action::Move { from, to } => self.play(from, to),
            Action::Resign => self.resign(),
            Action::Tick => self.tick(),
            Action::Reset => Self::new(self.config),
        }
    }

    /// Asks `engine` for a move when it is the opponent's turn. An engine with
    /// nothing to play loses on the spot.
    pub fn opponent_reply<E: Engine + ?Sized>(self, engine: &mut E) -> Self {
        if !self.awaiting_opponent() {
            return self;
        }

        match engine.select_move(&self.board, self.side_to_move) {
            Some(m) => self.reduce(Action::Move {
                from: m.from,
                to: m.to,
            }),
            None => {
                let winner = self.side_to_move.opposite();
                self.end(winner, TerminationReason::Checkmate)
            }
        }
    }

    fn start(mut self) -> Self {
        if self.started {
            return self;
        }

        self.clocks = Clocks::new(self.config.time_control.seconds());
        self.started = true;
        info!(config = ?self.config, "game started");
        self
    }

    fn select_square(mut self, pos: BoardPos) -> Self {
        let human = self.config.human;
        if !self.is_live() || self.side_to_move != human || !pos.is_valid() {
            return self;
        }

        let own_piece = self.board[pos].is_some_and(|p| p.is_playing(human));

        if let Some(from) = self.selected {
            if self.highlighted.contains(pos) {
                return self.play(from, pos);
            }
        }

        if own_piece {
            self.selected = Some(pos);
            self.highlighted = self.board.legal_destinations(pos);
        } else {
            self.selected = None;
            self.highlighted.clear();
        }

        self
    }

    fn play(mut self, from: BoardPos, to: BoardPos) -> Self {
        if !self.is_live() || !from.is_valid() || !to.is_valid() {
            return self;
        }

        let Some(piece) = self.board[from].filter(|p| p.is_playing(self.side_to_move)) else {
            debug!(%from, side = %self.side_to_move, "no piece of the side to move on origin");
            return self;
        };

        let m = crate::game::Move::new(from, to, piece);
        if let Some(captured) = self.board.make_move(from, to) {
            self.captured.push(captured);
        }

        self.history.push(m.to_string());
        self.selected = None;
        self.highlighted.clear();

        let mover = self.side_to_move;
        if !self.board.has_any_valid_moves(mover.opposite()) {
            return self.end(mover, TerminationReason::Checkmate);
        }

        self.side_to_move = mover.opposite();
        self
    }

    fn resign(self) -> Self {
        if !self.is_live() {
            return self;
        }

        let winner = self.config.opponent();
        self.end(winner, TerminationReason::Resignation)
    }

    fn tick(mut self) -> Self {
        if !self.is_live() {
            return self;
        }

        let side = self.side_to_move;
        let clock = self.clocks.get_mut(side);
        if *clock <= 1 {
            *clock = 0;
            return self.end(side.opposite(), TerminationReason::Timeout);
        }

        *clock -= 1;
        self
    }

    fn end(mut self, winner: Color, reason: TerminationReason) -> Self {
        let termination = Termination { winner, reason };
        info!(%winner, ?reason, moves = self.history.len(), "game over");

        self.termination = Some(termination);
        self.selected = None;
        self.highlighted.clear();
        self
    }
}
