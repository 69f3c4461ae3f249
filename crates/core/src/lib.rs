use game::{Board, Color, Move};

pub mod config;
pub mod console;
pub mod debug;
pub mod game;
pub mod layout;
pub mod movegen;
pub mod notation;
pub mod puzzle;
pub mod renderer;
pub mod session;
pub mod util;

/// An opponent. Returns `None` when `side` has nothing to play.
pub trait Engine {
    fn select_move(&mut self, board: &Board, side: Color) -> Option<Move>;
}
