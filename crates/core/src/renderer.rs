use std::fmt::Display;

use crate::{
    game::{Board, BoardPos, Piece},
    puzzle::PuzzleTrainer,
    session::{format_clock, GameState},
    util::SquareSet,
};

const RANK_SEPARATOR: &str = " +---+---+---+---+---+---+---+---+";

/// Writes the grid with `marked` squares shown as `*` when empty or bracketed
/// when occupied.
fn write_grid(f: &mut std::fmt::Formatter<'_>, board: &Board, marked: SquareSet) -> std::fmt::Result {
    for row in 0..8 {
        writeln!(f, "{RANK_SEPARATOR}")?;
        write!(f, " |")?;
        for col in 0..8 {
            let pos = BoardPos::new(row, col);
            match (board[pos], marked.contains(pos)) {
                (Some(piece), true) => write!(f, "[{}]|", piece.glyph())?,
                (Some(piece), false) => write!(f, " {} |", piece.glyph())?,
                (None, true) => write!(f, " * |")?,
                (None, false) => write!(f, "   |")?,
            }
        }
        writeln!(f, " {}", 8 - row)?;
    }

    writeln!(f, "{RANK_SEPARATOR}")?;
    writeln!(f, "   a   b   c   d   e   f   g   h")
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_grid(f, self, SquareSet::default())?;
        writeln!(f)?;
        writeln!(f, "Layout: {}", self.to_layout())?;

        Ok(())
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let opponent = self.config.opponent();
        let human = self.config.human;

        writeln!(
            f,
            "{opponent} {}  captured: {}",
            format_clock(self.clocks.get(opponent)),
            glyphs(self.captured.get(human))
        )?;
        write_grid(f, &self.board, self.highlighted)?;
        writeln!(
            f,
            "{human} {}  captured: {}",
            format_clock(self.clocks.get(human)),
            glyphs(self.captured.get(opponent))
        )?;

        match self.termination {
            Some(termination) => writeln!(f, "{termination}"),
            None if !self.started => writeln!(f, "Not started"),
            None => writeln!(f, "{} to move", self.side_to_move),
        }
    }
}

fn glyphs(pieces: &[Piece]) -> String {
    if pieces.is_empty() {
        return "-".to_string();
    }

    pieces.iter().map(|p| p.glyph()).collect()
}

impl Display for PuzzleTrainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marked = self.selected().into_iter().collect::<SquareSet>();
        write_grid(f, self.board(), marked)?;

        if !self.history().is_empty() {
            writeln!(f, "Moves: {}", self.history().join(" "))?;
        }
        writeln!(f, "Hints: {}  Score: {}", self.hints(), self.score())?;
        if self.is_solved() {
            writeln!(f, "Solved")?;
        }

        Ok(())
    }
}
