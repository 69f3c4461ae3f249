use std::{
    fmt::{Display, Formatter},
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout;

pub type CoordTyp = u8;
pub type CoordOffsetTyp = i8;

type BoardData = [[Option<Piece>; 8]; 8];

/// 8x8 grid of squares. Row 0 is the black side (rank 8), column 0 is the a-file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: BoardData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Color {
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row direction this side's pawns advance in.
    pub const fn forward(self) -> CoordOffsetTyp {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub const fn pawn_row(self) -> CoordTyp {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    pub const fn back_row(self) -> CoordTyp {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub const fn promotion_row(self) -> CoordTyp {
        self.opposite().back_row()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Color::White),
            "black" | "b" => Ok(Color::Black),
            _ => Err(anyhow!("Invalid color: {s}")),
        }
    }
}

impl PieceKind {
    /// Material value used when scoring captures. The king is never "worth" anything.
    pub const fn value(self) -> u32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    pub const fn white(kind: PieceKind) -> Self {
        Self::new(kind, Color::White)
    }

    pub const fn black(kind: PieceKind) -> Self {
        Self::new(kind, Color::Black)
    }

    pub fn is_opponent(self, side: Color) -> bool {
        self.color != side
    }

    pub fn is_playing(self, side: Color) -> bool {
        self.color == side
    }

    pub fn is_pawn(self) -> bool {
        self.kind == PieceKind::Pawn
    }

    /// Case-sensitive algebraic letter, uppercase for white.
    pub fn to_char(self) -> char {
        match self.color {
            Color::White => self.kind.letter(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        let kind = match c.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };

        Some(Self::new(kind, color))
    }

    pub fn glyph(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl FromStr for Piece {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Piece::from_char(c).ok_or_else(|| anyhow!("Invalid piece: {s}")),
            _ => Err(anyhow!("Invalid piece: {s}")),
        }
    }
}

impl Board {
    pub const STARTING_LAYOUT: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    pub fn from_layout(layout: &str) -> Self {
        layout::parse_layout(layout)
    }

    pub fn to_layout(&self) -> String {
        layout::to_layout(self)
    }

    pub fn get(&self, pos: BoardPos) -> Option<Piece> {
        if pos.is_valid() {
            return self[pos];
        }

        None
    }

    pub fn set(&mut self, pos: BoardPos, piece: Option<Piece>) {
        if pos.is_valid() {
            self[pos] = piece;
        }
    }

    /// Occupied squares of one side, in row-major order.
    pub fn pieces(&self, side: Color) -> impl Iterator<Item = (BoardPos, Piece)> + '_ {
        BoardPos::all().filter_map(move |pos| {
            self[pos]
                .filter(|piece| piece.is_playing(side))
                .map(|piece| (pos, piece))
        })
    }

    /// Moves whatever stands on `from` to `to` and returns the piece that was
    /// standing on `to`. A pawn arriving on its promotion row becomes a queen.
    ///
    /// Legality is not checked here; callers only pass destinations produced by
    /// [`Board::legal_destinations`].
    pub fn make_move(&mut self, from: BoardPos, to: BoardPos) -> Option<Piece> {
        let Some(piece) = self.get(from) else {
            debug!(%from, %to, "ignoring move from an empty square");
            return None;
        };

        let captured = self.get(to);

        self[to] = Some(if piece.is_pawn() && to.row == piece.color.promotion_row() {
            Piece::new(PieceKind::Queen, piece.color)
        } else {
            piece
        });
        self[from] = None;

        debug!(
            piece = %piece,
            %from,
            %to,
            captured = ?captured.map(|p| p.to_char()),
            "applied move"
        );

        captured
    }

    /// Pure form of [`Board::make_move`].
    pub fn apply_move(&self, m: &Move) -> (Board, Option<Piece>) {
        let mut next = self.clone();
        let captured = next.make_move(m.from, m.to);
        (next, captured)
    }
}

impl Index<BoardPos> for Board {
    type Output = Option<Piece>;

    fn index(&self, index: BoardPos) -> &Self::Output {
        &self.squares[index.row as usize][index.col as usize]
    }
}

impl IndexMut<BoardPos> for Board {
    fn index_mut(&mut self, index: BoardPos) -> &mut Self::Output {
        &mut self.squares[index.row as usize][index.col as usize]
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::from_layout(Self::STARTING_LAYOUT)
    }
}

pub(crate) fn char_to_file(c: char) -> Result<CoordTyp> {
    match c {
        'a'..='h' => Ok(c as CoordTyp - b'a'),
        _ => Err(anyhow!("Invalid file: {c}")),
    }
}

pub(crate) fn file_to_char(f: CoordTyp) -> char {
    (b'a' + f) as char
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, PartialOrd, Ord)]
pub struct BoardPos {
    pub row: CoordTyp,
    pub col: CoordTyp,
}

impl BoardPos {
    pub const fn new(row: CoordTyp, col: CoordTyp) -> Self {
        Self { row, col }
    }

    /// Square from algebraic file (0 = a) and rank (1..=8).
    pub const fn from_file_rank(file: CoordTyp, rank: CoordTyp) -> Self {
        Self {
            row: 8 - rank,
            col: file,
        }
    }

    pub const fn rank(&self) -> CoordTyp {
        8 - self.row
    }

    pub const fn is_valid(&self) -> bool {
        self.row < 8 && self.col < 8
    }

    pub fn add_offset(&self, offset: (CoordOffsetTyp, CoordOffsetTyp)) -> Option<Self> {
        let p = Self {
            row: self.row.checked_add_signed(offset.0)?,
            col: self.col.checked_add_signed(offset.1)?,
        };

        if !p.is_valid() {
            return None;
        }

        Some(p)
    }

    pub fn all() -> impl Iterator<Item = BoardPos> {
        (0..8).flat_map(|row| (0..8).map(move |col| BoardPos::new(row, col)))
    }

    pub fn is_center(&self) -> bool {
        (3..=4).contains(&self.row) && (3..=4).contains(&self.col)
    }
}

impl Display for BoardPos {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", file_to_char(self.col), self.rank())
    }
}

impl FromStr for BoardPos {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(anyhow!("Invalid board position: {s}"));
        };

        let rank = rank
            .to_digit(10)
            .filter(|r| (1..=8).contains(r))
            .context(format!("Invalid rank in {s}"))?;

        Ok(Self::from_file_rank(char_to_file(file)?, rank as CoordTyp))
    }
}

/// A move as shown in the history: the moving piece plus its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: BoardPos,
    pub to: BoardPos,
    pub piece: Piece,
}

impl Move {
    pub fn new(from: BoardPos, to: BoardPos, piece: Piece) -> Self {
        Self { from, to, piece }
    }

    /// `e2-e4`, without the piece glyph.
    pub fn coordinates(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}-{}", self.piece.glyph(), self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_letters() {
        assert_eq!("N".parse::<Piece>().unwrap(), Piece::white(PieceKind::Knight));
        assert_eq!(Piece::from_char('q'), Some(Piece::black(PieceKind::Queen)));
        assert_eq!(Piece::from_char('x'), None);
        assert!("Kk".parse::<Piece>().is_err());
        assert_eq!(Piece::black(PieceKind::Rook).to_string(), "r");
    }

    #[test]
    fn board_positions() {
        let pos: BoardPos = "a8".parse().unwrap();
        assert_eq!(pos, BoardPos::new(0, 0));
        assert_eq!(BoardPos::new(6, 4).to_string(), "e2");
        assert_eq!(BoardPos::new(6, 4).rank(), 2);

        assert!("i1".parse::<BoardPos>().is_err());
        assert!("a9".parse::<BoardPos>().is_err());
        assert!("e".parse::<BoardPos>().is_err());
        assert!("e22".parse::<BoardPos>().is_err());
    }

    #[test]
    fn center_squares() {
        let center = BoardPos::all().filter(BoardPos::is_center).collect::<Vec<_>>();
        assert_eq!(center.len(), 4);
        assert!(center.contains(&"d4".parse().unwrap()));
        assert!(center.contains(&"e5".parse().unwrap()));
    }

    #[test]
    fn move_from_empty_square_is_a_no_op() {
        let mut board = Board::default();
        assert_eq!(board.make_move(BoardPos::new(4, 4), BoardPos::new(3, 4)), None);
        assert_eq!(board, Board::default());
    }

    #[test]
    fn apply_move_is_pure() {
        let board = Board::from_layout("4k3/8/8/3q4/8/8/8/3RK3");
        let m = Move::new(
            "d1".parse().unwrap(),
            "d5".parse().unwrap(),
            Piece::white(PieceKind::Rook),
        );

        let (next, captured) = board.apply_move(&m);
        assert_eq!(captured, Some(Piece::black(PieceKind::Queen)));
        assert_eq!(next["d5".parse::<BoardPos>().unwrap()], Some(Piece::white(PieceKind::Rook)));
        assert_eq!(board["d5".parse::<BoardPos>().unwrap()], Some(Piece::black(PieceKind::Queen)));
        assert_eq!(m.to_string(), "♖ d1-d5");
        assert_eq!(m.coordinates(), "d1-d5");
    }

    #[test]
    fn black_pawn_promotes_on_row_seven() {
        let mut board = Board::from_layout("8/8/8/8/8/8/p7/8");
        board.make_move(BoardPos::new(6, 0), BoardPos::new(7, 0));
        assert_eq!(board[BoardPos::new(7, 0)], Some(Piece::black(PieceKind::Queen)));
    }
}
