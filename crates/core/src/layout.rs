//! Simplified board layouts: the piece-placement field of a FEN string, with
//! none of its validation. Used for puzzle positions and the starting position.

use nom::{
    branch::alt,
    character::complete::{char, none_of, satisfy},
    combinator::map,
    multi::{many0, separated_list0},
    IResult,
};
use tracing::warn;

use crate::game::{Board, BoardPos, CoordTyp, Piece};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum LayoutToken {
    Skip(CoordTyp),
    Square(char),
}

fn token(i: &str) -> IResult<&str, LayoutToken> {
    alt((
        map(satisfy(|c| c.is_ascii_digit()), |c| {
            LayoutToken::Skip(c as CoordTyp - b'0')
        }),
        map(none_of("/"), LayoutToken::Square),
    ))(i)
}

fn segment(i: &str) -> IResult<&str, Vec<LayoutToken>> {
    many0(token)(i)
}

fn segments(i: &str) -> IResult<&str, Vec<Vec<LayoutToken>>> {
    separated_list0(char('/'), segment)(i)
}

/// Reads a layout such as `4k3/8/8/8/8/8/4Q3/4K3` into a board.
///
/// Segment `n` fills row `n`, starting at the a-file. Rank and file totals are
/// not checked: squares past the h-file and segments past the eighth are
/// dropped, short segments leave the rest of their row empty.
pub fn parse_layout(layout: &str) -> Board {
    let mut board = Board::empty();

    let rows = match segments(layout) {
        Ok((_, rows)) => rows,
        Err(e) => {
            warn!(layout, error = %e, "unreadable layout, using an empty board");
            return board;
        }
    };

    for (row, tokens) in rows.iter().take(8).enumerate() {
        let mut col: usize = 0;

        for &token in tokens {
            match token {
                LayoutToken::Skip(n) => col += n as usize,
                LayoutToken::Square(c) => {
                    match Piece::from_char(c) {
                        Some(piece) if col < 8 => {
                            board[BoardPos::new(row as CoordTyp, col as CoordTyp)] = Some(piece)
                        }
                        Some(_) => {}
                        None => warn!(layout, character = %c, "ignoring unknown layout character"),
                    }
                    col += 1;
                }
            }
        }
    }

    board
}

pub fn to_layout(board: &Board) -> String {
    (0..8)
        .map(|row| {
            let mut row_str = String::new();

            let mut consecutive_empty = 0;
            for col in 0..8 {
                match board[BoardPos::new(row, col)] {
                    None => consecutive_empty += 1,
                    Some(piece) => {
                        if consecutive_empty > 0 {
                            row_str.push_str(&consecutive_empty.to_string());
                            consecutive_empty = 0;
                        }

                        row_str.push(piece.to_char());
                    }
                }
            }

            if consecutive_empty > 0 {
                row_str.push_str(&consecutive_empty.to_string());
            }

            row_str
        })
        .collect::<Vec<_>>()
        .join("/")
}
