use anyhow::{anyhow, Result};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::one_of,
    combinator::{all_consuming, map, opt, value},
    sequence::{delimited, pair, separated_pair},
    IResult,
};

use crate::game::{BoardPos, CoordTyp};

fn sp(i: &str) -> IResult<&str, &str> {
    let chars = " \t\r\n";

    take_while(move |c| chars.contains(c))(i)
}

fn file(i: &str) -> IResult<&str, CoordTyp> {
    map(one_of("abcdefgh"), |c| c as CoordTyp - b'a')(i)
}

fn rank(i: &str) -> IResult<&str, CoordTyp> {
    map(one_of("12345678"), |c| c as CoordTyp - b'0')(i)
}

pub(crate) fn board_pos(i: &str) -> IResult<&str, BoardPos> {
    map(pair(file, rank), |(f, r)| BoardPos::from_file_rank(f, r))(i)
}

fn move_separator(i: &str) -> IResult<&str, ()> {
    alt((
        value((), delimited(sp, tag("-"), sp)),
        value((), delimited(sp, opt(tag("x")), sp)),
    ))(i)
}

fn coordinate_move(i: &str) -> IResult<&str, (BoardPos, BoardPos)> {
    delimited(sp, separated_pair(board_pos, move_separator, board_pos), sp)(i)
}

/// Reads `e2-e4`, `e2e4`, `e2 e4` or `e4xd5` into its two squares.
pub fn parse_coordinate_move(src: &str) -> Result<(BoardPos, BoardPos)> {
    all_consuming(coordinate_move)(src)
        .map(|(_, squares)| squares)
        .map_err(|e| anyhow!("Invalid move {src:?}: {e}"))
}

/// Reads a single square such as `e2`.
pub fn parse_square(src: &str) -> Result<BoardPos> {
    all_consuming(delimited(sp, board_pos, sp))(src)
        .map(|(_, pos)| pos)
        .map_err(|e| anyhow!("Invalid square {src:?}: {e}"))
}
