use crate::{
    game::{Board, Color},
    movegen::MoveGenDiagnostics,
};

/// Perft over the practice rules: counts the move sequences of length
/// `depth + 1` starting with `side`. A line stops early when the side to move
/// has nothing to play.
pub fn gen_node_nums(board: &Board, side: Color, depth: usize) -> (MoveGenDiagnostics, usize) {
    let mut diagnostics = MoveGenDiagnostics::default();
    let moves = board.generate_moves_with_diagnostics(side, &mut diagnostics);
    if depth == 0 || moves.is_empty() {
        return (diagnostics, moves.len());
    }

    let mut move_count = 0;

    for m in moves {
        let (board_clone, _) = board.apply_move(&m);
        let (c, d) = gen_node_nums(&board_clone, side.opposite(), depth - 1);
        move_count += d;
        diagnostics += c;
    }

    (diagnostics, move_count)
}
