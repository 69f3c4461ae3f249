#[cfg(test)]
mod movegen {
    use chess_practice_core::{
        game::{Board, BoardPos, Color, Piece, PieceKind},
        util::SquareSet,
    };

    fn sq(s: &str) -> BoardPos {
        s.parse().unwrap()
    }

    fn squares(list: &[&str]) -> SquareSet {
        list.iter().map(|s| sq(s)).collect()
    }

    fn lone(piece: Piece, at: &str) -> Board {
        let mut board = Board::empty();
        board.set(sq(at), Some(piece));
        board
    }

    #[test]
    fn empty_square_has_no_destinations() {
        assert!(Board::default().legal_destinations(sq("e4")).is_empty());
    }

    #[test]
    fn destinations_never_hold_own_pieces() {
        for layout in [
            Board::STARTING_LAYOUT,
            "4k3/8/8/3r4/8/2N5/8/4K3",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
        ] {
            let board = Board::from_layout(layout);
            for pos in BoardPos::all() {
                let Some(piece) = board[pos] else {
                    continue;
                };

                for dest in board.legal_destinations(pos).iter() {
                    assert!(dest.is_valid());
                    assert_ne!(dest, pos);
                    assert!(
                        !board[dest].is_some_and(|p| p.color == piece.color),
                        "{piece} on {pos} may land on own piece at {dest}"
                    );
                }
            }
        }
    }

    #[test]
    fn knight_in_corner() {
        let board = lone(Piece::white(PieceKind::Knight), "a1");
        assert_eq!(board.legal_destinations(sq("a1")), squares(&["b3", "c2"]));
    }

    #[test]
    fn king_in_the_middle() {
        let board = lone(Piece::black(PieceKind::King), "e5");
        let destinations = board.legal_destinations(sq("e5"));

        assert_eq!(destinations.len(), 8);
        assert!(!destinations.contains(sq("e5")));
    }

    #[test]
    fn rook_stops_at_blockers() {
        let mut board = lone(Piece::white(PieceKind::Rook), "a1");
        board.set(sq("a4"), Some(Piece::white(PieceKind::Pawn)));
        board.set(sq("d1"), Some(Piece::black(PieceKind::Pawn)));

        assert_eq!(
            board.legal_destinations(sq("a1")),
            squares(&["a2", "a3", "b1", "c1", "d1"])
        );
    }

    #[test]
    fn queen_captures_but_does_not_jump() {
        let mut board = lone(Piece::white(PieceKind::Queen), "d1");
        board.set(sq("d7"), Some(Piece::black(PieceKind::Pawn)));

        let destinations = board.legal_destinations(sq("d1"));
        assert!(destinations.contains(sq("d7")));
        assert!(!destinations.contains(sq("d8")));
        assert!(destinations.contains(sq("h5")));
        assert!(destinations.contains(sq("a4")));
    }

    #[test]
    fn bishops_are_blocked_in_the_opening() {
        let board = Board::default();
        assert!(board.legal_destinations(sq("c1")).is_empty());
        assert!(board.legal_destinations(sq("f8")).is_empty());
    }

    #[test]
    fn pawn_double_step() {
        let board = Board::default();
        assert_eq!(board.legal_destinations(sq("e2")), squares(&["e3", "e4"]));
        assert_eq!(board.legal_destinations(sq("d7")), squares(&["d6", "d5"]));

        let moved = lone(Piece::white(PieceKind::Pawn), "e3");
        assert_eq!(moved.legal_destinations(sq("e3")), squares(&["e4"]));
    }

    #[test]
    fn pawn_double_step_needs_both_squares() {
        let mut board = Board::default();
        board.set(sq("e4"), Some(Piece::black(PieceKind::Knight)));
        assert_eq!(board.legal_destinations(sq("e2")), squares(&["e3"]));

        board.set(sq("e3"), Some(Piece::black(PieceKind::Knight)));
        assert!(board.legal_destinations(sq("e2")).is_empty());
    }

    #[test]
    fn pawn_captures_diagonally_only() {
        let mut board = lone(Piece::white(PieceKind::Pawn), "e4");
        board.set(sq("e5"), Some(Piece::black(PieceKind::Pawn)));
        board.set(sq("d5"), Some(Piece::black(PieceKind::Pawn)));
        board.set(sq("f5"), Some(Piece::white(PieceKind::Pawn)));

        assert_eq!(board.legal_destinations(sq("e4")), squares(&["d5"]));
    }

    #[test]
    fn pawn_on_last_row_is_stuck() {
        let board = lone(Piece::black(PieceKind::Pawn), "a1");
        assert!(board.legal_destinations(sq("a1")).is_empty());
    }

    #[test]
    fn generate_moves_in_square_order() {
        let board = Board::default();
        let moves = board.generate_moves(Color::White);

        assert_eq!(moves.len(), 20);
        assert_eq!(moves[0].coordinates(), "a2-a4");
        assert!(moves.iter().all(|m| m.piece.color == Color::White));
        assert!(moves.windows(2).all(|w| w[0].from <= w[1].from));
    }

    #[test]
    fn kings_only_still_have_moves() {
        let board = Board::from_layout("4k3/8/8/8/8/8/8/4K3");
        assert!(board.has_any_valid_moves(Color::Black));
        assert!(board.has_any_valid_moves(Color::White));
    }

    #[test]
    fn blocked_side_has_no_moves() {
        // black pawn on a5 is blocked by a white pawn on a4
        let board = Board::from_layout("8/8/8/p7/P7/8/8/K7");
        assert!(!board.has_any_valid_moves(Color::Black));
        assert!(board.has_any_valid_moves(Color::White));
    }
}
