#[cfg(test)]
mod layout {
    use chess_practice_core::{
        game::{Board, BoardPos, Color, Piece, PieceKind},
        layout::{parse_layout, to_layout},
    };

    #[test]
    fn default() {
        let board = parse_layout(Board::STARTING_LAYOUT);
        assert_eq!(board, Board::default());
        assert_eq!(to_layout(&board), Board::STARTING_LAYOUT);
    }

    #[test]
    fn starting_position_contents() {
        let board = Board::default();

        assert_eq!(board[BoardPos::new(0, 4)], Some(Piece::black(PieceKind::King)));
        assert_eq!(board[BoardPos::new(7, 3)], Some(Piece::white(PieceKind::Queen)));
        assert_eq!(board.pieces(Color::White).count(), 16);
        assert_eq!(board.pieces(Color::Black).count(), 16);
        assert!(BoardPos::all()
            .filter(|p| (2..6).contains(&p.row))
            .all(|p| board[p].is_none()));
    }

    #[test]
    fn queen_and_kings() {
        let board = parse_layout("4k3/8/8/8/8/8/4Q3/4K3");

        let occupied = BoardPos::all()
            .filter_map(|p| board[p].map(|piece| (p, piece)))
            .collect::<Vec<_>>();

        assert_eq!(
            occupied,
            vec![
                (BoardPos::new(0, 4), Piece::black(PieceKind::King)),
                (BoardPos::new(6, 4), Piece::white(PieceKind::Queen)),
                (BoardPos::new(7, 4), Piece::white(PieceKind::King)),
            ]
        );
    }

    #[test]
    fn round_trip_puzzle_layouts() {
        for layout in [
            "4k3/8/8/8/8/8/4Q3/4K3",
            "4k3/8/8/3r4/8/2N5/8/4K3",
            "6k1/5ppp/8/8/8/8/5PPP/3Q2K1",
        ] {
            assert_eq!(to_layout(&parse_layout(layout)), layout);
        }
    }

    #[test]
    fn short_layout_leaves_the_rest_empty() {
        let board = parse_layout("k");

        assert_eq!(board[BoardPos::new(0, 0)], Some(Piece::black(PieceKind::King)));
        assert_eq!(BoardPos::all().filter(|&p| board[p].is_some()).count(), 1);
        assert_eq!(to_layout(&board), "k7/8/8/8/8/8/8/8");
    }

    #[test]
    fn overfilled_row_is_truncated() {
        let board = parse_layout("7rr/6QQQ");

        assert_eq!(board[BoardPos::new(0, 7)], Some(Piece::black(PieceKind::Rook)));
        assert_eq!(board[BoardPos::new(1, 6)], Some(Piece::white(PieceKind::Queen)));
        assert_eq!(board[BoardPos::new(1, 7)], Some(Piece::white(PieceKind::Queen)));
        assert_eq!(BoardPos::all().filter(|&p| board[p].is_some()).count(), 3);
    }

    #[test]
    fn extra_segments_are_ignored() {
        let board = parse_layout("8/8/8/8/8/8/8/8/KKKK");
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn unknown_characters_leave_a_gap() {
        let board = parse_layout("kx6/8/8/8/8/8/8/K7");

        assert_eq!(board[BoardPos::new(0, 0)], Some(Piece::black(PieceKind::King)));
        assert_eq!(board[BoardPos::new(0, 1)], None);
        assert_eq!(board[BoardPos::new(7, 0)], Some(Piece::white(PieceKind::King)));
    }
}
