use crate::{
    game::{Board, BoardPos, Color, CoordOffsetTyp, Move, Piece, PieceKind},
    util::{add_board_offset, SquareSet},
};

#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct MoveGenDiagnostics {
    pub captures: usize,
    pub sliding_moves: usize,
    pub pawn_moves: usize,
    pub offsetting_moves: usize,
}

impl MoveGenDiagnostics {
    pub fn total(&self) -> usize {
        self.sliding_moves + self.pawn_moves + self.offsetting_moves
    }
}

impl std::ops::Add for MoveGenDiagnostics {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            captures: self.captures + rhs.captures,
            sliding_moves: self.sliding_moves + rhs.sliding_moves,
            pawn_moves: self.pawn_moves + rhs.pawn_moves,
            offsetting_moves: self.offsetting_moves + rhs.offsetting_moves,
        }
    }
}

impl std::ops::AddAssign for MoveGenDiagnostics {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.clone() + rhs;
    }
}

const ROOK_OFFSETS: [(CoordOffsetTyp, CoordOffsetTyp); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_OFFSETS: [(CoordOffsetTyp, CoordOffsetTyp); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const QUEEN_OFFSETS: [(CoordOffsetTyp, CoordOffsetTyp); 8] = [
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
];

const KNIGHT_OFFSETS: [(CoordOffsetTyp, CoordOffsetTyp); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(CoordOffsetTyp, CoordOffsetTyp); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl Board {
    fn generate_sliding_destinations(
        &self,
        pos: BoardPos,
        piece: Piece,
        diagnostics: &mut MoveGenDiagnostics,
    ) -> SquareSet {
        let rays: &[(CoordOffsetTyp, CoordOffsetTyp)] = match piece.kind {
            PieceKind::Rook => &ROOK_OFFSETS,
            PieceKind::Bishop => &BISHOP_OFFSETS,
            PieceKind::Queen => &QUEEN_OFFSETS,
            // Piece is not sliding
            _ => return SquareSet::default(),
        };

        let mut destinations = SquareSet::default();

        for &offset in rays {
            let mut current_pos = pos.add_offset(offset);

            while let Some(p) = current_pos {
                match self[p] {
                    None => {
                        destinations.insert(p);
                        current_pos = p.add_offset(offset);
                    }
                    Some(target) => {
                        if target.is_opponent(piece.color) {
                            destinations.insert(p);
                            diagnostics.captures += 1;
                        }
                        break;
                    }
                }
            }
        }

        diagnostics.sliding_moves += destinations.len();
        destinations
    }

    fn generate_pawn_destinations(
        &self,
        pos: BoardPos,
        piece: Piece,
        diagnostics: &mut MoveGenDiagnostics,
    ) -> SquareSet {
        let mut destinations = SquareSet::default();
        let forward = piece.color.forward();

        let Some(row) = add_board_offset(pos.row, forward) else {
            // Pawn already stands on the last row
            return destinations;
        };

        // Square in front of pawn
        let single = BoardPos::new(row, pos.col);
        if self[single].is_none() {
            destinations.insert(single);

            // Double step only from the starting row and only through an empty square
            if pos.row == piece.color.pawn_row() {
                if let Some(double) = pos.add_offset((forward * 2, 0)) {
                    if self[double].is_none() {
                        destinations.insert(double);
                    }
                }
            }
        }

        // Take to both sides
        for side in [-1, 1] {
            let Some(col) = add_board_offset(pos.col, side) else {
                continue;
            };

            let target = BoardPos::new(row, col);
            if self[target].is_some_and(|p| p.is_opponent(piece.color)) {
                destinations.insert(target);
                diagnostics.captures += 1;
            }
        }

        diagnostics.pawn_moves += destinations.len();
        destinations
    }

    fn generate_offsetting_destinations(
        &self,
        pos: BoardPos,
        piece: Piece,
        diagnostics: &mut MoveGenDiagnostics,
    ) -> SquareSet {
        let offsets = match piece.kind {
            PieceKind::Knight => KNIGHT_OFFSETS,
            PieceKind::King => KING_OFFSETS,
            // Piece is not king or knight
            _ => return SquareSet::default(),
        };

        let mut destinations = SquareSet::default();
        for offset in offsets {
            let Some(dest) = pos.add_offset(offset) else {
                continue;
            };

            match self[dest] {
                None => destinations.insert(dest),
                Some(target) if target.is_opponent(piece.color) => {
                    destinations.insert(dest);
                    diagnostics.captures += 1;
                }
                Some(_) => {}
            }
        }

        diagnostics.offsetting_moves += destinations.len();
        destinations
    }

    pub fn destinations_with_diagnostics(
        &self,
        pos: BoardPos,
        diagnostics: &mut MoveGenDiagnostics,
    ) -> SquareSet {
        let Some(piece) = self.get(pos) else {
            return SquareSet::default();
        };

        match piece.kind {
            PieceKind::Pawn => self.generate_pawn_destinations(pos, piece, diagnostics),
            PieceKind::Knight | PieceKind::King => {
                self.generate_offsetting_destinations(pos, piece, diagnostics)
            }
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                self.generate_sliding_destinations(pos, piece, diagnostics)
            }
        }
    }

    /// Pseudo-legal destinations of the piece on `pos`. Moves that leave the
    /// mover's own king attacked are included; an empty square yields nothing.
    pub fn legal_destinations(&self, pos: BoardPos) -> SquareSet {
        self.destinations_with_diagnostics(pos, &mut MoveGenDiagnostics::default())
    }

    /// Every move available to `side`, ordered by origin square then destination.
    pub fn generate_moves(&self, side: Color) -> Vec<Move> {
        self.generate_moves_with_diagnostics(side, &mut MoveGenDiagnostics::default())
    }

    pub fn generate_moves_with_diagnostics(
        &self,
        side: Color,
        diagnostics: &mut MoveGenDiagnostics,
    ) -> Vec<Move> {
        let mut moves = vec![];

        for (from, piece) in self.pieces(side) {
            moves.extend(
                self.destinations_with_diagnostics(from, diagnostics)
                    .iter()
                    .map(|to| Move::new(from, to, piece)),
            );
        }

        moves
    }

    /// Whether any piece of `side` has at least one destination. This is the
    /// only game-over probe: no destinations means the other side has won.
    pub fn has_any_valid_moves(&self, side: Color) -> bool {
        self.pieces(side)
            .any(|(pos, _)| !self.legal_destinations(pos).is_empty())
    }
}
