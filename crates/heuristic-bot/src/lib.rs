//! Single-ply heuristic opponent.
//!
//! Every candidate move gets a static score plus a little random jitter, and
//! the difficulty decides how the final pick is sampled from the scored list.
//! There is no lookahead: replies to the chosen move are never considered.

use std::cmp::Ordering;

use chess_practice_core::{
    config::Difficulty,
    game::{Board, Color, Move, PieceKind},
    Engine,
};
use rand::{
    distributions::{Distribution, WeightedIndex},
    rngs::StdRng,
    Rng, SeedableRng,
};
use tracing::{debug, warn};

const CAPTURE_WEIGHT: f64 = 10.0;
const CENTER_BONUS: f64 = 3.0;
const DEVELOPMENT_BONUS: f64 = 2.0;
const PAWN_ADVANCE_WEIGHT: f64 = 0.5;
const MAX_JITTER: f64 = 2.0;

const BLUNDER_CHANCE: f64 = 0.3;
const MEDIUM_TOP_SHARE: f64 = 0.6;
const HARD_TOP_SHARE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: f64,
}

/// Deterministic part of the score.
pub fn score_move(board: &Board, mv: &Move) -> f64 {
    let mut score = 0.0;

    if let Some(target) = board.get(mv.to) {
        score += f64::from(target.kind.value()) * CAPTURE_WEIGHT;
    }

    if mv.to.is_center() {
        score += CENTER_BONUS;
    }

    let color = mv.piece.color;
    match mv.piece.kind {
        PieceKind::Knight | PieceKind::Bishop if mv.from.row == color.back_row() => {
            score += DEVELOPMENT_BONUS;
        }
        PieceKind::Pawn => {
            let advanced = mv.to.row.abs_diff(color.back_row());
            score += f64::from(advanced) * PAWN_ADVANCE_WEIGHT;
        }
        _ => {}
    }

    score
}

/// All moves for `side` with their jittered scores, in generation order.
pub fn score_candidates(board: &Board, side: Color, rng: &mut impl Rng) -> Vec<ScoredMove> {
    board
        .generate_moves(side)
        .into_iter()
        .map(|mv| ScoredMove {
            score: score_move(board, &mv) + rng.gen_range(0.0..MAX_JITTER),
            mv,
        })
        .collect()
}

fn by_score(a: &ScoredMove, b: &ScoredMove) -> Ordering {
    a.score.total_cmp(&b.score)
}

fn share(n: usize, fraction: f64) -> usize {
    ((n as f64 * fraction).ceil() as usize).clamp(1, n)
}

/// Samples one candidate according to `difficulty`. `None` only for an empty
/// list.
pub fn pick(
    mut candidates: Vec<ScoredMove>,
    difficulty: Difficulty,
    rng: &mut impl Rng,
) -> Option<ScoredMove> {
    if candidates.is_empty() {
        return None;
    }

    let n = candidates.len();
    match difficulty {
        Difficulty::Easy => {
            if rng.gen_bool(BLUNDER_CHANCE) {
                return Some(candidates[rng.gen_range(0..n)]);
            }

            candidates.sort_by(by_score);
            let weaker = share(n, 0.5);
            Some(candidates[rng.gen_range(0..weaker)])
        }
        Difficulty::Medium => {
            candidates.sort_by(|a, b| by_score(b, a));
            let top = share(n, MEDIUM_TOP_SHARE);
            Some(candidates[rng.gen_range(0..top)])
        }
        Difficulty::Hard => {
            candidates.sort_by(|a, b| by_score(b, a));
            let top = share(n, HARD_TOP_SHARE);
            let weights = (0..top).map(|i| 2f64.powi((top - i) as i32));

            match WeightedIndex::new(weights) {
                Ok(dist) => Some(candidates[dist.sample(rng)]),
                Err(e) => {
                    warn!(%e, top, "falling back to the best candidate");
                    Some(candidates[0])
                }
            }
        }
    }
}

pub fn select_move(
    board: &Board,
    side: Color,
    difficulty: Difficulty,
    rng: &mut impl Rng,
) -> Option<Move> {
    let candidates = score_candidates(board, side, rng);
    let count = candidates.len();
    let chosen = pick(candidates, difficulty, rng)?;

    debug!(
        %side,
        %difficulty,
        candidates = count,
        mv = %chosen.mv,
        score = chosen.score,
        "selected move"
    );

    Some(chosen.mv)
}

pub struct HeuristicEngine<R: Rng = StdRng> {
    difficulty: Difficulty,
    rng: R,
}

impl HeuristicEngine {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, StdRng::from_entropy())
    }

    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(difficulty, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> HeuristicEngine<R> {
    pub fn with_rng(difficulty: Difficulty, rng: R) -> Self {
        Self { difficulty, rng }
    }
}

impl<R: Rng> Engine for HeuristicEngine<R> {
    fn select_move(&mut self, board: &Board, side: Color) -> Option<Move> {
        select_move(board, side, self.difficulty, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use chess_practice_core::game::{BoardPos, Piece};

    use super::*;

    fn mv(board: &Board, from: &str, to: &str) -> Move {
        let from: BoardPos = from.parse().unwrap();
        let to: BoardPos = to.parse().unwrap();
        Move::new(from, to, board[from].unwrap())
    }

    #[test]
    fn opening_scores() {
        let board = Board::default();

        assert_eq!(score_move(&board, &mv(&board, "e2", "e4")), 3.0 + 1.5);
        assert_eq!(score_move(&board, &mv(&board, "a2", "a3")), 1.0);
        assert_eq!(score_move(&board, &mv(&board, "g1", "f3")), 2.0);
    }

    #[test]
    fn pawn_advancement_is_relative_to_the_mover() {
        let board = Board::default();

        assert_eq!(score_move(&board, &mv(&board, "a7", "a6")), 1.0);
        assert_eq!(score_move(&board, &mv(&board, "d7", "d5")), 3.0 + 1.5);
    }

    #[test]
    fn capture_scores_by_value() {
        let mut board = Board::empty();
        board.set("d1".parse().unwrap(), Some(Piece::white(PieceKind::Rook)));
        board.set("d5".parse().unwrap(), Some(Piece::black(PieceKind::Queen)));
        board.set("d8".parse().unwrap(), Some(Piece::black(PieceKind::Rook)));

        // d5 is a central square
        assert_eq!(score_move(&board, &mv(&board, "d1", "d5")), 93.0);
        assert_eq!(score_move(&board, &mv(&board, "d5", "d1")), 50.0);
    }

    #[test]
    fn jitter_stays_below_two() {
        let board = Board::default();
        let mut rng = StdRng::seed_from_u64(7);

        for scored in score_candidates(&board, Color::White, &mut rng) {
            let base = score_move(&board, &scored.mv);
            assert!(scored.score >= base && scored.score < base + MAX_JITTER);
        }
    }

    #[test]
    fn share_is_at_least_one() {
        assert_eq!(share(1, HARD_TOP_SHARE), 1);
        assert_eq!(share(10, HARD_TOP_SHARE), 3);
        assert_eq!(share(10, MEDIUM_TOP_SHARE), 6);
        assert_eq!(share(7, 0.5), 4);
    }
}
