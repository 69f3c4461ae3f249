use std::ops::Index;

use crate::game::{BoardPos, CoordOffsetTyp, CoordTyp};

pub fn add_board_offset(c: CoordTyp, o: CoordOffsetTyp) -> Option<CoordTyp> {
    c.checked_add_signed(o).filter(|&x| x < 8)
}

/// Set of board squares, one bit per square in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SquareSet(pub u64);

impl SquareSet {
    fn index(pos: BoardPos) -> usize {
        (pos.row * 8 + pos.col) as usize
    }

    pub fn insert(&mut self, pos: BoardPos) {
        self.0 |= 1 << Self::index(pos);
    }

    pub fn remove(&mut self, pos: BoardPos) {
        self.0 &= !(1 << Self::index(pos));
    }

    pub fn contains(&self, pos: BoardPos) -> bool {
        (self.0 >> Self::index(pos)) & 1 == 1
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Squares in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = BoardPos> {
        let bits = self.0;
        (0..64u8)
            .filter(move |i| (bits >> i) & 1 == 1)
            .map(|i| BoardPos::new(i / 8, i % 8))
    }
}

impl FromIterator<BoardPos> for SquareSet {
    fn from_iter<T: IntoIterator<Item = BoardPos>>(iter: T) -> Self {
        let mut set = SquareSet::default();
        for pos in iter {
            set.insert(pos);
        }
        set
    }
}

impl Index<BoardPos> for SquareSet {
    type Output = bool;

    fn index(&self, index: BoardPos) -> &Self::Output {
        if self.contains(index) {
            &true
        } else {
            &false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_stay_on_board() {
        assert_eq!(add_board_offset(0, -1), None);
        assert_eq!(add_board_offset(7, 1), None);
        assert_eq!(add_board_offset(3, 2), Some(5));
    }

    #[test]
    fn set_membership() {
        let mut set = SquareSet::default();
        set.insert(BoardPos::new(0, 0));
        set.insert(BoardPos::new(7, 7));
        set.insert(BoardPos::new(7, 7));

        assert_eq!(set.len(), 2);
        assert!(set[BoardPos::new(7, 7)]);
        assert!(!set[BoardPos::new(3, 3)]);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![BoardPos::new(0, 0), BoardPos::new(7, 7)]
        );

        set.remove(BoardPos::new(0, 0));
        assert_eq!(set.len(), 1);
    }
}
