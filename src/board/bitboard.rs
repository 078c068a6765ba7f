//! Occupancy sets for one stone color

use super::{Pos, TOTAL_CELLS};

const WORDS: usize = TOTAL_CELLS.div_ceil(64);

/// One bit per intersection, 6 x u64 covering the 361 cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bitboard {
    bits: [u64; WORDS],
}

impl Bitboard {
    pub const fn new() -> Self {
        Self { bits: [0; WORDS] }
    }

    #[inline]
    fn mask(pos: Pos) -> (usize, u64) {
        let idx = pos.to_index();
        (idx / 64, 1u64 << (idx % 64))
    }

    #[inline]
    pub fn set(&mut self, pos: Pos) {
        let (word, bit) = Self::mask(pos);
        self.bits[word] |= bit;
    }

    #[inline]
    pub fn clear(&mut self, pos: Pos) {
        let (word, bit) = Self::mask(pos);
        self.bits[word] &= !bit;
    }

    #[inline]
    pub fn get(&self, pos: Pos) -> bool {
        let (word, bit) = Self::mask(pos);
        self.bits[word] & bit != 0
    }

    /// Popcount
    #[inline]
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|b| b.count_ones()).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }

    /// Positions of all set bits, in index order
    pub fn iter_ones(&self) -> impl Iterator<Item = Pos> + '_ {
        self.bits.iter().enumerate().flat_map(|(word_idx, &word)| {
            let mut rest = word;
            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let bit = rest.trailing_zeros() as usize;
                rest &= rest - 1;
                Some(word_idx * 64 + bit)
            })
        })
        .filter(|&idx| idx < TOTAL_CELLS)
        .map(Pos::from_index)
    }
}
