use bitvec::{order::Lsb0, vec::BitVec};

use super::error::*;
use super::types::*;

/// Content of one suffix array cell during induction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Slot<I> {
    /// A suffix whose left neighbour still has to be induced.
    Induce(I),
    /// A finished value, to be passed over by the current scan.
    Skip(I),
}

/// Suffix array cells paired with a tag bit per cell.
///
/// A tagged cell holds a value the scans must not induce from; clearing the tag restores
/// the plain value.
pub struct Slots<'a, I> {
    suf: &'a mut [I],
    tags: BitVec<usize, Lsb0>,
}

impl<'a, I: SaIndex> Slots<'a, I> {
    /// Wrap `suf` with all cells untagged.
    pub fn new(suf: &'a mut [I]) -> Result<Self> {
        let bits = std::mem::size_of::<usize>() * 8;
        let words = (suf.len() + bits - 1) / bits;
        let tags = BitVec::from_vec(try_filled::<usize>(words)?);
        Ok(Slots { suf, tags })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.suf.len()
    }

    #[inline(always)]
    pub fn get(&self, i: usize) -> Slot<I> {
        if self.tags[i] {
            Slot::Skip(self.suf[i])
        } else {
            Slot::Induce(self.suf[i])
        }
    }

    /// Store an untagged value.
    #[inline(always)]
    pub fn set(&mut self, i: usize, x: I) {
        self.suf[i] = x;
        self.tags.set(i, false);
    }

    /// Store a tagged value.
    #[inline(always)]
    pub fn set_skip(&mut self, i: usize, x: I) {
        self.suf[i] = x;
        self.tags.set(i, true);
    }

    #[inline(always)]
    pub fn put(&mut self, i: usize, slot: Slot<I>) {
        match slot {
            Slot::Induce(x) => self.set(i, x),
            Slot::Skip(x) => self.set_skip(i, x),
        }
    }

    /// Copy cell `from` to cell `to`, tag included.
    #[inline(always)]
    pub fn move_cell(&mut self, from: usize, to: usize) {
        let slot = self.get(from);
        self.put(to, slot);
    }

    /// Raw cells, ignoring tags.
    pub fn cells(&self) -> &[I] {
        &*self.suf
    }

    /// Raw mutable cells. Tags are left untouched.
    pub fn cells_mut(&mut self) -> &mut [I] {
        &mut *self.suf
    }

    /// Number of tagged cells.
    #[cfg(test)]
    pub fn tagged(&self) -> usize {
        self.tags[..self.suf.len()].count_ones()
    }
}
