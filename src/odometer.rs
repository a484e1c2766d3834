//! The mixed-radix odometer driving candidate enumeration.
//!
//! The candidate word is a positional number whose digit at position `i`
//! ranges over slot `i`'s symbol set, most significant digit leftmost.
//! Advancing scans from the rightmost position: a slot whose cursor has
//! symbols left steps to the next symbol and reports its position; an
//! exhausted slot resets to its first symbol and carries leftward. Every
//! combination is produced exactly once, rightmost position cycling
//! fastest.

use crate::mask::{Mask, Slot};

/// Enumeration state for one candidate length: the slot cursors, the
/// candidate word and the live per-byte occurrence counts.
#[derive(Debug, Clone)]
pub struct Odometer {
    slots: Vec<Slot>,
    word: Vec<u8>,
    occurs: [u32; 256],
    len: usize,
}

impl Odometer {
    /// Create an odometer over a compiled mask. Call [`reset`] or
    /// [`seek`] before the first [`advance`].
    ///
    /// [`reset`]: Odometer::reset
    /// [`seek`]: Odometer::seek
    /// [`advance`]: Odometer::advance
    pub fn new(mask: &Mask) -> Self {
        let slots = mask.slots().to_vec();
        let word = vec![0u8; slots.len()];
        Self {
            slots,
            word,
            occurs: [0; 256],
            len: 0,
        }
    }

    /// Reinitialize for one length pass.
    ///
    /// Every cursor is primed to roll over except position 0, so the first
    /// `advance` yields the all-first-symbols candidate without special
    /// casing. The word and occurrence table are seeded with each slot's
    /// first symbol; the first advance removes and re-adds exactly those
    /// bytes, keeping the counts consistent.
    ///
    /// # Panics
    ///
    /// Panics if `len` is 0 or exceeds the slot count.
    pub fn reset(&mut self, len: usize) {
        assert!(len >= 1 && len <= self.slots.len());

        self.len = len;
        self.occurs = [0; 256];

        for i in 0..len {
            let slot = &mut self.slots[i];
            slot.cursor = slot.len();
            let first = slot.symbols()[0];
            self.word[i] = first;
            self.occurs[first as usize] += 1;
        }

        self.slots[0].cursor = 0;
    }

    /// Seed the word from an exact start prefix, leaving every cursor one
    /// past its seeded symbol so the next `advance` continues after it.
    /// The seeded word itself is valid output and is not produced by
    /// `advance`.
    ///
    /// Returns the first position whose byte is absent from its slot.
    ///
    /// # Panics
    ///
    /// Panics if `len` is 0, exceeds the slot count, or exceeds
    /// `start.len()`.
    pub fn seek(&mut self, len: usize, start: &[u8]) -> Result<(), usize> {
        assert!(len >= 1 && len <= self.slots.len() && len <= start.len());

        self.len = len;
        self.occurs = [0; 256];

        for i in 0..len {
            let slot = &mut self.slots[i];
            let idx = slot
                .symbols()
                .iter()
                .position(|&b| b == start[i])
                .ok_or(i)?;
            slot.cursor = idx + 1;
            self.word[i] = start[i];
            self.occurs[start[i] as usize] += 1;
        }

        Ok(())
    }

    /// Advance to the next candidate.
    ///
    /// Returns the leftmost position that changed, or `None` once this
    /// length is exhausted.
    pub fn advance(&mut self) -> Option<usize> {
        for i in (0..self.len).rev() {
            let old = self.word[i];
            self.occurs[old as usize] -= 1;

            let slot = &mut self.slots[i];

            if slot.cursor < slot.len() {
                let new = slot.symbols()[slot.cursor];
                slot.cursor += 1;
                self.word[i] = new;
                self.occurs[new as usize] += 1;
                return Some(i);
            }

            // rolled over, carry continues leftward
            let new = slot.symbols()[0];
            slot.cursor = 1;
            self.word[i] = new;
            self.occurs[new as usize] += 1;
        }

        None
    }

    /// Mark every slot from `from` rightward as exhausted, so the next
    /// `advance` carries straight through them. This is the skip-ahead
    /// hook used by the sequence filter to prune a whole subtree at once.
    pub fn force_exhausted(&mut self, from: usize) {
        for slot in &mut self.slots[from..self.len] {
            slot.cursor = slot.len();
        }
    }

    /// The current candidate.
    pub fn word(&self) -> &[u8] {
        &self.word[..self.len]
    }

    /// Live per-byte occurrence counts for the current candidate.
    pub fn occurs(&self) -> &[u32; 256] {
        &self.occurs
    }

    /// The active candidate length.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
