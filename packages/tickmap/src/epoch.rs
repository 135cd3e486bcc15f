// SPDX-License-Identifier: MIT
// Fill Epoch Stamps
//
// One u32 epoch per spacing-aligned tick, packed four to a u128 word.
// A zero stamp means the tick was never crossed.

use crate::bitmap::tick_offset;

/// Backing storage for one epoch map. Unwritten words read as zero.
pub trait EpochStore {
    fn word(&self, index: u32) -> u128;
    fn set_word(&mut self, index: u32, value: u128);
}

const SLOTS_PER_WORD: u32 = 4;
const SLOT_MASK: u128 = 0xFFFF_FFFF;

pub fn epoch_at_tick<S: EpochStore>(store: &S, tick: i32, spacing: i32) -> u32 {
    let offset = tick_offset(tick, spacing);
    let word = store.word(offset / SLOTS_PER_WORD);
    let shift = (offset % SLOTS_PER_WORD) * 32;
    ((word >> shift) & SLOT_MASK) as u32
}

pub fn stamp_epoch_at_tick<S: EpochStore>(store: &mut S, tick: i32, spacing: i32, epoch: u32) {
    let offset = tick_offset(tick, spacing);
    let index = offset / SLOTS_PER_WORD;
    let shift = (offset % SLOTS_PER_WORD) * 32;

    let mut word = store.word(index);
    word &= !(SLOT_MASK << shift);
    word |= (epoch as u128) << shift;
    store.set_word(index, word);
}
