// SPDX-License-Identifier: MIT
// Two-Level Initialized Tick Bitmap
//
// Ticks are compressed into non-negative offsets relative to the lowest
// spacing-aligned tick, then packed 128 per u128 word. A second level of
// summary words carries one bit per non-empty word, so a scan touches at
// most one word plus a handful of summary words.

use coralswap_math::constants::{MAX_TICK, MIN_TICK};
use coralswap_math::snap_tick_to_spacing;

/// Backing storage for one bitmap. Word and summary lookups for indexes
/// that were never written must return zero.
pub trait BitmapStore {
    fn word(&self, index: u32) -> u128;
    fn set_word(&mut self, index: u32, value: u128);
    fn block(&self, index: u32) -> u128;
    fn set_block(&mut self, index: u32, value: u128);
}

const WORD_BITS: u32 = 128;

fn base_tick(spacing: i32) -> i32 {
    snap_tick_to_spacing(MIN_TICK, spacing)
}

fn max_offset(spacing: i32) -> i64 {
    ((MAX_TICK - base_tick(spacing)) / spacing) as i64
}

/// Compressed offset for a spacing-aligned tick. Panics on unaligned or
/// out-of-range input.
pub fn tick_offset(tick: i32, spacing: i32) -> u32 {
    if spacing <= 0 {
        panic!("tick_spacing must be positive");
    }
    if tick.rem_euclid(spacing) != 0 {
        panic!("tick not aligned to spacing");
    }
    let base = base_tick(spacing);
    if tick < base || tick > MAX_TICK {
        panic!("tick out of bounds");
    }
    ((tick - base) / spacing) as u32
}

/// Inverse of [`tick_offset`].
pub fn offset_to_tick(offset: u32, spacing: i32) -> i32 {
    base_tick(spacing) + (offset as i32) * spacing
}

pub fn is_tick_set<S: BitmapStore>(store: &S, tick: i32, spacing: i32) -> bool {
    let offset = tick_offset(tick, spacing);
    let word = store.word(offset / WORD_BITS);
    word & (1u128 << (offset % WORD_BITS)) != 0
}

pub fn set_tick<S: BitmapStore>(store: &mut S, tick: i32, spacing: i32) {
    let offset = tick_offset(tick, spacing);
    let word_idx = offset / WORD_BITS;
    let word = store.word(word_idx) | (1u128 << (offset % WORD_BITS));
    store.set_word(word_idx, word);

    let block_idx = word_idx / WORD_BITS;
    let block = store.block(block_idx) | (1u128 << (word_idx % WORD_BITS));
    store.set_block(block_idx, block);
}

pub fn unset_tick<S: BitmapStore>(store: &mut S, tick: i32, spacing: i32) {
    let offset = tick_offset(tick, spacing);
    let word_idx = offset / WORD_BITS;
    let word = store.word(word_idx) & !(1u128 << (offset % WORD_BITS));
    store.set_word(word_idx, word);

    if word == 0 {
        let block_idx = word_idx / WORD_BITS;
        let block = store.block(block_idx) & !(1u128 << (word_idx % WORD_BITS));
        store.set_block(block_idx, block);
    }
}

/// Nearest initialized tick from `from`.
///
/// With `lte` the search runs downward and includes `from` itself when
/// aligned; otherwise it runs upward starting strictly above `from`.
/// `from` itself may be unaligned (the live price tick usually is).
pub fn next_initialized_tick<S: BitmapStore>(
    store: &S,
    from: i32,
    spacing: i32,
    lte: bool,
) -> Option<i32> {
    if spacing <= 0 {
        panic!("tick_spacing must be positive");
    }
    let base = base_tick(spacing);
    let max_off = max_offset(spacing);
    let floor_off = (from as i64 - base as i64).div_euclid(spacing as i64);

    if lte {
        if floor_off < 0 {
            return None;
        }
        let off = floor_off.min(max_off) as u32;
        let word_idx = off / WORD_BITS;
        let bit = off % WORD_BITS;

        let mask = if bit == WORD_BITS - 1 {
            u128::MAX
        } else {
            (1u128 << (bit + 1)) - 1
        };
        let hit = store.word(word_idx) & mask;
        if hit != 0 {
            let b = WORD_BITS - 1 - hit.leading_zeros();
            return Some(offset_to_tick(word_idx * WORD_BITS + b, spacing));
        }

        let mut block_idx = word_idx / WORD_BITS;
        let word_bit = word_idx % WORD_BITS;
        let mut block_mask = if word_bit == 0 {
            0
        } else {
            (1u128 << word_bit) - 1
        };
        loop {
            let summary = store.block(block_idx) & block_mask;
            if summary != 0 {
                let wb = WORD_BITS - 1 - summary.leading_zeros();
                let found_word = block_idx * WORD_BITS + wb;
                let word = store.word(found_word);
                let b = WORD_BITS - 1 - word.leading_zeros();
                return Some(offset_to_tick(found_word * WORD_BITS + b, spacing));
            }
            if block_idx == 0 {
                return None;
            }
            block_idx -= 1;
            block_mask = u128::MAX;
        }
    } else {
        let off = floor_off + 1;
        if off > max_off {
            return None;
        }
        let off = off.max(0) as u32;
        let word_idx = off / WORD_BITS;
        let bit = off % WORD_BITS;

        let mask = u128::MAX << bit;
        let hit = store.word(word_idx) & mask;
        if hit != 0 {
            let b = hit.trailing_zeros();
            return Some(offset_to_tick(word_idx * WORD_BITS + b, spacing));
        }

        let max_block = (max_off as u32 / WORD_BITS) / WORD_BITS;
        let mut block_idx = word_idx / WORD_BITS;
        let word_bit = word_idx % WORD_BITS;
        let mut block_mask = if word_bit == WORD_BITS - 1 {
            0
        } else {
            u128::MAX << (word_bit + 1)
        };
        loop {
            let summary = store.block(block_idx) & block_mask;
            if summary != 0 {
                let wb = summary.trailing_zeros();
                let found_word = block_idx * WORD_BITS + wb;
                let word = store.word(found_word);
                let b = word.trailing_zeros();
                return Some(offset_to_tick(found_word * WORD_BITS + b, spacing));
            }
            if block_idx >= max_block {
                return None;
            }
            block_idx += 1;
            block_mask = u128::MAX;
        }
    }
}
