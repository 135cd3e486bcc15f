// CoralSwap Tick Bitmap Package

#![no_std]

pub mod bitmap;
pub mod epoch;

pub use bitmap::{
    is_tick_set, next_initialized_tick, offset_to_tick, set_tick, tick_offset, unset_tick,
    BitmapStore,
};
pub use epoch::{epoch_at_tick, stamp_epoch_at_tick, EpochStore};
