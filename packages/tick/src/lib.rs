#![no_std]

pub mod fee_growth;
pub mod types;
pub mod update;

pub use fee_growth::{get_accumulators_inside, get_fee_growth_inside};
pub use types::{LimitTick, RangeTick};
pub use update::{cross_limit_tick, cross_range_tick, update_limit_tick, update_range_tick};

// Re-export from math
pub use coralswap_math::snap_tick_to_spacing;
