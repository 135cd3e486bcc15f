#![no_std]

pub mod limit;
pub mod manager;
pub mod types;

pub use limit::{limit_fill_amounts, validate_limit_claim};
pub use manager::{
    clear_fees, is_empty, modify_range_position, pending_fees, settle_fees, validate_tick_range,
};
pub use types::{LimitFill, LimitPosition, RangePosition, RangePositionSnapshot};
