// CoralSwap Math Package

#![no_std]

pub mod constants;
pub mod liquidity;
pub mod q64;
pub mod sqrt_price;

pub use constants::*;

pub use q64::{
    div_q64, div_round_up, i128_to_u128_safe, mul_div, mul_div_round_up, mul_q64,
    u128_to_i128_saturating, ONE_X64,
};

pub use sqrt_price::{
    compute_swap_step_exact_out, compute_swap_step_with_target, get_next_sqrt_price_from_input,
    get_next_sqrt_price_from_output, sqrt_price_at_tick, tick_at_sqrt_price,
};

pub use liquidity::{
    get_amount_0_delta, get_amount_1_delta, get_amounts_for_liquidity, get_liquidity_for_amount0,
    get_liquidity_for_amount1, get_liquidity_for_amounts,
};

/// Round a tick down to the nearest multiple of `spacing`.
pub fn snap_tick_to_spacing(tick: i32, spacing: i32) -> i32 {
    if spacing <= 0 {
        panic!("tick_spacing must be positive");
    }
    let rem = tick.rem_euclid(spacing);
    tick - rem
}
