// SPDX-License-Identifier: MIT
// Tick <-> Sqrt Price Conversions

use crate::constants::{MAX_SQRT_PRICE, MAX_TICK, MIN_SQRT_PRICE, MIN_TICK};
use crate::q64::{div_q64, div_round_up, mul_q64, ONE_X64};

/// Convert a tick to its Q64.64 sqrt price.
/// Formula: sqrt(1.0001^tick) * 2^64, computed by binary decomposition.
pub fn sqrt_price_at_tick(tick: i32) -> u128 {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        panic!("tick out of bounds");
    }

    if tick == 0 {
        return ONE_X64;
    }

    let abs_tick = tick.unsigned_abs();
    let mut ratio: u128 = ONE_X64;

    // sqrt(1.0001^(2^n)) * 2^64 for n = 0..=18
    if abs_tick & 0x1 != 0 { ratio = mul_q64(ratio, 18447666387855959851); }
    if abs_tick & 0x2 != 0 { ratio = mul_q64(ratio, 18448588748116922571); }
    if abs_tick & 0x4 != 0 { ratio = mul_q64(ratio, 18450433606991734263); }
    if abs_tick & 0x8 != 0 { ratio = mul_q64(ratio, 18454123878217468680); }
    if abs_tick & 0x10 != 0 { ratio = mul_q64(ratio, 18461506635090006702); }
    if abs_tick & 0x20 != 0 { ratio = mul_q64(ratio, 18476281010653910145); }
    if abs_tick & 0x40 != 0 { ratio = mul_q64(ratio, 18505865242158250042); }
    if abs_tick & 0x80 != 0 { ratio = mul_q64(ratio, 18565175891880433523); }
    if abs_tick & 0x100 != 0 { ratio = mul_q64(ratio, 18684368066214940583); }
    if abs_tick & 0x200 != 0 { ratio = mul_q64(ratio, 18925053041275764672); }
    if abs_tick & 0x400 != 0 { ratio = mul_q64(ratio, 19415764168677886927); }
    if abs_tick & 0x800 != 0 { ratio = mul_q64(ratio, 20435687552633177495); }
    if abs_tick & 0x1000 != 0 { ratio = mul_q64(ratio, 22639080592224303007); }
    if abs_tick & 0x2000 != 0 { ratio = mul_q64(ratio, 27784196929998399742); }
    if abs_tick & 0x4000 != 0 { ratio = mul_q64(ratio, 41848122137994986129); }
    if abs_tick & 0x8000 != 0 { ratio = mul_q64(ratio, 94936283578220370716); }
    if abs_tick & 0x10000 != 0 { ratio = mul_q64(ratio, 488590176327622479861); }
    if abs_tick & 0x20000 != 0 { ratio = mul_q64(ratio, 12941056668319229769860); }
    if abs_tick & 0x40000 != 0 { ratio = mul_q64(ratio, 9078618265828848800676189); }

    if tick < 0 {
        ratio = u128::MAX / ratio;
    }

    ratio
}

/// Convert a Q64.64 sqrt price to the greatest tick whose sqrt price is
/// less than or equal to it. Exact inverse of `sqrt_price_at_tick` on
/// tick boundaries.
pub fn tick_at_sqrt_price(sqrt_price: u128) -> i32 {
    if !(MIN_SQRT_PRICE..=MAX_SQRT_PRICE).contains(&sqrt_price) {
        panic!("price out of bounds");
    }

    let mut lo = MIN_TICK;
    let mut hi = MAX_TICK;
    while lo < hi {
        // Round toward hi so the loop always narrows.
        let mid = lo + (hi - lo + 1) / 2;
        if sqrt_price_at_tick(mid) <= sqrt_price {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    lo
}

/// Next sqrt price after spending `amount_in` against `liquidity`.
/// Rounds so the pool never undercharges: toward the current price.
pub fn get_next_sqrt_price_from_input(
    sqrt_price: u128,
    liquidity: u128,
    amount_in: u128,
    zero_for_one: bool,
) -> u128 {
    if amount_in == 0 || liquidity == 0 {
        return sqrt_price;
    }

    if zero_for_one {
        // 1/p' = 1/p + in/L, computed in the reciprocal Q64.64 domain
        let recip = u128::MAX / sqrt_price;
        let recip_next = recip.saturating_add(div_q64(amount_in, liquidity));
        if recip_next == 0 {
            return sqrt_price;
        }
        div_round_up(u128::MAX, recip_next)
    } else {
        // p' = p + in/L
        sqrt_price.saturating_add(div_q64(amount_in, liquidity))
    }
}

/// Next sqrt price after paying out `amount_out` against `liquidity`.
/// Rounds so the pool moves at least far enough to owe the output.
pub fn get_next_sqrt_price_from_output(
    sqrt_price: u128,
    liquidity: u128,
    amount_out: u128,
    zero_for_one: bool,
) -> u128 {
    if amount_out == 0 || liquidity == 0 {
        return sqrt_price;
    }

    if zero_for_one {
        // p' = p - out/L, the step rounded up so the move is sufficient
        let step = div_q64_round_up(amount_out, liquidity);
        sqrt_price.saturating_sub(step)
    } else {
        // 1/p' = 1/p - out/L
        let recip = u128::MAX / sqrt_price;
        let step = div_q64(amount_out, liquidity);
        let recip_next = recip.saturating_sub(step);
        if recip_next == 0 {
            return u128::MAX;
        }
        div_round_up(u128::MAX, recip_next)
    }
}

/// Compute a single exact-in swap step bounded by a target price.
///
/// Returns `(sqrt_price_next, amount_in, amount_out)`. The input amount is
/// rounded up and the output amount rounded down, so rounding always favors
/// the pool.
pub fn compute_swap_step_with_target(
    env: &soroban_sdk::Env,
    sqrt_price_current: u128,
    liquidity: i128,
    amount_remaining: i128,
    zero_for_one: bool,
    sqrt_price_target: u128,
) -> (u128, i128, i128) {
    use crate::liquidity::{get_amount_0_delta, get_amount_1_delta};
    use crate::q64::{i128_to_u128_safe, u128_to_i128_saturating};

    let liq_u = i128_to_u128_safe(liquidity);
    let amount_rem_u = i128_to_u128_safe(amount_remaining);

    let next_price_input =
        get_next_sqrt_price_from_input(sqrt_price_current, liq_u, amount_rem_u, zero_for_one);

    let target_reached = if zero_for_one {
        next_price_input <= sqrt_price_target
    } else {
        next_price_input >= sqrt_price_target
    };

    let sqrt_price_next = if target_reached {
        sqrt_price_target
    } else {
        next_price_input
    };

    let (amount_in, amount_out) = if zero_for_one {
        (
            get_amount_0_delta(env, sqrt_price_current, sqrt_price_next, liq_u, true),
            get_amount_1_delta(env, sqrt_price_current, sqrt_price_next, liq_u, false),
        )
    } else {
        (
            get_amount_1_delta(env, sqrt_price_current, sqrt_price_next, liq_u, true),
            get_amount_0_delta(env, sqrt_price_current, sqrt_price_next, liq_u, false),
        )
    };

    // Rounding in the price step can overshoot the remaining input
    let final_amount_in = if !target_reached && amount_in > amount_rem_u {
        amount_rem_u
    } else {
        amount_in
    };

    (
        sqrt_price_next,
        u128_to_i128_saturating(final_amount_in),
        u128_to_i128_saturating(amount_out),
    )
}

/// Compute a single exact-out swap step bounded by a target price.
///
/// `amount_remaining` is the output still owed to the taker. Same rounding
/// discipline as the exact-in step.
pub fn compute_swap_step_exact_out(
    env: &soroban_sdk::Env,
    sqrt_price_current: u128,
    liquidity: i128,
    amount_remaining: i128,
    zero_for_one: bool,
    sqrt_price_target: u128,
) -> (u128, i128, i128) {
    use crate::liquidity::{get_amount_0_delta, get_amount_1_delta};
    use crate::q64::{i128_to_u128_safe, u128_to_i128_saturating};

    let liq_u = i128_to_u128_safe(liquidity);
    let amount_rem_u = i128_to_u128_safe(amount_remaining);

    let next_price_output =
        get_next_sqrt_price_from_output(sqrt_price_current, liq_u, amount_rem_u, zero_for_one);

    let target_reached = if zero_for_one {
        next_price_output <= sqrt_price_target
    } else {
        next_price_output >= sqrt_price_target
    };

    let sqrt_price_next = if target_reached {
        sqrt_price_target
    } else {
        next_price_output
    };

    let (amount_in, amount_out) = if zero_for_one {
        (
            get_amount_0_delta(env, sqrt_price_current, sqrt_price_next, liq_u, true),
            get_amount_1_delta(env, sqrt_price_current, sqrt_price_next, liq_u, false),
        )
    } else {
        (
            get_amount_1_delta(env, sqrt_price_current, sqrt_price_next, liq_u, true),
            get_amount_0_delta(env, sqrt_price_current, sqrt_price_next, liq_u, false),
        )
    };

    let final_amount_out = if !target_reached && amount_out > amount_rem_u {
        amount_rem_u
    } else {
        amount_out
    };

    (
        sqrt_price_next,
        u128_to_i128_saturating(amount_in),
        u128_to_i128_saturating(final_amount_out),
    )
}

/// (a << 64) / b rounded up.
#[inline]
fn div_q64_round_up(a: u128, b: u128) -> u128 {
    if b == 0 {
        return u128::MAX;
    }
    let floor = div_q64(a, b);
    // div_q64 truncates; bump unless the division was exact
    if a <= (u128::MAX >> 64) && (a << 64) % b == 0 {
        floor
    } else {
        floor.saturating_add(1)
    }
}
