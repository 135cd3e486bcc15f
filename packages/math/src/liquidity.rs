// SPDX-License-Identifier: MIT
// Liquidity <-> Token Amount Conversions

use crate::constants::Q64;
use crate::q64::{i128_to_u128_safe, mul_div, mul_div_round_up, u128_to_i128_saturating};
use soroban_sdk::Env;

/// Token0 amount for `liquidity` between two sqrt prices.
/// amount0 = L * (upper - lower) * 2^64 / (upper * lower)
///
/// Round up when the caller owes the pool, down when the pool pays out.
pub fn get_amount_0_delta(
    env: &Env,
    sqrt_price_a: u128,
    sqrt_price_b: u128,
    liquidity: u128,
    round_up: bool,
) -> u128 {
    let (sqrt_lower, sqrt_upper) = if sqrt_price_a < sqrt_price_b {
        (sqrt_price_a, sqrt_price_b)
    } else {
        (sqrt_price_b, sqrt_price_a)
    };

    if sqrt_lower == 0 || liquidity == 0 {
        return 0;
    }

    let delta = sqrt_upper - sqrt_lower;

    // Staged so every intermediate stays inside the U256 helpers
    if round_up {
        let scaled = mul_div_round_up(env, liquidity, Q64, sqrt_upper);
        mul_div_round_up(env, scaled, delta, sqrt_lower)
    } else {
        let scaled = mul_div(env, liquidity, Q64, sqrt_upper);
        mul_div(env, scaled, delta, sqrt_lower)
    }
}

/// Token1 amount for `liquidity` between two sqrt prices.
/// amount1 = L * (upper - lower) / 2^64
pub fn get_amount_1_delta(
    env: &Env,
    sqrt_price_a: u128,
    sqrt_price_b: u128,
    liquidity: u128,
    round_up: bool,
) -> u128 {
    let (sqrt_lower, sqrt_upper) = if sqrt_price_a < sqrt_price_b {
        (sqrt_price_a, sqrt_price_b)
    } else {
        (sqrt_price_b, sqrt_price_a)
    };

    let delta = sqrt_upper - sqrt_lower;

    if round_up {
        mul_div_round_up(env, liquidity, delta, Q64)
    } else {
        mul_div(env, liquidity, delta, Q64)
    }
}

/// Liquidity granted for a token0 deposit over a price range. Rounds down.
pub fn get_liquidity_for_amount0(
    env: &Env,
    amount0: i128,
    sqrt_price_lower: u128,
    sqrt_price_upper: u128,
) -> i128 {
    if amount0 <= 0 || sqrt_price_lower >= sqrt_price_upper {
        return 0;
    }

    let amt0_u = i128_to_u128_safe(amount0);
    let delta = sqrt_price_upper - sqrt_price_lower;

    // L = amount0 * upper * lower / (2^64 * (upper - lower))
    let scaled = mul_div(env, amt0_u, sqrt_price_upper, Q64);
    u128_to_i128_saturating(mul_div(env, scaled, sqrt_price_lower, delta))
}

/// Liquidity granted for a token1 deposit over a price range. Rounds down.
pub fn get_liquidity_for_amount1(
    env: &Env,
    amount1: i128,
    sqrt_price_lower: u128,
    sqrt_price_upper: u128,
) -> i128 {
    if amount1 <= 0 || sqrt_price_lower >= sqrt_price_upper {
        return 0;
    }

    let amt1_u = i128_to_u128_safe(amount1);
    let delta = sqrt_price_upper - sqrt_price_lower;

    u128_to_i128_saturating(mul_div(env, amt1_u, Q64, delta))
}

/// Liquidity granted for a two-sided deposit at the current price.
pub fn get_liquidity_for_amounts(
    env: &Env,
    amount0_desired: i128,
    amount1_desired: i128,
    sqrt_price_lower: u128,
    sqrt_price_upper: u128,
    current_sqrt_price: u128,
) -> i128 {
    if sqrt_price_lower >= sqrt_price_upper {
        return 0;
    }

    if current_sqrt_price <= sqrt_price_lower {
        get_liquidity_for_amount0(env, amount0_desired, sqrt_price_lower, sqrt_price_upper)
    } else if current_sqrt_price >= sqrt_price_upper {
        get_liquidity_for_amount1(env, amount1_desired, sqrt_price_lower, sqrt_price_upper)
    } else {
        let liq0 =
            get_liquidity_for_amount0(env, amount0_desired, current_sqrt_price, sqrt_price_upper);
        let liq1 =
            get_liquidity_for_amount1(env, amount1_desired, sqrt_price_lower, current_sqrt_price);
        liq0.min(liq1)
    }
}

/// Token amounts represented by `liquidity` at the current price.
/// `round_up` selects deposit (true) or payout (false) rounding.
pub fn get_amounts_for_liquidity(
    env: &Env,
    liquidity: i128,
    sqrt_price_lower: u128,
    sqrt_price_upper: u128,
    current_sqrt_price: u128,
    round_up: bool,
) -> (i128, i128) {
    if liquidity <= 0 {
        return (0, 0);
    }

    let liq_u = i128_to_u128_safe(liquidity);

    let sp = current_sqrt_price
        .max(sqrt_price_lower)
        .min(sqrt_price_upper);

    let amount0_u = if sp < sqrt_price_upper {
        get_amount_0_delta(env, sp, sqrt_price_upper, liq_u, round_up)
    } else {
        0
    };

    let amount1_u = if sp > sqrt_price_lower {
        get_amount_1_delta(env, sqrt_price_lower, sp, liq_u, round_up)
    } else {
        0
    };

    (
        u128_to_i128_saturating(amount0_u),
        u128_to_i128_saturating(amount1_u),
    )
}
