// SPDX-License-Identifier: MIT
// Q64.64 Fixed-Point Arithmetic Operations

use crate::constants::Q64;
use soroban_sdk::{Env, U256};

pub const ONE_X64: u128 = Q64;

/// Type conversion helpers
#[inline]
pub fn i128_to_u128_safe(x: i128) -> u128 {
    if x <= 0 {
        0
    } else {
        x as u128
    }
}

#[inline]
pub fn u128_to_i128_saturating(x: u128) -> i128 {
    if x > i128::MAX as u128 {
        i128::MAX
    } else {
        x as i128
    }
}

/// Multiply two Q64.64 numbers, returning Q64.64.
/// Decomposed into 64-bit halves so no intermediate exceeds u128.
#[inline]
pub fn mul_q64(a: u128, b: u128) -> u128 {
    let a_hi = a >> 64;
    let a_lo = a & 0xFFFFFFFFFFFFFFFF;
    let b_hi = b >> 64;
    let b_lo = b & 0xFFFFFFFFFFFFFFFF;

    let term_hh = a_hi.wrapping_mul(b_hi);
    let term_hl = a_hi.wrapping_mul(b_lo);
    let term_lh = a_lo.wrapping_mul(b_hi);
    let term_ll = a_lo.wrapping_mul(b_lo);

    (term_hh << 64)
        .wrapping_add(term_hl)
        .wrapping_add(term_lh)
        .wrapping_add(term_ll >> 64)
}

/// Divide in Q64.64 format: (a << 64) / b, rounding down.
#[inline]
pub fn div_q64(a: u128, b: u128) -> u128 {
    if b == 0 {
        return u128::MAX;
    }

    if a <= (u128::MAX >> 64) {
        return (a << 64) / b;
    }

    let q = a / b;
    let r = a % b;

    let q_part = q << 64;
    let r_part = if r <= (u128::MAX >> 64) {
        (r << 64) / b
    } else {
        ((r >> 32) << 32) / (b >> 32).max(1)
    };

    q_part.saturating_add(r_part)
}

/// (a * b) / denominator with a U256 intermediate, rounding down.
pub fn mul_div(env: &Env, a: u128, b: u128, denominator: u128) -> u128 {
    if denominator == 0 {
        panic!("mul_div: divide by zero");
    }

    let a_256 = U256::from_u128(env, a);
    let b_256 = U256::from_u128(env, b);
    let den_256 = U256::from_u128(env, denominator);

    let product = a_256.mul(&b_256);
    let result = product.div(&den_256);

    result.to_u128().unwrap_or(u128::MAX)
}

/// (a * b) / denominator with a U256 intermediate, rounding up.
pub fn mul_div_round_up(env: &Env, a: u128, b: u128, denominator: u128) -> u128 {
    if denominator == 0 {
        panic!("mul_div: divide by zero");
    }

    let a_256 = U256::from_u128(env, a);
    let b_256 = U256::from_u128(env, b);
    let den_256 = U256::from_u128(env, denominator);

    let product = a_256.mul(&b_256);
    let quotient = product.div(&den_256);
    let floor = quotient.to_u128().unwrap_or(u128::MAX);

    let remainder = product.rem_euclid(&den_256);
    if remainder == U256::from_u32(env, 0) {
        floor
    } else {
        floor.saturating_add(1)
    }
}

/// Divide with rounding up.
#[inline]
pub fn div_round_up(numerator: u128, denominator: u128) -> u128 {
    if denominator == 0 {
        return 0;
    }
    let result = numerator / denominator;
    if numerator % denominator != 0 {
        result.saturating_add(1)
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_q64_floor_semantics() {
        // 3.5 * 2.0 = 7.0 exactly
        let a = ONE_X64 * 7 / 2;
        let b = ONE_X64 * 2;
        assert_eq!(mul_q64(a, b), ONE_X64 * 7);

        // (1/3) * 3 rounds down to just under 1.0
        let third = ONE_X64 / 3;
        assert!(mul_q64(third, ONE_X64 * 3) <= ONE_X64);
    }

    #[test]
    fn div_round_up_rounds() {
        assert_eq!(div_round_up(10, 3), 4);
        assert_eq!(div_round_up(10, 5), 2);
        assert_eq!(div_round_up(0, 7), 0);
    }
}
