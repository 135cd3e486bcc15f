// SPDX-License-Identifier: MIT

// ============================================================
// TICK CONSTANTS
// ============================================================

/// Minimum valid tick. Chosen so the Q64.64 sqrt price at every tick in
/// range fits a u128 with headroom for intermediate products.
pub const MIN_TICK: i32 = -443636;

/// Maximum valid tick.
pub const MAX_TICK: i32 = 443636;

// ============================================================
// SQRT PRICE CONSTANTS (Q64.64 format)
// ============================================================

/// Sqrt price at MIN_TICK: sqrt(1.0001^-443636) * 2^64.
/// Round-trips exactly through `tick_at_sqrt_price`.
pub const MIN_SQRT_PRICE: u128 = 4295048016;

/// Sqrt price at MAX_TICK: sqrt(1.0001^443636) * 2^64.
pub const MAX_SQRT_PRICE: u128 = 79226673515401279988681420430;

/// Sqrt price for a 1:1 price ratio (2^64).
pub const SQRT_PRICE_1_1: u128 = 18446744073709551616;

// ============================================================
// LIQUIDITY CONSTANTS
// ============================================================

/// Minimum liquidity for a position; rejects dust mints.
pub const MIN_LIQUIDITY: i128 = 1000;

/// Maximum absolute liquidity referencing a single tick.
pub const MAX_LIQUIDITY_PER_TICK: u128 = (i128::MAX / 2) as u128;

// ============================================================
// SWAP CONSTANTS
// ============================================================

/// Upper bound on swap loop iterations.
pub const MAX_SWAP_ITERATIONS: u32 = 1024;

/// Basis point denominator for fees and percentages.
pub const BPS_DENOMINATOR: i128 = 10000;

/// Maximum swap fee in basis points.
pub const MAX_SWAP_FEE_BPS: u32 = 10000;

/// Maximum protocol share of the swap fee in basis points.
pub const MAX_PROTOCOL_FEE_BPS: u32 = 10000;

// ============================================================
// MATH CONSTANTS
// ============================================================

/// Q64 multiplier (2^64), the fixed-point scale.
pub const Q64: u128 = 1u128 << 64;

/// 100% expressed as a Q64.64 fraction, the unit for burn percentages.
pub const PERCENT_ONE_X64: u128 = Q64;
