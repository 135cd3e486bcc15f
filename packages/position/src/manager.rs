// Range Position Management

use crate::types::RangePosition;
use coralswap_math::constants::{MAX_TICK, MIN_TICK};

/// Settle accrued fees into `tokens_owed_*` and advance the checkpoints.
///
/// delta = inside_now - inside_last with wrapping subtraction, then
/// owed += liquidity * delta / 2^64.
pub fn settle_fees(pos: &mut RangePosition, fee_growth_inside_0: u128, fee_growth_inside_1: u128) {
    if pos.liquidity > 0 {
        let liquidity_u = pos.liquidity as u128;

        let delta_0 = fee_growth_inside_0.wrapping_sub(pos.fee_growth_inside_last_0);
        let delta_1 = fee_growth_inside_1.wrapping_sub(pos.fee_growth_inside_last_1);

        let fee_0 = liquidity_u
            .checked_mul(delta_0)
            .map(|product| product >> 64)
            .unwrap_or(0);

        let fee_1 = liquidity_u
            .checked_mul(delta_1)
            .map(|product| product >> 64)
            .unwrap_or(0);

        pos.tokens_owed_0 = pos.tokens_owed_0.saturating_add(fee_0);
        pos.tokens_owed_1 = pos.tokens_owed_1.saturating_add(fee_1);
    }

    pos.fee_growth_inside_last_0 = fee_growth_inside_0;
    pos.fee_growth_inside_last_1 = fee_growth_inside_1;
}

/// Pending fees without mutating the position.
pub fn pending_fees(
    pos: &RangePosition,
    fee_growth_inside_0: u128,
    fee_growth_inside_1: u128,
) -> (u128, u128) {
    if pos.liquidity <= 0 {
        return (0, 0);
    }

    let liquidity_u = pos.liquidity as u128;

    let delta_0 = fee_growth_inside_0.wrapping_sub(pos.fee_growth_inside_last_0);
    let delta_1 = fee_growth_inside_1.wrapping_sub(pos.fee_growth_inside_last_1);

    (
        liquidity_u
            .checked_mul(delta_0)
            .map(|product| product >> 64)
            .unwrap_or(0),
        liquidity_u
            .checked_mul(delta_1)
            .map(|product| product >> 64)
            .unwrap_or(0),
    )
}

/// Settle fees, then apply a liquidity change.
pub fn modify_range_position(
    pos: &mut RangePosition,
    liquidity_delta: i128,
    fee_growth_inside_0: u128,
    fee_growth_inside_1: u128,
) {
    settle_fees(pos, fee_growth_inside_0, fee_growth_inside_1);

    if liquidity_delta > 0 {
        pos.liquidity = pos.liquidity.saturating_add(liquidity_delta);
    } else if liquidity_delta < 0 {
        pos.liquidity = pos.liquidity.saturating_sub(liquidity_delta.abs());
    }
}

/// Clear collected fees from a position.
pub fn clear_fees(pos: &mut RangePosition, amount0: u128, amount1: u128) {
    pos.tokens_owed_0 = pos.tokens_owed_0.saturating_sub(amount0);
    pos.tokens_owed_1 = pos.tokens_owed_1.saturating_sub(amount1);
}

#[inline]
pub fn is_empty(pos: &RangePosition) -> bool {
    pos.liquidity == 0 && pos.tokens_owed_0 == 0 && pos.tokens_owed_1 == 0
}

/// Validate a tick range against the pool's spacing and the tick domain.
pub fn validate_tick_range(lower: i32, upper: i32, tick_spacing: i32) -> Result<(), &'static str> {
    if lower >= upper {
        return Err("lower tick must be less than upper tick");
    }
    if tick_spacing <= 0 {
        return Err("tick spacing must be positive");
    }
    if lower < MIN_TICK || upper > MAX_TICK {
        return Err("tick out of bounds");
    }
    if lower.rem_euclid(tick_spacing) != 0 || upper.rem_euclid(tick_spacing) != 0 {
        return Err("tick not aligned to spacing");
    }
    Ok(())
}
