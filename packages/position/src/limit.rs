// Limit Order Claim Validation and Fill Accounting

use crate::types::{LimitFill, LimitPosition};
use coralswap_math::{
    get_amount_0_delta, get_amount_1_delta, mul_q64, sqrt_price_at_tick,
    u128_to_i128_saturating,
};
use soroban_sdk::Env;

/// Check a claim tick against the position's geometry and crossing history.
///
/// `stamped_epoch` is the epoch recorded at `claim` in the direction's epoch
/// map. A claim at the start boundary asserts no fill happened; any claim
/// past it requires a crossing stamped after the position's epoch. No
/// clamping: an inconsistent claim is the caller's error.
pub fn validate_limit_claim(
    pos: &LimitPosition,
    claim: i32,
    tick_spacing: i32,
    stamped_epoch: u32,
) -> Result<(), &'static str> {
    if claim < pos.lower || claim > pos.upper {
        return Err("claim outside position range");
    }
    if claim.rem_euclid(tick_spacing) != 0 {
        return Err("claim not aligned to spacing");
    }

    if claim == pos.start_tick() {
        if stamped_epoch > pos.epoch_last {
            return Err("start boundary was crossed");
        }
    } else if stamped_epoch <= pos.epoch_last {
        return Err("claim tick not crossed");
    }

    Ok(())
}

fn clamp(value: u128, low: u128, high: u128) -> u128 {
    value.max(low).min(high)
}

/// Token amounts released by burning `burn_percent` (Q64.64 fraction) of a
/// limit position at `claim`.
///
/// The segment between the start boundary and `claim` is fully converted,
/// so it pays out in the opposing token for the whole position. The burned
/// share additionally realizes its conversion up to the fill frontier; its
/// remainder comes back in the deposit token. Payouts round down.
pub fn limit_fill_amounts(
    env: &Env,
    pos: &LimitPosition,
    claim: i32,
    burn_percent: u128,
    frontier_sqrt_price: u128,
    fully_crossed: bool,
) -> LimitFill {
    let liquidity_u = if pos.liquidity > 0 {
        pos.liquidity as u128
    } else {
        0
    };

    let burned = mul_q64(liquidity_u, burn_percent);
    let remaining = liquidity_u - burned;

    let price_lower = sqrt_price_at_tick(pos.lower);
    let price_upper = sqrt_price_at_tick(pos.upper);
    let price_claim = sqrt_price_at_tick(claim);

    let (filled, unfilled) = if pos.zero_for_one {
        // token0 above the market, converted to token1 as the price rises
        let frontier = if fully_crossed {
            price_upper
        } else {
            clamp(frontier_sqrt_price, price_claim, price_upper)
        };
        let filled = get_amount_1_delta(env, price_lower, price_claim, remaining, false)
            + get_amount_1_delta(env, price_lower, frontier, burned, false);
        let unfilled = get_amount_0_delta(env, frontier, price_upper, burned, false);
        (filled, unfilled)
    } else {
        // token1 below the market, converted to token0 as the price falls
        let frontier = if fully_crossed {
            price_lower
        } else {
            clamp(frontier_sqrt_price, price_lower, price_claim)
        };
        let filled = get_amount_0_delta(env, price_claim, price_upper, remaining, false)
            + get_amount_0_delta(env, frontier, price_upper, burned, false);
        let unfilled = get_amount_1_delta(env, price_lower, frontier, burned, false);
        (filled, unfilled)
    };

    LimitFill {
        filled: u128_to_i128_saturating(filled),
        unfilled: u128_to_i128_saturating(unfilled),
        burned_liquidity: u128_to_i128_saturating(burned),
        remaining_liquidity: u128_to_i128_saturating(remaining),
    }
}
