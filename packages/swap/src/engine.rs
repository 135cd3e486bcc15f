// Swap Execution Engine
//
// Price walks tick to tick toward the caller's limit. Range liquidity is
// always active; the consumed direction's limit liquidity joins in once the
// price reaches that ledger's fill frontier (the "merged" stretch). Fees come
// out of the input side per step: the LP share feeds range fee growth, the
// protocol share accrues to the consumed limit pool.

use crate::types::{SwapHost, SwapState};
use coralswap_math::{
    compute_swap_step_exact_out, compute_swap_step_with_target,
    constants::{BPS_DENOMINATOR, MAX_SQRT_PRICE, MAX_SWAP_ITERATIONS, MAX_TICK, MIN_SQRT_PRICE},
    div_q64, snap_tick_to_spacing, sqrt_price_at_tick, tick_at_sqrt_price,
};
use soroban_sdk::Env;

/// Execute (or simulate, with `dry_run`) a swap against the combined ledgers.
///
/// `amount_specified` is input for `exact_in`, desired output otherwise.
/// Returns `(amount_in, amount_out)`; any unconsumed remainder is simply not
/// charged. State is updated in place for the contract to write back.
#[allow(clippy::too_many_arguments)]
pub fn engine_swap<H: SwapHost>(
    env: &Env,
    host: &H,
    state: &mut SwapState,
    amount_specified: i128,
    exact_in: bool,
    zero_for_one: bool,
    sqrt_price_limit: u128,
    fee_bps: u32,
    protocol_fee_bps: u32,
    dry_run: bool,
) -> (i128, i128) {
    if amount_specified <= 0 {
        panic!("invalid swap amount");
    }

    let sqrt_limit = if sqrt_price_limit == 0 {
        if zero_for_one {
            MIN_SQRT_PRICE
        } else {
            MAX_SQRT_PRICE
        }
    } else {
        sqrt_price_limit
    };

    let fee_divisor = BPS_DENOMINATOR - fee_bps as i128;
    let frontier_before = state.limit_sqrt_price;

    let mut remaining = amount_specified;
    let mut total_in: i128 = 0;
    let mut total_out: i128 = 0;

    let mut iterations = 0;
    while iterations < MAX_SWAP_ITERATIONS {
        iterations += 1;

        if remaining <= 0 {
            break;
        }
        if zero_for_one {
            if state.sqrt_price <= sqrt_limit {
                break;
            }
        } else if state.sqrt_price >= sqrt_limit {
            break;
        }

        // limit liquidity participates once price has caught up with the
        // consumed ledger's frontier
        let merged = if zero_for_one {
            state.sqrt_price <= state.limit_sqrt_price
        } else {
            state.sqrt_price >= state.limit_sqrt_price
        };

        let next_range = host.next_range_tick(env, state.current_tick, zero_for_one);
        let next_limit = if merged {
            host.next_limit_tick(env, state.current_tick, zero_for_one)
        } else {
            None
        };

        // nearest bounding tick in the trade direction
        let boundary = match (next_range, next_limit) {
            (Some(r), Some(l)) => Some(if zero_for_one { r.max(l) } else { r.min(l) }),
            (Some(r), None) => Some(r),
            (None, Some(l)) => Some(l),
            (None, None) => None,
        };

        let mut target = match boundary {
            Some(tick) => sqrt_price_at_tick(tick),
            None => sqrt_limit,
        };
        let mut target_is_boundary = boundary.is_some();

        // before the merged stretch the frontier itself is a stop
        if !merged {
            let frontier = state.limit_sqrt_price;
            let binds = if zero_for_one {
                frontier > target && frontier < state.sqrt_price
            } else {
                frontier < target && frontier > state.sqrt_price
            };
            if binds {
                target = frontier;
                target_is_boundary = false;
            }
        }

        // clamp at the caller's limit
        if zero_for_one {
            if target < sqrt_limit {
                target = sqrt_limit;
                target_is_boundary = false;
            }
        } else if target > sqrt_limit {
            target = sqrt_limit;
            target_is_boundary = false;
        }

        let crossing_allowed = target_is_boundary && target != sqrt_limit;

        let active_liquidity = state
            .range_liquidity
            .saturating_add(if merged { state.limit_liquidity } else { 0 });

        if active_liquidity <= 0 {
            // nothing to trade against here: hop to the next stop
            if boundary.is_none() && target == sqrt_limit {
                break;
            }
            state.sqrt_price = target;
            if crossing_allowed {
                let tick = boundary.unwrap();
                cross_boundary(
                    env,
                    host,
                    state,
                    tick,
                    next_range == Some(tick),
                    next_limit == Some(tick),
                    zero_for_one,
                    dry_run,
                );
            } else {
                state.current_tick = tick_at_sqrt_price(target);
            }
            continue;
        }

        // step amounts; input rounds up, output rounds down
        let (sqrt_next, step_in, step_out, available) = if exact_in {
            let available = remaining.saturating_mul(fee_divisor) / BPS_DENOMINATOR;
            if available <= 0 {
                break;
            }
            let (next, step_in, step_out) = if state.sqrt_price == target {
                (state.sqrt_price, 0, 0)
            } else {
                compute_swap_step_with_target(
                    env,
                    state.sqrt_price,
                    active_liquidity,
                    available,
                    zero_for_one,
                    target,
                )
            };
            (next, step_in, step_out, available)
        } else {
            let (next, step_in, step_out) = if state.sqrt_price == target {
                (state.sqrt_price, 0, 0)
            } else {
                compute_swap_step_exact_out(
                    env,
                    state.sqrt_price,
                    active_liquidity,
                    remaining,
                    zero_for_one,
                    target,
                )
            };
            (next, step_in, step_out, 0)
        };

        let step_fee = if exact_in {
            calculate_step_fee(step_in, remaining, available, fee_bps as i128, fee_divisor)
        } else {
            // gross the computed input up to include the fee
            let numerator = step_in.saturating_mul(fee_bps as i128);
            let fee = numerator / fee_divisor;
            if numerator % fee_divisor != 0 {
                fee + 1
            } else {
                fee
            }
        };

        // split the fee between range LPs and the protocol
        let mut protocol_fee =
            step_fee.saturating_mul(protocol_fee_bps as i128) / BPS_DENOMINATOR;
        let lp_fee = step_fee.saturating_sub(protocol_fee);
        if state.range_liquidity > 0 && lp_fee > 0 {
            let growth = div_q64(lp_fee as u128, state.range_liquidity as u128);
            if zero_for_one {
                state.fee_growth_global_0 = state.fee_growth_global_0.wrapping_add(growth);
            } else {
                state.fee_growth_global_1 = state.fee_growth_global_1.wrapping_add(growth);
            }
        } else {
            // no range liquidity to credit: the protocol keeps the LP share
            protocol_fee = protocol_fee.saturating_add(lp_fee);
        }
        state.protocol_fee_accrued = state
            .protocol_fee_accrued
            .saturating_add(protocol_fee as u128);

        if exact_in {
            remaining = remaining.saturating_sub(step_in).saturating_sub(step_fee);
        } else {
            remaining = remaining.saturating_sub(step_out);
        }
        total_in = total_in.saturating_add(step_in).saturating_add(step_fee);
        total_out = total_out.saturating_add(step_out);

        let reached = sqrt_next == target;
        if reached && crossing_allowed {
            state.sqrt_price = target;
            let tick = boundary.unwrap();
            cross_boundary(
                env,
                host,
                state,
                tick,
                next_range == Some(tick),
                next_limit == Some(tick),
                zero_for_one,
                dry_run,
            );
        } else if sqrt_next != state.sqrt_price {
            state.sqrt_price = sqrt_next;
            state.current_tick = tick_at_sqrt_price(sqrt_next);
        } else {
            // no movement and no crossing: the remainder cannot be consumed
            break;
        }
    }

    // advance the consumed ledger's frontier to wherever the price settled
    let frontier_moved = if zero_for_one {
        state.sqrt_price < frontier_before
    } else {
        state.sqrt_price > frontier_before
    };
    if frontier_moved {
        state.limit_sqrt_price = state.sqrt_price;
        state.epoch += 1;

        let tick = tick_at_sqrt_price(state.sqrt_price);
        let snapped = snap_tick_to_spacing(tick, state.tick_spacing);
        // fills claim at the first aligned boundary behind the frontier
        let stamp_tick = if zero_for_one {
            if snapped == tick && sqrt_price_at_tick(tick) == state.sqrt_price {
                tick
            } else {
                (snapped + state.tick_spacing)
                    .min(snap_tick_to_spacing(MAX_TICK, state.tick_spacing))
            }
        } else {
            snapped
        };
        if !dry_run {
            host.stamp_frontier(env, stamp_tick, state.epoch);
        }
    }

    (total_in, total_out)
}

/// Cross one tick index: bump the epoch once, then apply whichever ledgers
/// hold a tick there.
#[allow(clippy::too_many_arguments)]
fn cross_boundary<H: SwapHost>(
    env: &Env,
    host: &H,
    state: &mut SwapState,
    tick: i32,
    in_range: bool,
    in_limit: bool,
    zero_for_one: bool,
    dry_run: bool,
) {
    state.epoch += 1;

    if in_range {
        let net = if dry_run {
            host.range_liquidity_net(env, tick)
        } else {
            host.cross_range_tick(
                env,
                tick,
                state.fee_growth_global_0,
                state.fee_growth_global_1,
                state.seconds_per_liquidity_global,
                state.tick_seconds_global,
            )
        };
        state.range_liquidity = if zero_for_one {
            state.range_liquidity.saturating_sub(net)
        } else {
            state.range_liquidity.saturating_add(net)
        };
    }

    if in_limit {
        let net = if dry_run {
            host.limit_liquidity_net(env, tick)
        } else {
            host.cross_limit_tick(env, tick, state.epoch)
        };
        state.limit_liquidity = if zero_for_one {
            state.limit_liquidity.saturating_sub(net)
        } else {
            state.limit_liquidity.saturating_add(net)
        };
    }

    state.current_tick = if zero_for_one { tick - 1 } else { tick };
}

/// Fee for one exact-in step. When the step used everything available, the
/// whole remainder is the fee so rounding dust cannot strand input.
#[inline]
fn calculate_step_fee(
    amount_in: i128,
    amount_remaining: i128,
    amount_available: i128,
    fee_bps: i128,
    fee_divisor: i128,
) -> i128 {
    if amount_in == amount_available {
        amount_remaining.saturating_sub(amount_in)
    } else {
        let fee_num = amount_in.saturating_mul(fee_bps);
        let fee = fee_num / fee_divisor;
        if fee_num % fee_divisor != 0 {
            fee + 1
        } else {
            fee
        }
    }
}
