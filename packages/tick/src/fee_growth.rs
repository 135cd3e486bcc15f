// Fee Growth and Accumulator-Inside Calculations

use crate::types::RangeTick;
use soroban_sdk::Env;

/// Fee growth accumulated strictly between two ticks, per unit liquidity.
/// Intermediate values wrap by design; differences of snapshots are exact.
pub fn get_fee_growth_inside(
    env: &Env,
    read_tick: impl Fn(&Env, i32) -> RangeTick,
    lower_tick: i32,
    upper_tick: i32,
    current_tick: i32,
    fee_growth_global_0: u128,
    fee_growth_global_1: u128,
) -> (u128, u128) {
    let lower_info = read_tick(env, lower_tick);
    let upper_info = read_tick(env, upper_tick);

    let (fee_growth_below_0, fee_growth_below_1) = if current_tick >= lower_tick {
        (
            lower_info.fee_growth_outside_0,
            lower_info.fee_growth_outside_1,
        )
    } else {
        (
            fee_growth_global_0.wrapping_sub(lower_info.fee_growth_outside_0),
            fee_growth_global_1.wrapping_sub(lower_info.fee_growth_outside_1),
        )
    };

    let (fee_growth_above_0, fee_growth_above_1) = if current_tick < upper_tick {
        (
            upper_info.fee_growth_outside_0,
            upper_info.fee_growth_outside_1,
        )
    } else {
        (
            fee_growth_global_0.wrapping_sub(upper_info.fee_growth_outside_0),
            fee_growth_global_1.wrapping_sub(upper_info.fee_growth_outside_1),
        )
    };

    let fee_growth_inside_0 = fee_growth_global_0
        .wrapping_sub(fee_growth_below_0)
        .wrapping_sub(fee_growth_above_0);

    let fee_growth_inside_1 = fee_growth_global_1
        .wrapping_sub(fee_growth_below_1)
        .wrapping_sub(fee_growth_above_1);

    (fee_growth_inside_0, fee_growth_inside_1)
}

/// Seconds-per-liquidity and tick-seconds accumulated between two ticks,
/// following the same outside-flipping bookkeeping as the fee growth.
#[allow(clippy::too_many_arguments)]
pub fn get_accumulators_inside(
    env: &Env,
    read_tick: impl Fn(&Env, i32) -> RangeTick,
    lower_tick: i32,
    upper_tick: i32,
    current_tick: i32,
    seconds_per_liquidity_global: u128,
    tick_seconds_global: i64,
) -> (u128, i64) {
    let lower_info = read_tick(env, lower_tick);
    let upper_info = read_tick(env, upper_tick);

    let (spl_below, ts_below) = if current_tick >= lower_tick {
        (
            lower_info.seconds_per_liquidity_outside,
            lower_info.tick_seconds_outside,
        )
    } else {
        (
            seconds_per_liquidity_global.wrapping_sub(lower_info.seconds_per_liquidity_outside),
            tick_seconds_global.wrapping_sub(lower_info.tick_seconds_outside),
        )
    };

    let (spl_above, ts_above) = if current_tick < upper_tick {
        (
            upper_info.seconds_per_liquidity_outside,
            upper_info.tick_seconds_outside,
        )
    } else {
        (
            seconds_per_liquidity_global.wrapping_sub(upper_info.seconds_per_liquidity_outside),
            tick_seconds_global.wrapping_sub(upper_info.tick_seconds_outside),
        )
    };

    (
        seconds_per_liquidity_global
            .wrapping_sub(spl_below)
            .wrapping_sub(spl_above),
        tick_seconds_global.wrapping_sub(ts_below).wrapping_sub(ts_above),
    )
}
