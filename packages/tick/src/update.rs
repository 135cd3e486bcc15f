// Tick Update and Crossing Logic

use crate::types::{LimitTick, RangeTick};
use coralswap_math::constants::MAX_LIQUIDITY_PER_TICK;
use soroban_sdk::Env;

/// Update a range tick when liquidity is added or removed.
///
/// Returns whether the tick flipped between empty and initialized, so the
/// caller can maintain the bitmap.
#[allow(clippy::too_many_arguments)]
pub fn update_range_tick(
    env: &Env,
    read_tick: impl Fn(&Env, i32) -> RangeTick,
    write_tick: impl Fn(&Env, i32, &RangeTick),
    tick: i32,
    current_tick: i32,
    liquidity_delta: i128,
    fee_growth_global_0: u128,
    fee_growth_global_1: u128,
    seconds_per_liquidity_global: u128,
    tick_seconds_global: i64,
    upper: bool,
) -> bool {
    let mut info = read_tick(env, tick);

    let absolute_before = info.liquidity_absolute;
    let absolute_after = if liquidity_delta > 0 {
        absolute_before.saturating_add(liquidity_delta as u128)
    } else {
        absolute_before.saturating_sub(liquidity_delta.unsigned_abs())
    };

    if absolute_after > MAX_LIQUIDITY_PER_TICK {
        panic!("liquidity per tick overflow");
    }

    let flipped = (absolute_after == 0) != (absolute_before == 0);

    if absolute_before == 0 && absolute_after > 0 {
        // By convention everything accumulated so far happened below the tick.
        if current_tick >= tick {
            info.fee_growth_outside_0 = fee_growth_global_0;
            info.fee_growth_outside_1 = fee_growth_global_1;
            info.seconds_per_liquidity_outside = seconds_per_liquidity_global;
            info.tick_seconds_outside = tick_seconds_global;
        } else {
            info.fee_growth_outside_0 = 0;
            info.fee_growth_outside_1 = 0;
            info.seconds_per_liquidity_outside = 0;
            info.tick_seconds_outside = 0;
        }
    }

    info.liquidity_absolute = absolute_after;

    if upper {
        info.liquidity_delta = info.liquidity_delta.saturating_sub(liquidity_delta);
    } else {
        info.liquidity_delta = info.liquidity_delta.saturating_add(liquidity_delta);
    }

    if absolute_after == 0 {
        info.liquidity_delta = 0;
    }

    write_tick(env, tick, &info);

    flipped
}

/// Update a limit tick when an order is placed, claimed or burned.
pub fn update_limit_tick(
    env: &Env,
    read_tick: impl Fn(&Env, i32) -> LimitTick,
    write_tick: impl Fn(&Env, i32, &LimitTick),
    tick: i32,
    liquidity_delta: i128,
    price_at: u128,
    upper: bool,
) -> bool {
    let mut info = read_tick(env, tick);

    let absolute_before = info.liquidity_absolute;
    let absolute_after = if liquidity_delta > 0 {
        absolute_before.saturating_add(liquidity_delta as u128)
    } else {
        absolute_before.saturating_sub(liquidity_delta.unsigned_abs())
    };

    if absolute_after > MAX_LIQUIDITY_PER_TICK {
        panic!("liquidity per tick overflow");
    }

    let flipped = (absolute_after == 0) != (absolute_before == 0);

    if absolute_before == 0 && absolute_after > 0 {
        info.price_at = price_at;
        info.active = true;
    }

    info.liquidity_absolute = absolute_after;

    if upper {
        info.liquidity_delta = info.liquidity_delta.saturating_sub(liquidity_delta);
    } else {
        info.liquidity_delta = info.liquidity_delta.saturating_add(liquidity_delta);
    }

    if absolute_after == 0 {
        info.liquidity_delta = 0;
        info.active = false;
    }

    write_tick(env, tick, &info);

    flipped
}

/// Cross a range tick boundary during a swap. Flips the outside
/// accumulators and returns the signed liquidity change.
pub fn cross_range_tick(
    env: &Env,
    read_tick: impl Fn(&Env, i32) -> RangeTick,
    write_tick: impl Fn(&Env, i32, &RangeTick),
    tick: i32,
    fee_growth_global_0: u128,
    fee_growth_global_1: u128,
    seconds_per_liquidity_global: u128,
    tick_seconds_global: i64,
) -> i128 {
    let mut info = read_tick(env, tick);

    info.fee_growth_outside_0 = fee_growth_global_0.wrapping_sub(info.fee_growth_outside_0);
    info.fee_growth_outside_1 = fee_growth_global_1.wrapping_sub(info.fee_growth_outside_1);
    info.seconds_per_liquidity_outside =
        seconds_per_liquidity_global.wrapping_sub(info.seconds_per_liquidity_outside);
    info.tick_seconds_outside = tick_seconds_global.wrapping_sub(info.tick_seconds_outside);

    write_tick(env, tick, &info);

    info.liquidity_delta
}

/// Cross a limit tick boundary during a swap.
///
/// A limit crossing consumes the tick: the record is zeroed and the caller
/// unsets the bitmap bit and stamps the fill epoch.
pub fn cross_limit_tick(
    env: &Env,
    read_tick: impl Fn(&Env, i32) -> LimitTick,
    write_tick: impl Fn(&Env, i32, &LimitTick),
    tick: i32,
) -> i128 {
    let info = read_tick(env, tick);
    let liquidity_delta = info.liquidity_delta;

    write_tick(env, tick, &LimitTick::default());

    liquidity_delta
}
