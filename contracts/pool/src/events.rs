// Pool events. Compact names, one symbol topic per event.

use soroban_sdk::{Address, Env, Symbol};

/// Topics: ("Initialize",)
/// Data: (token0, token1, tick_spacing, swap_fee_bps, sqrt_price, tick)
pub fn emit_initialize(
    env: &Env,
    token0: &Address,
    token1: &Address,
    tick_spacing: i32,
    swap_fee_bps: u32,
    sqrt_price: u128,
    tick: i32,
) {
    env.events().publish(
        (Symbol::new(env, "Initialize"),),
        (
            token0.clone(),
            token1.clone(),
            tick_spacing,
            swap_fee_bps,
            sqrt_price,
            tick,
        ),
    );
}

/// Topics: ("Swap",)
/// Data: (recipient, zero_for_one, amount_in, amount_out, sqrt_price, tick, epoch)
#[allow(clippy::too_many_arguments)]
pub fn emit_swap(
    env: &Env,
    recipient: &Address,
    zero_for_one: bool,
    amount_in: i128,
    amount_out: i128,
    sqrt_price: u128,
    tick: i32,
    epoch: u32,
) {
    env.events().publish(
        (Symbol::new(env, "Swap"),),
        (
            recipient.clone(),
            zero_for_one,
            amount_in,
            amount_out,
            sqrt_price,
            tick,
            epoch,
        ),
    );
}

/// Topics: ("MintRange",)
/// Data: (position_id, owner, lower, upper, liquidity, amount0, amount1)
#[allow(clippy::too_many_arguments)]
pub fn emit_mint_range(
    env: &Env,
    position_id: u64,
    owner: &Address,
    lower: i32,
    upper: i32,
    liquidity: i128,
    amount0: i128,
    amount1: i128,
) {
    env.events().publish(
        (Symbol::new(env, "MintRange"),),
        (
            position_id,
            owner.clone(),
            lower,
            upper,
            liquidity,
            amount0,
            amount1,
        ),
    );
}

/// Topics: ("BurnRange",)
/// Data: (position_id, lower, upper, liquidity, amount0, amount1)
pub fn emit_burn_range(
    env: &Env,
    position_id: u64,
    lower: i32,
    upper: i32,
    liquidity: i128,
    amount0: i128,
    amount1: i128,
) {
    env.events().publish(
        (Symbol::new(env, "BurnRange"),),
        (position_id, lower, upper, liquidity, amount0, amount1),
    );
}

/// Topics: ("CompoundRange",)
/// Data: (position_id, liquidity, amount0, amount1)
pub fn emit_compound_range(
    env: &Env,
    position_id: u64,
    liquidity: i128,
    amount0: u128,
    amount1: u128,
) {
    env.events().publish(
        (Symbol::new(env, "CompoundRange"),),
        (position_id, liquidity, amount0, amount1),
    );
}

/// Topics: ("CollectRange0",)
/// Data: (position_id, amount)
pub fn emit_collect_range0(env: &Env, position_id: u64, amount: u128) {
    env.events()
        .publish((Symbol::new(env, "CollectRange0"),), (position_id, amount));
}

/// Topics: ("CollectRange1",)
/// Data: (position_id, amount)
pub fn emit_collect_range1(env: &Env, position_id: u64, amount: u128) {
    env.events()
        .publish((Symbol::new(env, "CollectRange1"),), (position_id, amount));
}

/// Topics: ("SyncRangeTick",)
/// Data: (tick, liquidity_delta)
pub fn emit_sync_range_tick(env: &Env, tick: i32, liquidity_delta: i128) {
    env.events()
        .publish((Symbol::new(env, "SyncRangeTick"),), (tick, liquidity_delta));
}

/// Topics: ("MintLimit",)
/// Data: (position_id, owner, zero_for_one, lower, upper, liquidity, amount)
#[allow(clippy::too_many_arguments)]
pub fn emit_mint_limit(
    env: &Env,
    position_id: u64,
    owner: &Address,
    zero_for_one: bool,
    lower: i32,
    upper: i32,
    liquidity: i128,
    amount: i128,
) {
    env.events().publish(
        (Symbol::new(env, "MintLimit"),),
        (
            position_id,
            owner.clone(),
            zero_for_one,
            lower,
            upper,
            liquidity,
            amount,
        ),
    );
}

/// Topics: ("BurnLimit",)
/// Data: (position_id, claim, filled, unfilled, burned_liquidity)
pub fn emit_burn_limit(
    env: &Env,
    position_id: u64,
    claim: i32,
    filled: i128,
    unfilled: i128,
    burned_liquidity: i128,
) {
    env.events().publish(
        (Symbol::new(env, "BurnLimit"),),
        (position_id, claim, filled, unfilled, burned_liquidity),
    );
}

/// Topics: ("SyncLimitPool",)
/// Data: (zero_for_one, liquidity, sqrt_price, epoch)
pub fn emit_sync_limit_pool(
    env: &Env,
    zero_for_one: bool,
    liquidity: i128,
    sqrt_price: u128,
    epoch: u32,
) {
    env.events().publish(
        (Symbol::new(env, "SyncLimitPool"),),
        (zero_for_one, liquidity, sqrt_price, epoch),
    );
}

/// Topics: ("SyncLimitLiquidity",)
/// Data: (zero_for_one, lower, upper, liquidity_delta)
pub fn emit_sync_limit_liquidity(
    env: &Env,
    zero_for_one: bool,
    lower: i32,
    upper: i32,
    liquidity_delta: i128,
) {
    env.events().publish(
        (Symbol::new(env, "SyncLimitLiquidity"),),
        (zero_for_one, lower, upper, liquidity_delta),
    );
}

/// Topics: ("SyncLimitTick",)
/// Data: (zero_for_one, tick, epoch)
pub fn emit_sync_limit_tick(env: &Env, zero_for_one: bool, tick: i32, epoch: u32) {
    env.events().publish(
        (Symbol::new(env, "SyncLimitTick"),),
        (zero_for_one, tick, epoch),
    );
}

/// Topics: ("SampleRecorded",)
/// Data: (index, timestamp)
pub fn emit_sample_recorded(env: &Env, index: u32, timestamp: u64) {
    env.events()
        .publish((Symbol::new(env, "SampleRecorded"),), (index, timestamp));
}

/// Topics: ("SampleCountIncreased",)
/// Data: (count_max,)
pub fn emit_sample_count_increased(env: &Env, count_max: u32) {
    env.events()
        .publish((Symbol::new(env, "SampleCountIncreased"),), (count_max,));
}
