// Pool storage.
//
// Every record lives in its own persistent slot under a typed key. Limit
// ledger keys carry the order direction: `true` is the token0 ledger above
// the market (pool0), `false` the token1 ledger below it (pool1).

use soroban_sdk::{contracttype, Env};

use coralswap_oracle::Sample;
use coralswap_swap::SwapHost;
use coralswap_tick::{LimitTick, RangeTick};
use coralswap_tickmap::{next_initialized_tick, stamp_epoch_at_tick, unset_tick, BitmapStore, EpochStore};

use crate::error::ErrorMsg;
use crate::events::{emit_sync_limit_tick, emit_sync_range_tick};
use crate::types::{GlobalState, Immutables, LimitPoolState, RangePoolState};

#[contracttype]
pub enum DataKey {
    Immutables,
    Global,
    RangePool,
    LimitPool(bool),
    RangeTick(i32),
    LimitTick(bool, i32),
    RangeWord(u32),
    RangeBlock(u32),
    LimitWord(bool, u32),
    LimitBlock(bool, u32),
    EpochWord(bool, u32),
    RangePosition(u64),
    LimitPosition(u64),
    Sample(u32),
}

/// Persistent storage lifetime in ledgers (~1 year at 5s/ledger)
const PERSISTENT_LIFETIME: u32 = 6_307_200;
const PERSISTENT_BUMP: u32 = 6_307_200;

fn extend_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME, PERSISTENT_BUMP);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().persistent().has(&DataKey::Immutables)
}

pub fn write_immutables(env: &Env, immutables: &Immutables) {
    env.storage()
        .persistent()
        .set(&DataKey::Immutables, immutables);
    extend_ttl(env, &DataKey::Immutables);
}

pub fn read_immutables(env: &Env) -> Immutables {
    env.storage()
        .persistent()
        .get(&DataKey::Immutables)
        .unwrap_or_else(|| panic!("{}", ErrorMsg::NOT_INITIALIZED))
}

pub fn write_global(env: &Env, global: &GlobalState) {
    env.storage().persistent().set(&DataKey::Global, global);
    extend_ttl(env, &DataKey::Global);
}

pub fn read_global(env: &Env) -> GlobalState {
    env.storage()
        .persistent()
        .get(&DataKey::Global)
        .unwrap_or_else(|| panic!("{}", ErrorMsg::NOT_INITIALIZED))
}

pub fn write_range_pool(env: &Env, pool: &RangePoolState) {
    env.storage().persistent().set(&DataKey::RangePool, pool);
    extend_ttl(env, &DataKey::RangePool);
}

pub fn read_range_pool(env: &Env) -> RangePoolState {
    env.storage()
        .persistent()
        .get(&DataKey::RangePool)
        .unwrap_or_else(|| panic!("{}", ErrorMsg::NOT_INITIALIZED))
}

pub fn write_limit_pool(env: &Env, zero_for_one: bool, pool: &LimitPoolState) {
    let key = DataKey::LimitPool(zero_for_one);
    env.storage().persistent().set(&key, pool);
    extend_ttl(env, &key);
}

pub fn read_limit_pool(env: &Env, zero_for_one: bool) -> LimitPoolState {
    env.storage()
        .persistent()
        .get(&DataKey::LimitPool(zero_for_one))
        .unwrap_or_else(|| panic!("{}", ErrorMsg::NOT_INITIALIZED))
}

// ============================================================
// TICK RECORDS
// ============================================================

pub fn read_range_tick(env: &Env, tick: i32) -> RangeTick {
    env.storage()
        .persistent()
        .get(&DataKey::RangeTick(tick))
        .unwrap_or_default()
}

pub fn write_range_tick(env: &Env, tick: i32, info: &RangeTick) {
    let key = DataKey::RangeTick(tick);
    if info.liquidity_absolute == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, info);
        extend_ttl(env, &key);
    }
}

pub fn read_limit_tick(env: &Env, zero_for_one: bool, tick: i32) -> LimitTick {
    env.storage()
        .persistent()
        .get(&DataKey::LimitTick(zero_for_one, tick))
        .unwrap_or_default()
}

pub fn write_limit_tick(env: &Env, zero_for_one: bool, tick: i32, info: &LimitTick) {
    let key = DataKey::LimitTick(zero_for_one, tick);
    if info.liquidity_absolute == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, info);
        extend_ttl(env, &key);
    }
}

// ============================================================
// POSITIONS
// ============================================================

pub fn read_range_position(env: &Env, id: u64) -> Option<crate::types::RangePosition> {
    env.storage().persistent().get(&DataKey::RangePosition(id))
}

pub fn write_range_position(env: &Env, id: u64, pos: &crate::types::RangePosition) {
    let key = DataKey::RangePosition(id);
    env.storage().persistent().set(&key, pos);
    extend_ttl(env, &key);
}

pub fn remove_range_position(env: &Env, id: u64) {
    env.storage()
        .persistent()
        .remove(&DataKey::RangePosition(id));
}

pub fn read_limit_position(env: &Env, id: u64) -> Option<crate::types::LimitPosition> {
    env.storage().persistent().get(&DataKey::LimitPosition(id))
}

pub fn write_limit_position(env: &Env, id: u64, pos: &crate::types::LimitPosition) {
    let key = DataKey::LimitPosition(id);
    env.storage().persistent().set(&key, pos);
    extend_ttl(env, &key);
}

pub fn remove_limit_position(env: &Env, id: u64) {
    env.storage()
        .persistent()
        .remove(&DataKey::LimitPosition(id));
}

// ============================================================
// ORACLE SAMPLES
// ============================================================

pub fn read_sample(env: &Env, index: u32) -> Sample {
    env.storage()
        .persistent()
        .get(&DataKey::Sample(index))
        .unwrap_or_default()
}

pub fn write_sample(env: &Env, index: u32, sample: &Sample) {
    let key = DataKey::Sample(index);
    env.storage().persistent().set(&key, sample);
    extend_ttl(env, &key);
}

// ============================================================
// BITMAP AND EPOCH ADAPTERS
// ============================================================

fn read_word(env: &Env, key: &DataKey) -> u128 {
    env.storage().persistent().get(key).unwrap_or(0)
}

fn write_word(env: &Env, key: &DataKey, value: u128) {
    if value == 0 {
        env.storage().persistent().remove(key);
    } else {
        env.storage().persistent().set(key, &value);
        extend_ttl(env, key);
    }
}

/// The range ledger's initialized-tick bitmap over persistent words.
pub struct RangeBitmap<'a> {
    pub env: &'a Env,
}

impl BitmapStore for RangeBitmap<'_> {
    fn word(&self, index: u32) -> u128 {
        read_word(self.env, &DataKey::RangeWord(index))
    }

    fn set_word(&mut self, index: u32, value: u128) {
        write_word(self.env, &DataKey::RangeWord(index), value);
    }

    fn block(&self, index: u32) -> u128 {
        read_word(self.env, &DataKey::RangeBlock(index))
    }

    fn set_block(&mut self, index: u32, value: u128) {
        write_word(self.env, &DataKey::RangeBlock(index), value);
    }
}

/// One limit ledger's initialized-tick bitmap.
pub struct LimitBitmap<'a> {
    pub env: &'a Env,
    pub zero_for_one: bool,
}

impl BitmapStore for LimitBitmap<'_> {
    fn word(&self, index: u32) -> u128 {
        read_word(self.env, &DataKey::LimitWord(self.zero_for_one, index))
    }

    fn set_word(&mut self, index: u32, value: u128) {
        write_word(self.env, &DataKey::LimitWord(self.zero_for_one, index), value);
    }

    fn block(&self, index: u32) -> u128 {
        read_word(self.env, &DataKey::LimitBlock(self.zero_for_one, index))
    }

    fn set_block(&mut self, index: u32, value: u128) {
        write_word(self.env, &DataKey::LimitBlock(self.zero_for_one, index), value);
    }
}

/// One limit ledger's fill-epoch stamps.
pub struct LimitEpochs<'a> {
    pub env: &'a Env,
    pub zero_for_one: bool,
}

impl EpochStore for LimitEpochs<'_> {
    fn word(&self, index: u32) -> u128 {
        read_word(self.env, &DataKey::EpochWord(self.zero_for_one, index))
    }

    fn set_word(&mut self, index: u32, value: u128) {
        write_word(self.env, &DataKey::EpochWord(self.zero_for_one, index), value);
    }
}

// ============================================================
// SWAP ENGINE HOST
// ============================================================

/// Storage access for the swap engine. `order_side` is the consumed limit
/// ledger's direction key: pool1 (`false`) for zero-for-one swaps, pool0
/// (`true`) otherwise.
pub struct PoolHost {
    pub tick_spacing: i32,
    pub order_side: bool,
}

impl SwapHost for PoolHost {
    fn next_range_tick(&self, env: &Env, from: i32, lte: bool) -> Option<i32> {
        let store = RangeBitmap { env };
        next_initialized_tick(&store, from, self.tick_spacing, lte)
    }

    fn next_limit_tick(&self, env: &Env, from: i32, lte: bool) -> Option<i32> {
        let store = LimitBitmap {
            env,
            zero_for_one: self.order_side,
        };
        next_initialized_tick(&store, from, self.tick_spacing, lte)
    }

    fn range_liquidity_net(&self, env: &Env, tick: i32) -> i128 {
        read_range_tick(env, tick).liquidity_delta
    }

    fn limit_liquidity_net(&self, env: &Env, tick: i32) -> i128 {
        read_limit_tick(env, self.order_side, tick).liquidity_delta
    }

    fn cross_range_tick(
        &self,
        env: &Env,
        tick: i32,
        fee_growth_global_0: u128,
        fee_growth_global_1: u128,
        seconds_per_liquidity_global: u128,
        tick_seconds_global: i64,
    ) -> i128 {
        let net = coralswap_tick::cross_range_tick(
            env,
            |e, t| read_range_tick(e, t),
            |e, t, info| write_range_tick(e, t, info),
            tick,
            fee_growth_global_0,
            fee_growth_global_1,
            seconds_per_liquidity_global,
            tick_seconds_global,
        );
        emit_sync_range_tick(env, tick, net);
        net
    }

    fn cross_limit_tick(&self, env: &Env, tick: i32, epoch: u32) -> i128 {
        let net = coralswap_tick::cross_limit_tick(
            env,
            |e, t| read_limit_tick(e, self.order_side, t),
            |e, t, info| write_limit_tick(e, self.order_side, t, info),
            tick,
        );

        // a crossed limit tick is consumed: drop its bit, stamp the epoch
        let mut bitmap = LimitBitmap {
            env,
            zero_for_one: self.order_side,
        };
        unset_tick(&mut bitmap, tick, self.tick_spacing);

        let mut epochs = LimitEpochs {
            env,
            zero_for_one: self.order_side,
        };
        stamp_epoch_at_tick(&mut epochs, tick, self.tick_spacing, epoch);

        emit_sync_limit_tick(env, self.order_side, tick, epoch);
        net
    }

    fn stamp_frontier(&self, env: &Env, tick: i32, epoch: u32) {
        let mut epochs = LimitEpochs {
            env,
            zero_for_one: self.order_side,
        };
        stamp_epoch_at_tick(&mut epochs, tick, self.tick_spacing, epoch);
        emit_sync_limit_tick(env, self.order_side, tick, epoch);
    }
}
