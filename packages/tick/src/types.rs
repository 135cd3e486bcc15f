// Tick Types

use soroban_sdk::contracttype;

/// State kept for each initialized range-ledger tick.
#[contracttype]
#[derive(Clone, Debug)]
pub struct RangeTick {
    /// Net liquidity change when crossing left-to-right
    pub liquidity_delta: i128,
    /// Total liquidity referencing this tick
    pub liquidity_absolute: u128,
    /// Fee growth outside this tick for token0
    pub fee_growth_outside_0: u128,
    /// Fee growth outside this tick for token1
    pub fee_growth_outside_1: u128,
    /// Seconds-per-liquidity accumulated outside this tick
    pub seconds_per_liquidity_outside: u128,
    /// Tick-seconds accumulated outside this tick
    pub tick_seconds_outside: i64,
}

impl Default for RangeTick {
    fn default() -> Self {
        Self {
            liquidity_delta: 0,
            liquidity_absolute: 0,
            fee_growth_outside_0: 0,
            fee_growth_outside_1: 0,
            seconds_per_liquidity_outside: 0,
            tick_seconds_outside: 0,
        }
    }
}

/// State kept for each initialized limit-ledger tick.
///
/// Limit ticks carry no fee accounting: fees for the consumed side are
/// settled per swap step, and a crossing zeroes the tick outright.
#[contracttype]
#[derive(Clone, Debug)]
pub struct LimitTick {
    /// Net liquidity change when crossing in the fill direction
    pub liquidity_delta: i128,
    /// Total liquidity referencing this tick
    pub liquidity_absolute: u128,
    /// Sqrt price at this tick, cached at first touch (Q64.64)
    pub price_at: u128,
    /// Whether this tick is initialized
    pub active: bool,
}

impl Default for LimitTick {
    fn default() -> Self {
        Self {
            liquidity_delta: 0,
            liquidity_absolute: 0,
            price_at: 0,
            active: false,
        }
    }
}
