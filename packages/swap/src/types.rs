use soroban_sdk::Env;

/// Mutable pool state threaded through a swap.
///
/// `limit_*` fields describe the limit sub-ledger the swap consumes: pool1
/// for `zero_for_one` swaps, pool0 otherwise. `limit_sqrt_price` is that
/// ledger's fill frontier; limit liquidity only participates once the market
/// price has caught up with it.
#[derive(Clone)]
pub struct SwapState {
    pub sqrt_price: u128,
    pub current_tick: i32,
    pub range_liquidity: i128,
    pub limit_liquidity: i128,
    pub limit_sqrt_price: u128,
    pub tick_spacing: i32,
    pub fee_growth_global_0: u128,
    pub fee_growth_global_1: u128,
    pub seconds_per_liquidity_global: u128,
    pub tick_seconds_global: i64,
    pub epoch: u32,
    /// Protocol fees accrued by this swap, input-token units
    pub protocol_fee_accrued: u128,
}

/// Storage and event access for the swap engine, implemented by the pool
/// contract over its persistent slots. Limit-side methods address the
/// consumed direction's ledger; the contract bakes the direction in when it
/// builds the host.
pub trait SwapHost {
    /// Nearest initialized range tick: at-or-below `from` when `lte`,
    /// strictly above otherwise.
    fn next_range_tick(&self, env: &Env, from: i32, lte: bool) -> Option<i32>;
    /// Same for the consumed limit ledger.
    fn next_limit_tick(&self, env: &Env, from: i32, lte: bool) -> Option<i32>;

    /// Read-only peeks used by quotes.
    fn range_liquidity_net(&self, env: &Env, tick: i32) -> i128;
    fn limit_liquidity_net(&self, env: &Env, tick: i32) -> i128;

    /// Cross a range tick: flip outside accumulators, emit the tick sync,
    /// return the signed liquidity change.
    #[allow(clippy::too_many_arguments)]
    fn cross_range_tick(
        &self,
        env: &Env,
        tick: i32,
        fee_growth_global_0: u128,
        fee_growth_global_1: u128,
        seconds_per_liquidity_global: u128,
        tick_seconds_global: i64,
    ) -> i128;

    /// Cross a limit tick: zero the record, unset its bitmap bit, stamp
    /// `epoch` into the direction's epoch map, emit the tick sync, return
    /// the signed liquidity change.
    fn cross_limit_tick(&self, env: &Env, tick: i32, epoch: u32) -> i128;

    /// Stamp the fill frontier's snapped tick after a partial-tick fill so
    /// mid-range claims can validate against it.
    fn stamp_frontier(&self, env: &Env, tick: i32, epoch: u32);
}
