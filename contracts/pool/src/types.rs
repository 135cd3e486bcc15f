// Pool state types.

use coralswap_oracle::SampleState;
use soroban_sdk::{contracttype, Address};

pub use coralswap_position::{LimitFill, LimitPosition, RangePosition, RangePositionSnapshot};
pub use coralswap_tick::{LimitTick, RangeTick};

/// Configuration fixed at initialization.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Immutables {
    pub owner: Address,
    /// Sorted: token0 < token1
    pub token0: Address,
    pub token1: Address,
    pub tick_spacing: i32,
    pub swap_fee_bps: u32,
    pub protocol_fee_bps: u32,
    pub min_sqrt_price: u128,
    pub max_sqrt_price: u128,
    pub genesis_time: u64,
}

/// Bookkeeping shared by every ledger.
#[contracttype]
#[derive(Clone, Debug)]
pub struct GlobalState {
    /// Total range liquidity minted across all positions
    pub liquidity_global: u128,
    /// Next position id to allocate
    pub position_id_next: u64,
    /// Fill epoch; bumped once per crossing event and per frontier move
    pub epoch: u32,
    /// Reentrancy flag: false while an entry point is executing
    pub unlocked: bool,
    pub protocol_fee_bps: u32,
}

/// The two-sided range ledger plus the time accumulators and the sample
/// ring bookkeeping.
#[contracttype]
#[derive(Clone, Debug)]
pub struct RangePoolState {
    pub sqrt_price: u128,
    pub tick_at_price: i32,
    /// Liquidity active at the current price
    pub liquidity: i128,
    pub fee_growth_global_0: u128,
    pub fee_growth_global_1: u128,
    pub seconds_per_liquidity_global: u128,
    pub tick_seconds_global: i64,
    /// Last time the accumulators were advanced
    pub last_timestamp: u64,
    pub samples: SampleState,
}

/// One limit sub-ledger. `sqrt_price` is the fill frontier: the farthest
/// price fills in this direction have reached.
#[contracttype]
#[derive(Clone, Debug)]
pub struct LimitPoolState {
    pub sqrt_price: u128,
    pub tick_at_price: i32,
    /// Limit liquidity currently between its boundaries
    pub liquidity: i128,
    /// Protocol fees accrued, denominated in the consuming swap's input token
    pub protocol_fees: u128,
}

/// Swap execution result.
#[contracttype]
#[derive(Clone, Debug)]
pub struct SwapResult {
    pub amount_in: i128,
    pub amount_out: i128,
    pub sqrt_price: u128,
    pub tick_at_price: i32,
}

/// Read-only swap simulation result.
#[contracttype]
#[derive(Clone, Debug)]
pub struct QuoteResult {
    pub amount_in: i128,
    pub amount_out: i128,
    pub price_after: u128,
}
