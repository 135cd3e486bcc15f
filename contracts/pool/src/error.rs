// Pool error taxonomy.
//
// Typed errors via the contracterror derive, grouped by concern, plus the
// string constants used at panic sites.

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PoolError {
    // Initialization (100-199)
    /// Pool has already been initialized
    AlreadyInitialized = 100,
    /// Pool has not been initialized
    NotInitialized = 101,

    // Configuration and bounds (200-299)
    /// Tick spacing must be positive
    InvalidTickSpacing = 200,
    /// Lower tick must be below upper tick, aligned and in bounds
    InvalidTickRange = 201,
    /// Tick outside the supported domain
    InvalidTick = 202,
    /// Price outside the pool's configured bounds
    PriceOutOfBounds = 203,
    /// Position range on the wrong side of the current price
    PriceOutsideBounds = 204,
    /// Liquidity per tick exceeded
    LiquidityOverflow = 205,

    // Authorization (300-399)
    /// Caller is not allowed to perform this action
    Unauthorized = 300,

    // Liquidity and position consistency (400-499)
    /// Burn percent above 100%
    BurnExceedsLiquidity = 400,
    /// Claim tick inconsistent with crossing history
    InvalidClaimTick = 401,
    /// No position under this id
    PositionNotFound = 402,
    /// Position belongs to a different owner
    NotPositionOwner = 403,
    /// Removal would drive liquidity negative
    LiquidityUnderflow = 404,

    // Swap (500-599)
    /// Price limit on the wrong side of the current price
    InvalidPriceLimit = 500,
    /// Swap amount must be positive
    InvalidSwapAmount = 501,

    // Reentrancy (600-699)
    /// Nested state-changing entry
    Reentrancy = 600,

    // Oracle (700-799)
    /// Lookback precedes the oldest retained sample
    SampleLookbackTooOld = 700,
    /// New sample capacity must exceed the current one
    SampleCountNotGrown = 701,
}

pub struct ErrorMsg;

impl ErrorMsg {
    pub const ALREADY_INITIALIZED: &'static str = "pool already initialized";
    pub const NOT_INITIALIZED: &'static str = "pool not initialized";
    pub const INVALID_TICK_SPACING: &'static str = "invalid tick spacing: must be positive";
    pub const INVALID_FEE: &'static str = "invalid fee configuration";
    pub const PRICE_OUT_OF_BOUNDS: &'static str = "price out of configured bounds";
    pub const PRICE_OUTSIDE_BOUNDS: &'static str = "range not on maker side of current price";
    pub const LIQUIDITY_TOO_LOW: &'static str = "liquidity amount too low";
    pub const UNAUTHORIZED: &'static str = "unauthorized: owner only";
    pub const BURN_EXCEEDS_LIQUIDITY: &'static str = "burn percent exceeds one";
    pub const POSITION_NOT_FOUND: &'static str = "position not found";
    pub const NOT_POSITION_OWNER: &'static str = "not position owner";
    pub const POSITION_MISMATCH: &'static str = "position bounds or direction mismatch";
    pub const CLAIM_BEFORE_MINT: &'static str = "claim fills before adding liquidity";
    pub const INVALID_PRICE_LIMIT: &'static str = "price limit on wrong side of current price";
    pub const REENTRANCY: &'static str = "reentrant call";
}
