use soroban_sdk::{contracttype, Address};

/// A two-sided liquidity position over a tick range.
#[contracttype]
#[derive(Clone, Debug)]
pub struct RangePosition {
    pub owner: Address,
    pub lower: i32,
    pub upper: i32,
    pub liquidity: i128,
    pub fee_growth_inside_last_0: u128,
    pub fee_growth_inside_last_1: u128,
    pub tokens_owed_0: u128,
    pub tokens_owed_1: u128,
    pub created_at: u64,
    pub updated_at: u64,
}

/// A one-sided order synthesized from limit-ledger liquidity.
///
/// `zero_for_one` orders hold token0 above the market and fill as the price
/// rises; the mirror holds token1 below and fills as it falls. `epoch_last`
/// anchors fill claims: only boundary crossings stamped with a later epoch
/// count as fills for this position.
#[contracttype]
#[derive(Clone, Debug)]
pub struct LimitPosition {
    pub owner: Address,
    pub zero_for_one: bool,
    pub lower: i32,
    pub upper: i32,
    pub liquidity: i128,
    pub epoch_last: u32,
    pub created_at: u64,
    pub updated_at: u64,
}

impl LimitPosition {
    /// Boundary the fill starts from.
    pub fn start_tick(&self) -> i32 {
        if self.zero_for_one {
            self.lower
        } else {
            self.upper
        }
    }

    /// Boundary whose crossing means the order filled completely.
    pub fn far_tick(&self) -> i32 {
        if self.zero_for_one {
            self.upper
        } else {
            self.lower
        }
    }
}

/// View of a range position's current standing.
#[contracttype]
#[derive(Clone, Debug)]
pub struct RangePositionSnapshot {
    pub liquidity: i128,
    pub amount0: i128,
    pub amount1: i128,
    pub fees_owed_0: u128,
    pub fees_owed_1: u128,
    pub seconds_per_liquidity_inside: u128,
}

/// Result of a limit burn or its read-only simulation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LimitFill {
    /// Opposing token paid out for the filled segment
    pub filled: i128,
    /// Deposit token returned for the unfilled remainder
    pub unfilled: i128,
    /// Liquidity removed from the order
    pub burned_liquidity: i128,
    /// Liquidity carried forward past the claim tick
    pub remaining_liquidity: i128,
}
