use coralswap_math::constants::PERCENT_ONE_X64;
use coralswap_math::{get_amount_0_delta, get_amount_1_delta, sqrt_price_at_tick};
use coralswap_position::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};

fn range_position(env: &Env, liquidity: i128) -> RangePosition {
    RangePosition {
        owner: Address::generate(env),
        lower: -100,
        upper: 100,
        liquidity,
        fee_growth_inside_last_0: 0,
        fee_growth_inside_last_1: 0,
        tokens_owed_0: 0,
        tokens_owed_1: 0,
        created_at: 0,
        updated_at: 0,
    }
}

fn limit_position(env: &Env, zero_for_one: bool, liquidity: i128, epoch_last: u32) -> LimitPosition {
    LimitPosition {
        owner: Address::generate(env),
        zero_for_one,
        lower: 100,
        upper: 200,
        liquidity,
        epoch_last,
        created_at: 0,
        updated_at: 0,
    }
}

// ============================================================
// RANGE FEE SETTLEMENT
// ============================================================

#[test]
fn test_settle_fees_accrues_and_checkpoints() {
    let env = Env::default();
    let mut pos = range_position(&env, 1_000_000);

    // growth of 0.5 per unit liquidity on token0
    let inside_0 = 1u128 << 63;
    settle_fees(&mut pos, inside_0, 0);

    assert_eq!(pos.tokens_owed_0, 500_000);
    assert_eq!(pos.tokens_owed_1, 0);
    assert_eq!(pos.fee_growth_inside_last_0, inside_0);

    // settling again at the same growth adds nothing
    settle_fees(&mut pos, inside_0, 0);
    assert_eq!(pos.tokens_owed_0, 500_000);
}

#[test]
fn test_settle_fees_wrapping_checkpoint() {
    let env = Env::default();
    let mut pos = range_position(&env, 1 << 20);
    pos.fee_growth_inside_last_0 = u128::MAX - (1 << 63);

    // growth wrapped past zero; delta is still one half
    settle_fees(&mut pos, (1u128 << 63) - 1, 0);
    assert_eq!(pos.tokens_owed_0, 1 << 19);
}

#[test]
fn test_modify_settles_before_liquidity_change() {
    let env = Env::default();
    let mut pos = range_position(&env, 1_000_000);

    modify_range_position(&mut pos, -400_000, 1u128 << 62, 0);
    // fees computed on the original million units
    assert_eq!(pos.tokens_owed_0, 250_000);
    assert_eq!(pos.liquidity, 600_000);
}

#[test]
fn test_clear_fees_and_emptiness() {
    let env = Env::default();
    let mut pos = range_position(&env, 0);
    pos.tokens_owed_0 = 7;
    assert!(!is_empty(&pos));
    clear_fees(&mut pos, 7, 0);
    assert!(is_empty(&pos));
}

// ============================================================
// RANGE VALIDATION
// ============================================================

#[test]
fn test_validate_tick_range() {
    assert!(validate_tick_range(-60, 60, 60).is_ok());
    assert!(validate_tick_range(60, 60, 60).is_err());
    assert!(validate_tick_range(120, 60, 60).is_err());
    assert!(validate_tick_range(-61, 60, 60).is_err());
    assert!(validate_tick_range(-60, 61, 60).is_err());
    assert!(validate_tick_range(-500_000, 60, 60).is_err());
}

// ============================================================
// LIMIT CLAIM VALIDATION
// ============================================================

#[test]
fn test_claim_at_start_requires_no_crossing() {
    let env = Env::default();
    let pos = limit_position(&env, true, 1000, 5);

    // start = lower for zero_for_one
    assert!(validate_limit_claim(&pos, 100, 10, 5).is_ok());
    assert!(validate_limit_claim(&pos, 100, 10, 3).is_ok());
    assert!(validate_limit_claim(&pos, 100, 10, 6).is_err());
}

#[test]
fn test_claim_past_start_requires_newer_crossing() {
    let env = Env::default();
    let pos = limit_position(&env, true, 1000, 5);

    assert!(validate_limit_claim(&pos, 150, 10, 6).is_ok());
    assert!(validate_limit_claim(&pos, 150, 10, 5).is_err());
    assert!(validate_limit_claim(&pos, 200, 10, 9).is_ok());
}

#[test]
fn test_claim_geometry_checks() {
    let env = Env::default();
    let pos = limit_position(&env, true, 1000, 5);

    assert!(validate_limit_claim(&pos, 90, 10, 9).is_err());
    assert!(validate_limit_claim(&pos, 210, 10, 9).is_err());
    assert!(validate_limit_claim(&pos, 155, 10, 9).is_err());
}

#[test]
fn test_claim_start_is_upper_for_opposite_side() {
    let env = Env::default();
    let pos = limit_position(&env, false, 1000, 5);

    // start = upper for the token1 side
    assert!(validate_limit_claim(&pos, 200, 10, 5).is_ok());
    assert!(validate_limit_claim(&pos, 200, 10, 7).is_err());
    assert!(validate_limit_claim(&pos, 150, 10, 7).is_ok());
}

// ============================================================
// LIMIT FILL ACCOUNTING
// ============================================================

#[test]
fn test_fill_amounts_no_fill_full_burn() {
    let env = Env::default();
    let pos = limit_position(&env, true, 1_000_000, 5);

    // frontier still below the order: everything comes back as deposit
    let frontier = sqrt_price_at_tick(50);
    let fill = limit_fill_amounts(&env, &pos, 100, PERCENT_ONE_X64, frontier, false);

    assert_eq!(fill.filled, 0);
    assert_eq!(fill.burned_liquidity, 1_000_000);
    assert_eq!(fill.remaining_liquidity, 0);

    let deposit = get_amount_0_delta(
        &env,
        sqrt_price_at_tick(100),
        sqrt_price_at_tick(200),
        1_000_000,
        false,
    );
    assert_eq!(fill.unfilled as u128, deposit);
}

#[test]
fn test_fill_amounts_fully_crossed() {
    let env = Env::default();
    let pos = limit_position(&env, true, 1_000_000, 5);

    // far boundary crossed: full conversion regardless of the frontier
    let fill = limit_fill_amounts(&env, &pos, 200, PERCENT_ONE_X64, 0, true);

    assert_eq!(fill.unfilled, 0);
    let converted = get_amount_1_delta(
        &env,
        sqrt_price_at_tick(100),
        sqrt_price_at_tick(200),
        1_000_000,
        false,
    );
    assert_eq!(fill.filled as u128, converted);
}

#[test]
fn test_fill_amounts_partial_claim_carries_remainder() {
    let env = Env::default();
    let pos = limit_position(&env, true, 1_000_000, 5);

    // filled up to tick 150, burning half
    let frontier = sqrt_price_at_tick(150);
    let half = PERCENT_ONE_X64 / 2;
    let fill = limit_fill_amounts(&env, &pos, 150, half, frontier, false);

    assert_eq!(fill.burned_liquidity, 500_000);
    assert_eq!(fill.remaining_liquidity, 500_000);

    // whole position converted over [100, 150): remainder pays out too
    let converted = get_amount_1_delta(
        &env,
        sqrt_price_at_tick(100),
        sqrt_price_at_tick(150),
        1_000_000,
        false,
    );
    assert!(fill.filled as u128 >= converted - 1);
    assert!(fill.filled as u128 <= converted);

    // burned share's top half comes back in token0
    let returned = get_amount_0_delta(
        &env,
        sqrt_price_at_tick(150),
        sqrt_price_at_tick(200),
        500_000,
        false,
    );
    assert_eq!(fill.unfilled as u128, returned);
}

#[test]
fn test_fill_amounts_opposite_side() {
    let env = Env::default();
    let pos = limit_position(&env, false, 1_000_000, 5);

    // price fell to tick 150: filled over (150, 200]
    let frontier = sqrt_price_at_tick(150);
    let fill = limit_fill_amounts(&env, &pos, 150, PERCENT_ONE_X64, frontier, false);

    let converted = get_amount_0_delta(
        &env,
        sqrt_price_at_tick(150),
        sqrt_price_at_tick(200),
        1_000_000,
        false,
    );
    let returned = get_amount_1_delta(
        &env,
        sqrt_price_at_tick(100),
        sqrt_price_at_tick(150),
        1_000_000,
        false,
    );
    // full burn: the whole order converted over (150, 200]
    assert_eq!(fill.filled as u128, converted);
    assert_eq!(fill.unfilled as u128, returned);
}
