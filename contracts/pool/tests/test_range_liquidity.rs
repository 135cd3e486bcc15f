mod common;

use soroban_sdk::{testutils::Address as _, Address, Env};

#[test]
fn test_mint_range_pulls_funds_and_activates_liquidity() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _, token0, token1) = common::setup_pool(&env);
    let lp = Address::generate(&env);
    common::fund(&env, &token0, &token1, &lp, 1_000_000_000_000);

    let (id, liquidity, amount0, amount1) =
        client.mint_range(&lp, &0, &-100, &100, &1_000_000_000, &1_000_000_000);

    assert_eq!(id, 1);
    assert!(liquidity >= 1000);
    assert!(amount0 > 0 && amount1 > 0);

    // in-range mints go straight into active liquidity
    let pool = client.get_range_pool();
    assert_eq!(pool.liquidity, liquidity);
    assert_eq!(client.get_global_state().liquidity_global, liquidity as u128);

    // the pool holds exactly what it charged
    assert_eq!(common::balance(&env, &token0, &client.address), amount0);
    assert_eq!(common::balance(&env, &token1, &client.address), amount1);

    let pos = client.get_range_position(&id);
    assert_eq!(pos.owner, lp);
    assert_eq!(pos.lower, -100);
    assert_eq!(pos.upper, 100);
    assert_eq!(pos.liquidity, liquidity);
}

#[test]
fn test_mint_then_burn_round_trips_within_rounding() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _, token0, token1) = common::setup_pool(&env);
    let lp = Address::generate(&env);
    common::fund(&env, &token0, &token1, &lp, 1_000_000_000_000);

    let (id, _, amount0, amount1) =
        client.mint_range(&lp, &0, &-500, &500, &1_000_000_000, &1_000_000_000);

    let (out0, out1) = client.burn_range(&lp, &id, &common::ONE_X64);

    // rounding always favors the pool, never by more than a couple units
    assert!(out0 <= amount0 && amount0 - out0 <= 2);
    assert!(out1 <= amount1 && amount1 - out1 <= 2);
    assert_eq!(client.get_range_pool().liquidity, 0);
    assert_eq!(client.get_global_state().liquidity_global, 0);
}

#[test]
fn test_mint_above_range_is_single_sided() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _, token0, token1) = common::setup_pool(&env);
    let lp = Address::generate(&env);
    common::fund(&env, &token0, &token1, &lp, 1_000_000_000_000);

    let (_, liquidity, amount0, amount1) =
        client.mint_range(&lp, &0, &100, &200, &1_000_000_000, &0);

    assert!(liquidity >= 1000);
    assert!(amount0 > 0);
    assert_eq!(amount1, 0);

    // the market sits below the range, nothing becomes active
    assert_eq!(client.get_range_pool().liquidity, 0);
}

#[test]
fn test_remint_adds_to_existing_position() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _, token0, token1) = common::setup_pool(&env);
    let lp = Address::generate(&env);
    common::fund(&env, &token0, &token1, &lp, 1_000_000_000_000);

    let (id, first, _, _) =
        client.mint_range(&lp, &0, &-100, &100, &1_000_000_000, &1_000_000_000);
    let (id2, second, _, _) =
        client.mint_range(&lp, &id, &-100, &100, &500_000_000, &500_000_000);

    assert_eq!(id, id2);
    let pos = client.get_range_position(&id);
    assert_eq!(pos.liquidity, first + second);
}

#[test]
#[should_panic(expected = "position bounds or direction mismatch")]
fn test_remint_with_different_bounds_panics() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _, token0, token1) = common::setup_pool(&env);
    let lp = Address::generate(&env);
    common::fund(&env, &token0, &token1, &lp, 1_000_000_000_000);

    let (id, _, _, _) =
        client.mint_range(&lp, &0, &-100, &100, &1_000_000_000, &1_000_000_000);
    client.mint_range(&lp, &id, &-200, &200, &1_000_000_000, &1_000_000_000);
}

#[test]
#[should_panic(expected = "lower tick must be less than upper tick")]
fn test_inverted_range_panics() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _, token0, token1) = common::setup_pool(&env);
    let lp = Address::generate(&env);
    common::fund(&env, &token0, &token1, &lp, 1_000_000_000_000);

    client.mint_range(&lp, &0, &100, &-100, &1_000_000_000, &1_000_000_000);
}

#[test]
#[should_panic(expected = "tick not aligned to spacing")]
fn test_misaligned_tick_panics() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _, token0, token1) = common::setup_pool(&env);
    let lp = Address::generate(&env);
    common::fund(&env, &token0, &token1, &lp, 1_000_000_000_000);

    client.mint_range(&lp, &0, &-105, &100, &1_000_000_000, &1_000_000_000);
}

#[test]
#[should_panic(expected = "liquidity amount too low")]
fn test_dust_mint_panics() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _, token0, token1) = common::setup_pool(&env);
    let lp = Address::generate(&env);
    common::fund(&env, &token0, &token1, &lp, 1_000_000_000_000);

    client.mint_range(&lp, &0, &-100, &100, &1, &1);
}
