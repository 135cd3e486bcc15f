mod common;

use soroban_sdk::Env;

#[test]
fn test_initialize_sets_state() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _owner, token0, token1) = common::setup_pool(&env);

    let imm = client.get_immutables();
    assert_eq!(imm.token0, token0);
    assert_eq!(imm.token1, token1);
    assert!(imm.token0 < imm.token1);
    assert_eq!(imm.tick_spacing, common::DEFAULT_TICK_SPACING);
    assert_eq!(imm.swap_fee_bps, common::DEFAULT_SWAP_FEE_BPS);
    assert_eq!(imm.protocol_fee_bps, common::DEFAULT_PROTOCOL_FEE_BPS);

    let pool = client.get_range_pool();
    assert_eq!(pool.sqrt_price, common::SQRT_PRICE_1_1);
    assert_eq!(pool.tick_at_price, 0);
    assert_eq!(pool.liquidity, 0);
    assert_eq!(pool.samples.count, 1);
    assert_eq!(pool.samples.count_max, 1);

    let global = client.get_global_state();
    assert_eq!(global.epoch, 1);
    assert_eq!(global.position_id_next, 1);
    assert!(global.unlocked);
    assert_eq!(global.liquidity_global, 0);

    // both order ledgers start parked at the market price
    for side in [true, false] {
        let lpool = client.get_limit_pool(&side);
        assert_eq!(lpool.sqrt_price, common::SQRT_PRICE_1_1);
        assert_eq!(lpool.liquidity, 0);
        assert_eq!(lpool.protocol_fees, 0);
    }
}

#[test]
#[should_panic(expected = "pool already initialized")]
fn test_initialize_twice_panics() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, owner, token0, token1) = common::setup_pool(&env);

    client.initialize(
        &owner,
        &token0,
        &token1,
        &common::DEFAULT_TICK_SPACING,
        &common::DEFAULT_SWAP_FEE_BPS,
        &common::DEFAULT_PROTOCOL_FEE_BPS,
        &common::SQRT_PRICE_1_1,
    );
}

#[test]
#[should_panic(expected = "invalid tick spacing")]
fn test_initialize_rejects_zero_spacing() {
    let env = Env::default();
    env.mock_all_auths();

    common::setup_custom_pool(
        &env,
        0,
        common::DEFAULT_SWAP_FEE_BPS,
        common::DEFAULT_PROTOCOL_FEE_BPS,
        common::SQRT_PRICE_1_1,
    );
}

#[test]
#[should_panic(expected = "invalid fee configuration")]
fn test_initialize_rejects_total_fee() {
    let env = Env::default();
    env.mock_all_auths();

    common::setup_custom_pool(
        &env,
        common::DEFAULT_TICK_SPACING,
        10_000,
        common::DEFAULT_PROTOCOL_FEE_BPS,
        common::SQRT_PRICE_1_1,
    );
}

#[test]
#[should_panic(expected = "price out of configured bounds")]
fn test_initialize_rejects_bad_price() {
    let env = Env::default();
    env.mock_all_auths();

    common::setup_custom_pool(
        &env,
        common::DEFAULT_TICK_SPACING,
        common::DEFAULT_SWAP_FEE_BPS,
        common::DEFAULT_PROTOCOL_FEE_BPS,
        1, // far below the minimum sqrt price
    );
}

#[test]
#[should_panic(expected = "position not found")]
fn test_missing_position_panics() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _, _, _) = common::setup_pool(&env);
    client.get_range_position(&42);
}
