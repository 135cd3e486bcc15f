#![allow(dead_code)]

use soroban_sdk::{testutils::Address as _, token, Address, Env};

use coralswap_pool::{CoralPool, CoralPoolClient};

// Test constants
pub const DEFAULT_TICK_SPACING: i32 = 10;
pub const DEFAULT_SWAP_FEE_BPS: u32 = 30; // 0.30%
pub const DEFAULT_PROTOCOL_FEE_BPS: u32 = 1000; // 10% of the swap fee
pub const SQRT_PRICE_1_1: u128 = 1u128 << 64; // price = 1.0
pub const ONE_X64: u128 = 1u128 << 64; // 100% burn

/// Setup pool with default parameters. Returns the client, the owner and
/// the sorted token addresses.
pub fn setup_pool(env: &Env) -> (CoralPoolClient<'_>, Address, Address, Address) {
    setup_custom_pool(
        env,
        DEFAULT_TICK_SPACING,
        DEFAULT_SWAP_FEE_BPS,
        DEFAULT_PROTOCOL_FEE_BPS,
        SQRT_PRICE_1_1,
    )
}

/// Setup pool with custom parameters
pub fn setup_custom_pool(
    env: &Env,
    tick_spacing: i32,
    swap_fee_bps: u32,
    protocol_fee_bps: u32,
    start_sqrt_price: u128,
) -> (CoralPoolClient<'_>, Address, Address, Address) {
    let owner = Address::generate(env);
    let token_a = create_token(env, &owner);
    let token_b = create_token(env, &owner);

    let pool_id = env.register(CoralPool, ());
    let client = CoralPoolClient::new(env, &pool_id);

    client.initialize(
        &owner,
        &token_a,
        &token_b,
        &tick_spacing,
        &swap_fee_bps,
        &protocol_fee_bps,
        &start_sqrt_price,
    );

    let (token0, token1) = if token_a < token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    };

    (client, owner, token0, token1)
}

/// Create a test token
pub fn create_token(env: &Env, admin: &Address) -> Address {
    env.register_stellar_asset_contract_v2(admin.clone()).address()
}

/// Mint tokens to an address
pub fn mint_tokens(env: &Env, token: &Address, to: &Address, amount: i128) {
    token::StellarAssetClient::new(env, token).mint(to, &amount);
}

/// Mint both pool tokens to an address
pub fn fund(env: &Env, token0: &Address, token1: &Address, to: &Address, amount: i128) {
    mint_tokens(env, token0, to, amount);
    mint_tokens(env, token1, to, amount);
}

pub fn balance(env: &Env, token: &Address, who: &Address) -> i128 {
    token::Client::new(env, token).balance(who)
}
