#![no_std]

use soroban_sdk::{contract, contractimpl, token, Address, Env, Vec};

use coralswap_math::{
    constants::{MAX_PROTOCOL_FEE_BPS, MAX_SWAP_FEE_BPS, MAX_SQRT_PRICE, MIN_LIQUIDITY, MIN_SQRT_PRICE},
    get_amount_0_delta, get_amount_1_delta, get_amounts_for_liquidity, get_liquidity_for_amount0,
    get_liquidity_for_amount1, get_liquidity_for_amounts, mul_q64, sqrt_price_at_tick,
    tick_at_sqrt_price, u128_to_i128_saturating, ONE_X64,
};
use coralswap_oracle::{initialize_samples, record as record_sample};
use coralswap_position::{
    clear_fees, is_empty, limit_fill_amounts, modify_range_position, pending_fees, settle_fees,
    validate_limit_claim, validate_tick_range,
};
use coralswap_swap::{engine_swap, SwapState};
use coralswap_tick::{get_accumulators_inside, get_fee_growth_inside, update_limit_tick, update_range_tick};
use coralswap_tickmap::{epoch_at_tick, set_tick, unset_tick};

mod error;
mod events;
mod storage;
pub mod types;

use error::ErrorMsg;
use events::*;
use storage::*;
use types::{
    GlobalState, Immutables, LimitFill, LimitPoolState, LimitPosition, LimitTick, QuoteResult,
    RangePoolState, RangePosition, RangePositionSnapshot, RangeTick, SwapResult,
};

#[contract]
pub struct CoralPool;

#[contractimpl]
impl CoralPool {
    // ========================================================
    // INITIALIZATION
    // ========================================================

    /// Initialize the pool. Tokens are stored sorted; all three ledgers
    /// start at `start_sqrt_price`.
    pub fn initialize(
        env: Env,
        owner: Address,
        token_a: Address,
        token_b: Address,
        tick_spacing: i32,
        swap_fee_bps: u32,
        protocol_fee_bps: u32,
        start_sqrt_price: u128,
    ) {
        owner.require_auth();

        if is_initialized(&env) {
            panic!("{}", ErrorMsg::ALREADY_INITIALIZED);
        }
        if tick_spacing <= 0 {
            panic!("{}", ErrorMsg::INVALID_TICK_SPACING);
        }
        if swap_fee_bps >= MAX_SWAP_FEE_BPS || protocol_fee_bps > MAX_PROTOCOL_FEE_BPS {
            panic!("{}", ErrorMsg::INVALID_FEE);
        }
        if start_sqrt_price < MIN_SQRT_PRICE || start_sqrt_price > MAX_SQRT_PRICE {
            panic!("{}", ErrorMsg::PRICE_OUT_OF_BOUNDS);
        }

        let (token0, token1) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };

        let now = env.ledger().timestamp();
        let tick = tick_at_sqrt_price(start_sqrt_price);

        write_immutables(
            &env,
            &Immutables {
                owner,
                token0: token0.clone(),
                token1: token1.clone(),
                tick_spacing,
                swap_fee_bps,
                protocol_fee_bps,
                min_sqrt_price: MIN_SQRT_PRICE,
                max_sqrt_price: MAX_SQRT_PRICE,
                genesis_time: now,
            },
        );

        write_global(
            &env,
            &GlobalState {
                liquidity_global: 0,
                position_id_next: 1,
                // stamp zero stays the never-crossed sentinel
                epoch: 1,
                unlocked: true,
                protocol_fee_bps,
            },
        );

        let samples = initialize_samples(&env, |e, i, s| write_sample(e, i, s), now);
        write_range_pool(
            &env,
            &RangePoolState {
                sqrt_price: start_sqrt_price,
                tick_at_price: tick,
                liquidity: 0,
                fee_growth_global_0: 0,
                fee_growth_global_1: 0,
                seconds_per_liquidity_global: 0,
                tick_seconds_global: 0,
                last_timestamp: now,
                samples,
            },
        );

        let limit_pool = LimitPoolState {
            sqrt_price: start_sqrt_price,
            tick_at_price: tick,
            liquidity: 0,
            protocol_fees: 0,
        };
        write_limit_pool(&env, true, &limit_pool);
        write_limit_pool(&env, false, &limit_pool);

        emit_initialize(
            &env,
            &token0,
            &token1,
            tick_spacing,
            swap_fee_bps,
            start_sqrt_price,
            tick,
        );
    }

    // ========================================================
    // RANGE POSITIONS
    // ========================================================

    /// Mint two-sided liquidity over `[lower, upper]`. `position_id = 0`
    /// allocates a fresh id; a nonzero id adds to an existing position
    /// after settling its accrued fees. Returns the id, the liquidity
    /// minted and the amounts pulled in.
    pub fn mint_range(
        env: Env,
        to: Address,
        position_id: u64,
        lower: i32,
        upper: i32,
        amount0: i128,
        amount1: i128,
    ) -> (u64, i128, i128, i128) {
        to.require_auth();
        let imm = read_immutables(&env);
        let mut global = lock(&env);
        let mut pool = read_range_pool(&env);
        advance_accumulators(&env, &mut pool);

        if let Err(msg) = validate_tick_range(lower, upper, imm.tick_spacing) {
            panic!("{}", msg);
        }

        let sqrt_lower = sqrt_price_at_tick(lower);
        let sqrt_upper = sqrt_price_at_tick(upper);

        let liquidity =
            get_liquidity_for_amounts(&env, amount0, amount1, sqrt_lower, sqrt_upper, pool.sqrt_price);
        if liquidity < MIN_LIQUIDITY {
            panic!("{}", ErrorMsg::LIQUIDITY_TOO_LOW);
        }

        let (amount0_due, amount1_due) =
            get_amounts_for_liquidity(&env, liquidity, sqrt_lower, sqrt_upper, pool.sqrt_price, true);

        Self::apply_range_delta(&env, &mut pool, lower, upper, liquidity);
        global.liquidity_global = global.liquidity_global.saturating_add(liquidity as u128);

        let (inside_0, inside_1) = Self::fee_growth_inside(&env, &pool, lower, upper);

        let now = env.ledger().timestamp();
        let id = match read_range_position(&env, position_id) {
            Some(mut pos) => {
                if pos.owner != to {
                    panic!("{}", ErrorMsg::NOT_POSITION_OWNER);
                }
                if pos.lower != lower || pos.upper != upper {
                    panic!("{}", ErrorMsg::POSITION_MISMATCH);
                }
                modify_range_position(&mut pos, liquidity, inside_0, inside_1);
                pos.updated_at = now;
                write_range_position(&env, position_id, &pos);
                position_id
            }
            None => {
                if position_id != 0 {
                    panic!("{}", ErrorMsg::POSITION_NOT_FOUND);
                }
                let id = global.position_id_next;
                global.position_id_next += 1;
                write_range_position(
                    &env,
                    id,
                    &RangePosition {
                        owner: to.clone(),
                        lower,
                        upper,
                        liquidity,
                        fee_growth_inside_last_0: inside_0,
                        fee_growth_inside_last_1: inside_1,
                        tokens_owed_0: 0,
                        tokens_owed_1: 0,
                        created_at: now,
                        updated_at: now,
                    },
                );
                id
            }
        };

        write_range_pool(&env, &pool);

        let pool_addr = env.current_contract_address();
        if amount0_due > 0 {
            token::Client::new(&env, &imm.token0).transfer(&to, &pool_addr, &amount0_due);
        }
        if amount1_due > 0 {
            token::Client::new(&env, &imm.token1).transfer(&to, &pool_addr, &amount1_due);
        }

        emit_mint_range(&env, id, &to, lower, upper, liquidity, amount0_due, amount1_due);
        unlock(&env, &mut global);

        (id, liquidity, amount0_due, amount1_due)
    }

    /// Burn a Q64.64 fraction (`<= 1.0`) of a range position's liquidity
    /// and pay out the freed amounts. The record is deleted once both its
    /// liquidity and owed fees hit zero.
    pub fn burn_range(
        env: Env,
        to: Address,
        position_id: u64,
        burn_percent: u128,
    ) -> (i128, i128) {
        let imm = read_immutables(&env);
        let mut global = lock(&env);
        let mut pool = read_range_pool(&env);
        advance_accumulators(&env, &mut pool);

        if burn_percent > ONE_X64 {
            panic!("{}", ErrorMsg::BURN_EXCEEDS_LIQUIDITY);
        }

        let mut pos = read_range_position(&env, position_id)
            .unwrap_or_else(|| panic!("{}", ErrorMsg::POSITION_NOT_FOUND));
        pos.owner.require_auth();

        let burned = u128_to_i128_saturating(mul_q64(pos.liquidity as u128, burn_percent));

        let (inside_0, inside_1) = Self::fee_growth_inside(&env, &pool, pos.lower, pos.upper);
        modify_range_position(&mut pos, -burned, inside_0, inside_1);

        if burned > 0 {
            Self::apply_range_delta(&env, &mut pool, pos.lower, pos.upper, -burned);
            global.liquidity_global = global.liquidity_global.saturating_sub(burned as u128);
        }

        let (amount0, amount1) = get_amounts_for_liquidity(
            &env,
            burned,
            sqrt_price_at_tick(pos.lower),
            sqrt_price_at_tick(pos.upper),
            pool.sqrt_price,
            false,
        );

        pos.updated_at = env.ledger().timestamp();
        if is_empty(&pos) {
            remove_range_position(&env, position_id);
        } else {
            write_range_position(&env, position_id, &pos);
        }
        write_range_pool(&env, &pool);

        let pool_addr = env.current_contract_address();
        if amount0 > 0 {
            token::Client::new(&env, &imm.token0).transfer(&pool_addr, &to, &amount0);
        }
        if amount1 > 0 {
            token::Client::new(&env, &imm.token1).transfer(&pool_addr, &to, &amount1);
        }

        emit_burn_range(&env, position_id, pos.lower, pos.upper, burned, amount0, amount1);
        unlock(&env, &mut global);

        (amount0, amount1)
    }

    /// Pay out a position's accrued fees, capped by the pool's balances.
    pub fn collect_range(env: Env, to: Address, position_id: u64) -> (u128, u128) {
        let imm = read_immutables(&env);
        let mut global = lock(&env);
        let pool = read_range_pool(&env);

        let mut pos = read_range_position(&env, position_id)
            .unwrap_or_else(|| panic!("{}", ErrorMsg::POSITION_NOT_FOUND));
        pos.owner.require_auth();

        let (inside_0, inside_1) = Self::fee_growth_inside(&env, &pool, pos.lower, pos.upper);
        settle_fees(&mut pos, inside_0, inside_1);

        let pool_addr = env.current_contract_address();
        let balance0 = token::Client::new(&env, &imm.token0).balance(&pool_addr) as u128;
        let balance1 = token::Client::new(&env, &imm.token1).balance(&pool_addr) as u128;

        let amount0 = pos.tokens_owed_0.min(balance0);
        let amount1 = pos.tokens_owed_1.min(balance1);

        clear_fees(&mut pos, amount0, amount1);
        pos.updated_at = env.ledger().timestamp();
        if is_empty(&pos) {
            remove_range_position(&env, position_id);
        } else {
            write_range_position(&env, position_id, &pos);
        }

        let transfer0 = u128_to_i128_saturating(amount0);
        let transfer1 = u128_to_i128_saturating(amount1);
        if transfer0 > 0 {
            token::Client::new(&env, &imm.token0).transfer(&pool_addr, &to, &transfer0);
        }
        if transfer1 > 0 {
            token::Client::new(&env, &imm.token1).transfer(&pool_addr, &to, &transfer1);
        }

        if amount0 > 0 {
            emit_collect_range0(&env, position_id, amount0);
        }
        if amount1 > 0 {
            emit_collect_range1(&env, position_id, amount1);
        }
        unlock(&env, &mut global);

        (amount0, amount1)
    }

    /// Convert a position's owed fees back into liquidity at the same
    /// bounds. No tokens move. Returns the liquidity added.
    pub fn compound_range(env: Env, position_id: u64) -> i128 {
        read_immutables(&env);
        let mut global = lock(&env);
        let mut pool = read_range_pool(&env);
        advance_accumulators(&env, &mut pool);

        let mut pos = read_range_position(&env, position_id)
            .unwrap_or_else(|| panic!("{}", ErrorMsg::POSITION_NOT_FOUND));
        pos.owner.require_auth();

        let (inside_0, inside_1) = Self::fee_growth_inside(&env, &pool, pos.lower, pos.upper);
        settle_fees(&mut pos, inside_0, inside_1);

        let sqrt_lower = sqrt_price_at_tick(pos.lower);
        let sqrt_upper = sqrt_price_at_tick(pos.upper);

        let liquidity = get_liquidity_for_amounts(
            &env,
            u128_to_i128_saturating(pos.tokens_owed_0),
            u128_to_i128_saturating(pos.tokens_owed_1),
            sqrt_lower,
            sqrt_upper,
            pool.sqrt_price,
        );

        if liquidity > 0 {
            let (use0, use1) = get_amounts_for_liquidity(
                &env,
                liquidity,
                sqrt_lower,
                sqrt_upper,
                pool.sqrt_price,
                true,
            );
            let use0 = (use0 as u128).min(pos.tokens_owed_0);
            let use1 = (use1 as u128).min(pos.tokens_owed_1);
            clear_fees(&mut pos, use0, use1);

            Self::apply_range_delta(&env, &mut pool, pos.lower, pos.upper, liquidity);
            global.liquidity_global = global.liquidity_global.saturating_add(liquidity as u128);

            pos.liquidity = pos.liquidity.saturating_add(liquidity);
            emit_compound_range(&env, position_id, liquidity, use0, use1);
        }

        pos.updated_at = env.ledger().timestamp();
        write_range_position(&env, position_id, &pos);
        write_range_pool(&env, &pool);
        unlock(&env, &mut global);

        liquidity
    }

    /// Current standing of a range position: amounts at the live price,
    /// total fees owed and the seconds-per-liquidity accumulated inside
    /// its bounds.
    pub fn snapshot_range(env: Env, position_id: u64) -> RangePositionSnapshot {
        let mut pool = read_range_pool(&env);
        advance_accumulators(&env, &mut pool);

        let pos = read_range_position(&env, position_id)
            .unwrap_or_else(|| panic!("{}", ErrorMsg::POSITION_NOT_FOUND));

        let (amount0, amount1) = get_amounts_for_liquidity(
            &env,
            pos.liquidity,
            sqrt_price_at_tick(pos.lower),
            sqrt_price_at_tick(pos.upper),
            pool.sqrt_price,
            false,
        );

        let (inside_0, inside_1) = Self::fee_growth_inside(&env, &pool, pos.lower, pos.upper);
        let (pending0, pending1) = pending_fees(&pos, inside_0, inside_1);

        let (spl_inside, _) = get_accumulators_inside(
            &env,
            |e, t| read_range_tick(e, t),
            pos.lower,
            pos.upper,
            pool.tick_at_price,
            pool.seconds_per_liquidity_global,
            pool.tick_seconds_global,
        );

        RangePositionSnapshot {
            liquidity: pos.liquidity,
            amount0,
            amount1,
            fees_owed_0: pos.tokens_owed_0.saturating_add(pending0),
            fees_owed_1: pos.tokens_owed_1.saturating_add(pending1),
            seconds_per_liquidity_inside: spl_inside,
        }
    }

    // ========================================================
    // LIMIT POSITIONS
    // ========================================================

    /// Place a one-sided order over `[lower, upper]`. `zero_for_one`
    /// orders deposit token0 strictly above the market and fill as the
    /// price rises; the mirror deposits token1 strictly below. Returns
    /// the position id and the liquidity minted.
    pub fn mint_limit(
        env: Env,
        to: Address,
        position_id: u64,
        lower: i32,
        upper: i32,
        zero_for_one: bool,
        amount: i128,
    ) -> (u64, i128) {
        to.require_auth();
        let imm = read_immutables(&env);
        let mut global = lock(&env);
        let pool = read_range_pool(&env);

        if let Err(msg) = validate_tick_range(lower, upper, imm.tick_spacing) {
            panic!("{}", msg);
        }
        if amount <= 0 {
            panic!("{}", ErrorMsg::LIQUIDITY_TOO_LOW);
        }

        let sqrt_lower = sqrt_price_at_tick(lower);
        let sqrt_upper = sqrt_price_at_tick(upper);

        // an idle ledger's frontier trails the market until orders rest in it
        let mut lpool = read_limit_pool(&env, zero_for_one);
        if lpool.liquidity == 0 {
            lpool.sqrt_price = pool.sqrt_price;
            lpool.tick_at_price = pool.tick_at_price;
        }

        // the whole range must rest on the maker side of both the market and
        // the ledger's fill frontier, else a claim at the start boundary
        // could report a fill that happened before the order existed
        let start_price = if zero_for_one { sqrt_lower } else { sqrt_upper };
        let behind = if zero_for_one {
            pool.sqrt_price > start_price || lpool.sqrt_price > start_price
        } else {
            pool.sqrt_price < start_price || lpool.sqrt_price < start_price
        };
        if behind {
            panic!("{}", ErrorMsg::PRICE_OUTSIDE_BOUNDS);
        }
        // a start boundary sitting exactly on the frontier is live at once
        let merged = lpool.sqrt_price == start_price;

        let liquidity = if zero_for_one {
            get_liquidity_for_amount0(&env, amount, sqrt_lower, sqrt_upper)
        } else {
            get_liquidity_for_amount1(&env, amount, sqrt_lower, sqrt_upper)
        };
        if liquidity < MIN_LIQUIDITY {
            panic!("{}", ErrorMsg::LIQUIDITY_TOO_LOW);
        }

        let amount_due = if zero_for_one {
            u128_to_i128_saturating(get_amount_0_delta(
                &env,
                sqrt_lower,
                sqrt_upper,
                liquidity as u128,
                true,
            ))
        } else {
            u128_to_i128_saturating(get_amount_1_delta(
                &env,
                sqrt_lower,
                sqrt_upper,
                liquidity as u128,
                true,
            ))
        };

        let now = env.ledger().timestamp();
        let id = match read_limit_position(&env, position_id) {
            Some(mut pos) => {
                if pos.owner != to {
                    panic!("{}", ErrorMsg::NOT_POSITION_OWNER);
                }
                if pos.lower != lower || pos.upper != upper || pos.zero_for_one != zero_for_one {
                    panic!("{}", ErrorMsg::POSITION_MISMATCH);
                }
                let epochs = LimitEpochs {
                    env: &env,
                    zero_for_one,
                };
                let stamped_start = epoch_at_tick(&epochs, pos.start_tick(), imm.tick_spacing);
                let stamped_far = epoch_at_tick(&epochs, pos.far_tick(), imm.tick_spacing);
                if stamped_start > pos.epoch_last || stamped_far > pos.epoch_last {
                    panic!("{}", ErrorMsg::CLAIM_BEFORE_MINT);
                }
                pos.liquidity = pos.liquidity.saturating_add(liquidity);
                pos.updated_at = now;
                write_limit_position(&env, position_id, &pos);
                position_id
            }
            None => {
                if position_id != 0 {
                    panic!("{}", ErrorMsg::POSITION_NOT_FOUND);
                }
                let id = global.position_id_next;
                global.position_id_next += 1;
                write_limit_position(
                    &env,
                    id,
                    &LimitPosition {
                        owner: to.clone(),
                        zero_for_one,
                        lower,
                        upper,
                        liquidity,
                        epoch_last: global.epoch,
                        created_at: now,
                        updated_at: now,
                    },
                );
                id
            }
        };

        if merged {
            // the start boundary is already at the frontier, so only the far
            // boundary carries a tick and the liquidity trades immediately
            let far = if zero_for_one { upper } else { lower };
            let flipped = update_limit_tick(
                &env,
                |e, t| read_limit_tick(e, zero_for_one, t),
                |e, t, info| write_limit_tick(e, zero_for_one, t, info),
                far,
                liquidity,
                sqrt_price_at_tick(far),
                zero_for_one,
            );
            if flipped {
                let mut bitmap = LimitBitmap {
                    env: &env,
                    zero_for_one,
                };
                set_tick(&mut bitmap, far, imm.tick_spacing);
            }
            lpool.liquidity = lpool.liquidity.saturating_add(liquidity);
        } else {
            Self::apply_limit_delta(&env, &imm, zero_for_one, lower, upper, liquidity);
        }
        write_limit_pool(&env, zero_for_one, &lpool);
        emit_sync_limit_pool(&env, zero_for_one, lpool.liquidity, lpool.sqrt_price, global.epoch);

        let deposit_token = if zero_for_one { &imm.token0 } else { &imm.token1 };
        token::Client::new(&env, deposit_token).transfer(
            &to,
            &env.current_contract_address(),
            &amount_due,
        );

        emit_mint_limit(&env, id, &to, zero_for_one, lower, upper, liquidity, amount_due);
        emit_sync_limit_liquidity(&env, zero_for_one, lower, upper, liquidity);
        unlock(&env, &mut global);

        (id, liquidity)
    }

    /// Burn a fraction of a limit order at `claim`, paying out the filled
    /// segment in the opposing token and the unfilled remainder in the
    /// deposit token. The claim must match the crossing history recorded
    /// in the ledger's epoch map; the kept remainder advances its start
    /// boundary to `claim`.
    pub fn burn_limit(
        env: Env,
        to: Address,
        position_id: u64,
        burn_percent: u128,
        claim: i32,
    ) -> LimitFill {
        let imm = read_immutables(&env);
        let mut global = lock(&env);

        if burn_percent > ONE_X64 {
            panic!("{}", ErrorMsg::BURN_EXCEEDS_LIQUIDITY);
        }

        let mut pos = read_limit_position(&env, position_id)
            .unwrap_or_else(|| panic!("{}", ErrorMsg::POSITION_NOT_FOUND));
        pos.owner.require_auth();

        let side = pos.zero_for_one;
        let (fill, fully_crossed) =
            Self::limit_fill(&env, &imm, &pos, claim, burn_percent);
        let mut lpool = read_limit_pool(&env, side);

        if fully_crossed {
            // both boundaries consumed; the whole order converted
            remove_limit_position(&env, position_id);
        } else if claim == pos.start_tick() {
            // no fill: reverse the burned share
            if fill.burned_liquidity > 0 {
                if lpool.sqrt_price == sqrt_price_at_tick(claim) {
                    // the order sits at the frontier with no start tick of
                    // its own; only the far boundary carries a delta
                    let far = pos.far_tick();
                    let flipped = update_limit_tick(
                        &env,
                        |e, t| read_limit_tick(e, side, t),
                        |e, t, info| write_limit_tick(e, side, t, info),
                        far,
                        -fill.burned_liquidity,
                        sqrt_price_at_tick(far),
                        side,
                    );
                    if flipped {
                        let mut bitmap = LimitBitmap {
                            env: &env,
                            zero_for_one: side,
                        };
                        unset_tick(&mut bitmap, far, imm.tick_spacing);
                    }
                    lpool.liquidity = lpool.liquidity.saturating_sub(fill.burned_liquidity);
                    write_limit_pool(&env, side, &lpool);
                } else {
                    Self::apply_limit_delta(
                        &env,
                        &imm,
                        side,
                        pos.lower,
                        pos.upper,
                        -fill.burned_liquidity,
                    );
                }
            }
            pos.liquidity = fill.remaining_liquidity;
            pos.updated_at = env.ledger().timestamp();
            if pos.liquidity == 0 {
                remove_limit_position(&env, position_id);
            } else {
                write_limit_position(&env, position_id, &pos);
            }
        } else {
            // partial fill: the start boundary advances to the claim tick;
            // the kept remainder is already active at the frontier, so no
            // new start tick is written for it
            let spacing = imm.tick_spacing;
            let far = pos.far_tick();

            if fill.burned_liquidity > 0 {
                let flipped = update_limit_tick(
                    &env,
                    |e, t| read_limit_tick(e, side, t),
                    |e, t, info| write_limit_tick(e, side, t, info),
                    far,
                    -fill.burned_liquidity,
                    sqrt_price_at_tick(far),
                    side,
                );
                if flipped {
                    let mut bitmap = LimitBitmap {
                        env: &env,
                        zero_for_one: side,
                    };
                    unset_tick(&mut bitmap, far, spacing);
                }
                // the burned share was active between the boundaries
                lpool.liquidity = lpool.liquidity.saturating_sub(fill.burned_liquidity);
                write_limit_pool(&env, side, &lpool);
            }

            if side {
                pos.lower = claim;
            } else {
                pos.upper = claim;
            }
            pos.liquidity = fill.remaining_liquidity;
            pos.epoch_last = global.epoch;
            pos.updated_at = env.ledger().timestamp();
            if pos.liquidity == 0 {
                remove_limit_position(&env, position_id);
            } else {
                write_limit_position(&env, position_id, &pos);
            }
        }

        let pool_addr = env.current_contract_address();
        let (deposit_token, opposing_token) = if side {
            (&imm.token0, &imm.token1)
        } else {
            (&imm.token1, &imm.token0)
        };
        if fill.filled > 0 {
            token::Client::new(&env, opposing_token).transfer(&pool_addr, &to, &fill.filled);
        }
        if fill.unfilled > 0 {
            token::Client::new(&env, deposit_token).transfer(&pool_addr, &to, &fill.unfilled);
        }

        emit_burn_limit(
            &env,
            position_id,
            claim,
            fill.filled,
            fill.unfilled,
            fill.burned_liquidity,
        );
        emit_sync_limit_liquidity(&env, side, pos.lower, pos.upper, -fill.burned_liquidity);
        emit_sync_limit_pool(&env, side, lpool.liquidity, lpool.sqrt_price, global.epoch);
        unlock(&env, &mut global);

        fill
    }

    /// Read-only simulation of `burn_limit`.
    pub fn snapshot_limit(env: Env, position_id: u64, burn_percent: u128, claim: i32) -> LimitFill {
        let imm = read_immutables(&env);

        if burn_percent > ONE_X64 {
            panic!("{}", ErrorMsg::BURN_EXCEEDS_LIQUIDITY);
        }

        let pos = read_limit_position(&env, position_id)
            .unwrap_or_else(|| panic!("{}", ErrorMsg::POSITION_NOT_FOUND));

        let (fill, _) = Self::limit_fill(&env, &imm, &pos, claim, burn_percent);
        fill
    }

    // ========================================================
    // SWAPS
    // ========================================================

    /// Execute a swap for `to`. `amount` is input when `exact_in`, desired
    /// output otherwise; the unconsumed remainder is simply not charged.
    /// `price_limit = 0` defaults to the pool's configured bound in the
    /// trade direction.
    pub fn swap(
        env: Env,
        to: Address,
        price_limit: u128,
        amount: i128,
        exact_in: bool,
        zero_for_one: bool,
    ) -> SwapResult {
        to.require_auth();
        let imm = read_immutables(&env);
        let mut global = lock(&env);
        let mut pool = read_range_pool(&env);
        advance_accumulators(&env, &mut pool);

        let sqrt_limit = Self::check_price_limit(&imm, &pool, price_limit, zero_for_one);

        // pre-swap sample so lookbacks never interpolate across this swap
        let now = env.ledger().timestamp();
        let (samples, written) = record_sample(
            &env,
            |e, i| read_sample(e, i),
            |e, i, s| write_sample(e, i, s),
            &pool.samples,
            now,
            pool.tick_at_price,
            pool.liquidity as u128,
        );
        if written {
            emit_sample_recorded(&env, samples.index, now);
        }
        pool.samples = samples;

        let order_side = !zero_for_one;
        let mut lpool = read_limit_pool(&env, order_side);

        let mut state = SwapState {
            sqrt_price: pool.sqrt_price,
            current_tick: pool.tick_at_price,
            range_liquidity: pool.liquidity,
            limit_liquidity: lpool.liquidity,
            limit_sqrt_price: lpool.sqrt_price,
            tick_spacing: imm.tick_spacing,
            fee_growth_global_0: pool.fee_growth_global_0,
            fee_growth_global_1: pool.fee_growth_global_1,
            seconds_per_liquidity_global: pool.seconds_per_liquidity_global,
            tick_seconds_global: pool.tick_seconds_global,
            epoch: global.epoch,
            protocol_fee_accrued: 0,
        };

        let host = PoolHost {
            tick_spacing: imm.tick_spacing,
            order_side,
        };
        let (amount_in, amount_out) = engine_swap(
            &env,
            &host,
            &mut state,
            amount,
            exact_in,
            zero_for_one,
            sqrt_limit,
            imm.swap_fee_bps,
            global.protocol_fee_bps,
            false,
        );

        pool.sqrt_price = state.sqrt_price;
        pool.tick_at_price = state.current_tick;
        pool.liquidity = state.range_liquidity;
        pool.fee_growth_global_0 = state.fee_growth_global_0;
        pool.fee_growth_global_1 = state.fee_growth_global_1;
        write_range_pool(&env, &pool);

        lpool.liquidity = state.limit_liquidity;
        lpool.sqrt_price = state.limit_sqrt_price;
        lpool.tick_at_price = tick_at_sqrt_price(state.limit_sqrt_price);
        lpool.protocol_fees = lpool.protocol_fees.saturating_add(state.protocol_fee_accrued);
        write_limit_pool(&env, order_side, &lpool);

        global.epoch = state.epoch;

        let pool_addr = env.current_contract_address();
        let (token_in, token_out) = if zero_for_one {
            (&imm.token0, &imm.token1)
        } else {
            (&imm.token1, &imm.token0)
        };
        if amount_in > 0 {
            token::Client::new(&env, token_in).transfer(&to, &pool_addr, &amount_in);
        }
        if amount_out > 0 {
            token::Client::new(&env, token_out).transfer(&pool_addr, &to, &amount_out);
        }

        emit_swap(
            &env,
            &to,
            zero_for_one,
            amount_in,
            amount_out,
            pool.sqrt_price,
            pool.tick_at_price,
            global.epoch,
        );
        emit_sync_limit_pool(&env, order_side, lpool.liquidity, lpool.sqrt_price, global.epoch);
        unlock(&env, &mut global);

        SwapResult {
            amount_in,
            amount_out,
            sqrt_price: pool.sqrt_price,
            tick_at_price: pool.tick_at_price,
        }
    }

    /// Simulate a swap without touching storage.
    pub fn quote(
        env: Env,
        price_limit: u128,
        amount: i128,
        exact_in: bool,
        zero_for_one: bool,
    ) -> QuoteResult {
        let imm = read_immutables(&env);
        let global = read_global(&env);
        let pool = read_range_pool(&env);

        let sqrt_limit = Self::check_price_limit(&imm, &pool, price_limit, zero_for_one);

        let order_side = !zero_for_one;
        let lpool = read_limit_pool(&env, order_side);

        let mut state = SwapState {
            sqrt_price: pool.sqrt_price,
            current_tick: pool.tick_at_price,
            range_liquidity: pool.liquidity,
            limit_liquidity: lpool.liquidity,
            limit_sqrt_price: lpool.sqrt_price,
            tick_spacing: imm.tick_spacing,
            fee_growth_global_0: pool.fee_growth_global_0,
            fee_growth_global_1: pool.fee_growth_global_1,
            seconds_per_liquidity_global: pool.seconds_per_liquidity_global,
            tick_seconds_global: pool.tick_seconds_global,
            epoch: global.epoch,
            protocol_fee_accrued: 0,
        };

        let host = PoolHost {
            tick_spacing: imm.tick_spacing,
            order_side,
        };
        let (amount_in, amount_out) = engine_swap(
            &env,
            &host,
            &mut state,
            amount,
            exact_in,
            zero_for_one,
            sqrt_limit,
            imm.swap_fee_bps,
            global.protocol_fee_bps,
            true,
        );

        QuoteResult {
            amount_in,
            amount_out,
            price_after: state.sqrt_price,
        }
    }

    // ========================================================
    // ORACLE
    // ========================================================

    /// Raise the sample ring capacity. Owner only, monotonic.
    pub fn increase_sample_count(env: Env, new_count_max: u32) {
        let imm = read_immutables(&env);
        imm.owner.require_auth();

        let mut pool = read_range_pool(&env);
        pool.samples = coralswap_oracle::grow(&pool.samples, new_count_max);
        write_range_pool(&env, &pool);

        emit_sample_count_increased(&env, new_count_max);
    }

    /// Cumulative tick-seconds and seconds-per-liquidity at each lookback.
    pub fn sample(env: Env, seconds_agos: Vec<u64>) -> (Vec<i64>, Vec<u128>) {
        let pool = read_range_pool(&env);
        coralswap_oracle::sample(
            &env,
            |e, i| read_sample(e, i),
            &pool.samples,
            env.ledger().timestamp(),
            pool.tick_at_price,
            pool.liquidity as u128,
            &seconds_agos,
        )
    }

    /// Time-weighted average tick over `[now - from_ago, now - to_ago]`.
    pub fn average_tick(env: Env, from_ago: u64, to_ago: u64) -> i32 {
        let pool = read_range_pool(&env);
        coralswap_oracle::average_tick(
            &env,
            |e, i| read_sample(e, i),
            &pool.samples,
            env.ledger().timestamp(),
            pool.tick_at_price,
            pool.liquidity as u128,
            from_ago,
            to_ago,
        )
    }

    // ========================================================
    // PROTOCOL FEES
    // ========================================================

    /// Pay out accrued protocol fees. Owner only. Returns the token0 and
    /// token1 amounts transferred.
    pub fn collect_protocol_fees(env: Env, to: Address) -> (i128, i128) {
        let imm = read_immutables(&env);
        imm.owner.require_auth();
        let mut global = lock(&env);

        // pool1 accrues in token0 (zero-for-one input), pool0 in token1
        let mut pool1 = read_limit_pool(&env, false);
        let mut pool0 = read_limit_pool(&env, true);

        let amount0 = u128_to_i128_saturating(pool1.protocol_fees);
        let amount1 = u128_to_i128_saturating(pool0.protocol_fees);

        pool1.protocol_fees = 0;
        pool0.protocol_fees = 0;
        write_limit_pool(&env, false, &pool1);
        write_limit_pool(&env, true, &pool0);

        let pool_addr = env.current_contract_address();
        if amount0 > 0 {
            token::Client::new(&env, &imm.token0).transfer(&pool_addr, &to, &amount0);
        }
        if amount1 > 0 {
            token::Client::new(&env, &imm.token1).transfer(&pool_addr, &to, &amount1);
        }

        emit_sync_limit_pool(&env, false, pool1.liquidity, pool1.sqrt_price, global.epoch);
        emit_sync_limit_pool(&env, true, pool0.liquidity, pool0.sqrt_price, global.epoch);
        unlock(&env, &mut global);

        (amount0, amount1)
    }

    // ========================================================
    // VIEWS
    // ========================================================

    pub fn get_immutables(env: Env) -> Immutables {
        read_immutables(&env)
    }

    pub fn get_global_state(env: Env) -> GlobalState {
        read_global(&env)
    }

    pub fn get_range_pool(env: Env) -> RangePoolState {
        read_range_pool(&env)
    }

    pub fn get_limit_pool(env: Env, zero_for_one: bool) -> LimitPoolState {
        read_limit_pool(&env, zero_for_one)
    }

    pub fn get_range_tick(env: Env, tick: i32) -> RangeTick {
        read_range_tick(&env, tick)
    }

    pub fn get_limit_tick(env: Env, zero_for_one: bool, tick: i32) -> LimitTick {
        read_limit_tick(&env, zero_for_one, tick)
    }

    pub fn get_range_position(env: Env, position_id: u64) -> RangePosition {
        read_range_position(&env, position_id)
            .unwrap_or_else(|| panic!("{}", ErrorMsg::POSITION_NOT_FOUND))
    }

    pub fn get_limit_position(env: Env, position_id: u64) -> LimitPosition {
        read_limit_position(&env, position_id)
            .unwrap_or_else(|| panic!("{}", ErrorMsg::POSITION_NOT_FOUND))
    }

    // ========================================================
    // INTERNAL HELPERS
    // ========================================================

    /// Update both boundary ticks of a range position and the active
    /// liquidity when the market sits inside the bounds.
    fn apply_range_delta(
        env: &Env,
        pool: &mut RangePoolState,
        lower: i32,
        upper: i32,
        liquidity_delta: i128,
    ) {
        let spacing = read_immutables(env).tick_spacing;

        let flipped_lower = update_range_tick(
            env,
            |e, t| read_range_tick(e, t),
            |e, t, info| write_range_tick(e, t, info),
            lower,
            pool.tick_at_price,
            liquidity_delta,
            pool.fee_growth_global_0,
            pool.fee_growth_global_1,
            pool.seconds_per_liquidity_global,
            pool.tick_seconds_global,
            false,
        );
        let flipped_upper = update_range_tick(
            env,
            |e, t| read_range_tick(e, t),
            |e, t, info| write_range_tick(e, t, info),
            upper,
            pool.tick_at_price,
            liquidity_delta,
            pool.fee_growth_global_0,
            pool.fee_growth_global_1,
            pool.seconds_per_liquidity_global,
            pool.tick_seconds_global,
            true,
        );

        let mut bitmap = RangeBitmap { env };
        if flipped_lower {
            if liquidity_delta > 0 {
                set_tick(&mut bitmap, lower, spacing);
            } else {
                unset_tick(&mut bitmap, lower, spacing);
            }
        }
        if flipped_upper {
            if liquidity_delta > 0 {
                set_tick(&mut bitmap, upper, spacing);
            } else {
                unset_tick(&mut bitmap, upper, spacing);
            }
        }

        if pool.tick_at_price >= lower && pool.tick_at_price < upper {
            pool.liquidity = pool.liquidity.saturating_add(liquidity_delta);
            if pool.liquidity < 0 {
                panic!("liquidity underflow");
            }
        }
    }

    /// Update both boundary ticks of a limit order.
    fn apply_limit_delta(
        env: &Env,
        imm: &Immutables,
        side: bool,
        lower: i32,
        upper: i32,
        liquidity_delta: i128,
    ) {
        let flipped_lower = update_limit_tick(
            env,
            |e, t| read_limit_tick(e, side, t),
            |e, t, info| write_limit_tick(e, side, t, info),
            lower,
            liquidity_delta,
            sqrt_price_at_tick(lower),
            false,
        );
        let flipped_upper = update_limit_tick(
            env,
            |e, t| read_limit_tick(e, side, t),
            |e, t, info| write_limit_tick(e, side, t, info),
            upper,
            liquidity_delta,
            sqrt_price_at_tick(upper),
            true,
        );

        let mut bitmap = LimitBitmap {
            env,
            zero_for_one: side,
        };
        if flipped_lower {
            if liquidity_delta > 0 {
                set_tick(&mut bitmap, lower, imm.tick_spacing);
            } else {
                unset_tick(&mut bitmap, lower, imm.tick_spacing);
            }
        }
        if flipped_upper {
            if liquidity_delta > 0 {
                set_tick(&mut bitmap, upper, imm.tick_spacing);
            } else {
                unset_tick(&mut bitmap, upper, imm.tick_spacing);
            }
        }
    }

    /// Validate a claim against the epoch map and compute the fill.
    /// Returns the fill and whether the order's far boundary was crossed.
    fn limit_fill(
        env: &Env,
        imm: &Immutables,
        pos: &LimitPosition,
        claim: i32,
        burn_percent: u128,
    ) -> (LimitFill, bool) {
        let side = pos.zero_for_one;
        let epochs = LimitEpochs {
            env,
            zero_for_one: side,
        };

        let stamped = epoch_at_tick(&epochs, claim, imm.tick_spacing);
        if let Err(msg) = validate_limit_claim(pos, claim, imm.tick_spacing, stamped) {
            panic!("{}", msg);
        }

        let fully_crossed =
            epoch_at_tick(&epochs, pos.far_tick(), imm.tick_spacing) > pos.epoch_last;
        let lpool = read_limit_pool(env, side);

        let fill = if fully_crossed {
            // everything converted; percent no longer matters
            limit_fill_amounts(env, pos, pos.far_tick(), ONE_X64, lpool.sqrt_price, true)
        } else {
            if claim == pos.start_tick() {
                // a claim at the start asserts no fill, which the frontier
                // must corroborate
                let start_price = sqrt_price_at_tick(claim);
                let swept = if side {
                    lpool.sqrt_price > start_price
                } else {
                    lpool.sqrt_price < start_price
                };
                if swept {
                    panic!("start boundary was crossed");
                }
            }
            limit_fill_amounts(env, pos, claim, burn_percent, lpool.sqrt_price, false)
        };

        (fill, fully_crossed)
    }

    fn fee_growth_inside(env: &Env, pool: &RangePoolState, lower: i32, upper: i32) -> (u128, u128) {
        get_fee_growth_inside(
            env,
            |e, t| read_range_tick(e, t),
            lower,
            upper,
            pool.tick_at_price,
            pool.fee_growth_global_0,
            pool.fee_growth_global_1,
        )
    }

    /// Resolve and validate the caller's price limit.
    fn check_price_limit(
        imm: &Immutables,
        pool: &RangePoolState,
        price_limit: u128,
        zero_for_one: bool,
    ) -> u128 {
        let sqrt_limit = if price_limit == 0 {
            if zero_for_one {
                imm.min_sqrt_price
            } else {
                imm.max_sqrt_price
            }
        } else {
            price_limit
        };

        if sqrt_limit < imm.min_sqrt_price || sqrt_limit > imm.max_sqrt_price {
            panic!("{}", ErrorMsg::PRICE_OUT_OF_BOUNDS);
        }
        if zero_for_one {
            if sqrt_limit >= pool.sqrt_price {
                panic!("{}", ErrorMsg::INVALID_PRICE_LIMIT);
            }
        } else if sqrt_limit <= pool.sqrt_price {
            panic!("{}", ErrorMsg::INVALID_PRICE_LIMIT);
        }

        sqrt_limit
    }
}

// ========================================================
// FREE HELPERS
// ========================================================

/// Advance the time accumulators to the current ledger timestamp.
fn advance_accumulators(env: &Env, pool: &mut RangePoolState) {
    let now = env.ledger().timestamp();
    let elapsed = now.saturating_sub(pool.last_timestamp);
    if elapsed == 0 {
        return;
    }
    let divisor = if pool.liquidity > 0 {
        pool.liquidity as u128
    } else {
        1
    };
    pool.seconds_per_liquidity_global = pool
        .seconds_per_liquidity_global
        .wrapping_add(((elapsed as u128) << 64) / divisor);
    pool.tick_seconds_global = pool
        .tick_seconds_global
        .wrapping_add((pool.tick_at_price as i64).saturating_mul(elapsed as i64));
    pool.last_timestamp = now;
}

/// Take the reentrancy lock.
fn lock(env: &Env) -> GlobalState {
    let mut global = read_global(env);
    if !global.unlocked {
        panic!("{}", ErrorMsg::REENTRANCY);
    }
    global.unlocked = false;
    write_global(env, &global);
    global
}

/// Release the reentrancy lock, persisting any bookkeeping changes.
fn unlock(env: &Env, global: &mut GlobalState) {
    global.unlocked = true;
    write_global(env, global);
}
