use std::cell::RefCell;
use std::collections::HashMap;

use coralswap_tick::*;
use soroban_sdk::Env;

fn range_store() -> RefCell<HashMap<i32, RangeTick>> {
    RefCell::new(HashMap::new())
}

fn limit_store() -> RefCell<HashMap<i32, LimitTick>> {
    RefCell::new(HashMap::new())
}

#[test]
fn test_update_range_tick_tracks_absolute_and_net() {
    let env = Env::default();
    let ticks = range_store();
    let read = |_: &Env, t: i32| ticks.borrow().get(&t).cloned().unwrap_or_default();
    let write = |_: &Env, t: i32, info: &RangeTick| {
        ticks.borrow_mut().insert(t, info.clone());
    };

    // add at the lower boundary
    let flipped = update_range_tick(&env, read, write, 100, 0, 500, 0, 0, 0, 0, false);
    assert!(flipped);
    let info = ticks.borrow().get(&100).cloned().unwrap();
    assert_eq!(info.liquidity_absolute, 500);
    assert_eq!(info.liquidity_delta, 500);

    // add the same liquidity as the upper boundary of another position
    let flipped = update_range_tick(&env, read, write, 100, 0, 300, 0, 0, 0, 0, true);
    assert!(!flipped);
    let info = ticks.borrow().get(&100).cloned().unwrap();
    assert_eq!(info.liquidity_absolute, 800);
    assert_eq!(info.liquidity_delta, 200);
}

#[test]
fn test_update_range_tick_flips_on_removal() {
    let env = Env::default();
    let ticks = range_store();
    let read = |_: &Env, t: i32| ticks.borrow().get(&t).cloned().unwrap_or_default();
    let write = |_: &Env, t: i32, info: &RangeTick| {
        ticks.borrow_mut().insert(t, info.clone());
    };

    update_range_tick(&env, read, write, -60, 0, 1000, 0, 0, 0, 0, false);
    let flipped = update_range_tick(&env, read, write, -60, 0, -1000, 0, 0, 0, 0, false);
    assert!(flipped);
    let info = ticks.borrow().get(&-60).cloned().unwrap();
    assert_eq!(info.liquidity_absolute, 0);
    assert_eq!(info.liquidity_delta, 0);
}

#[test]
fn test_range_tick_outside_seeded_from_globals_below_current() {
    let env = Env::default();
    let ticks = range_store();
    let read = |_: &Env, t: i32| ticks.borrow().get(&t).cloned().unwrap_or_default();
    let write = |_: &Env, t: i32, info: &RangeTick| {
        ticks.borrow_mut().insert(t, info.clone());
    };

    // tick below the current tick inherits the global accumulators
    update_range_tick(&env, read, write, -10, 50, 100, 777, 888, 999, 123, false);
    let below = ticks.borrow().get(&-10).cloned().unwrap();
    assert_eq!(below.fee_growth_outside_0, 777);
    assert_eq!(below.fee_growth_outside_1, 888);
    assert_eq!(below.seconds_per_liquidity_outside, 999);
    assert_eq!(below.tick_seconds_outside, 123);

    // tick above starts clean
    update_range_tick(&env, read, write, 90, 50, 100, 777, 888, 999, 123, true);
    let above = ticks.borrow().get(&90).cloned().unwrap();
    assert_eq!(above.fee_growth_outside_0, 0);
    assert_eq!(above.tick_seconds_outside, 0);
}

#[test]
#[should_panic(expected = "liquidity per tick overflow")]
fn test_update_range_tick_rejects_overflow() {
    let env = Env::default();
    let ticks = range_store();
    let read = |_: &Env, t: i32| ticks.borrow().get(&t).cloned().unwrap_or_default();
    let write = |_: &Env, t: i32, info: &RangeTick| {
        ticks.borrow_mut().insert(t, info.clone());
    };

    update_range_tick(&env, read, write, 0, 0, i128::MAX / 2, 0, 0, 0, 0, false);
    update_range_tick(&env, read, write, 0, 0, i128::MAX / 2, 0, 0, 0, 0, false);
}

#[test]
fn test_cross_range_tick_flips_outside() {
    let env = Env::default();
    let ticks = range_store();
    let read = |_: &Env, t: i32| ticks.borrow().get(&t).cloned().unwrap_or_default();
    let write = |_: &Env, t: i32, info: &RangeTick| {
        ticks.borrow_mut().insert(t, info.clone());
    };

    update_range_tick(&env, read, write, 0, 10, 400, 1000, 2000, 50, 5, false);
    let net = cross_range_tick(&env, read, write, 0, 1500, 2600, 80, 9);
    assert_eq!(net, 400);

    let info = ticks.borrow().get(&0).cloned().unwrap();
    assert_eq!(info.fee_growth_outside_0, 500);
    assert_eq!(info.fee_growth_outside_1, 600);
    assert_eq!(info.seconds_per_liquidity_outside, 30);
    assert_eq!(info.tick_seconds_outside, 4);

    // crossing back restores the original orientation
    cross_range_tick(&env, read, write, 0, 1500, 2600, 80, 9);
    let info = ticks.borrow().get(&0).cloned().unwrap();
    assert_eq!(info.fee_growth_outside_0, 1000);
    assert_eq!(info.fee_growth_outside_1, 2000);
}

#[test]
fn test_limit_tick_lifecycle() {
    let env = Env::default();
    let ticks = limit_store();
    let read = |_: &Env, t: i32| ticks.borrow().get(&t).cloned().unwrap_or_default();
    let write = |_: &Env, t: i32, info: &LimitTick| {
        ticks.borrow_mut().insert(t, info.clone());
    };

    let flipped = update_limit_tick(&env, read, write, 200, 900, 42_000, false);
    assert!(flipped);
    let info = ticks.borrow().get(&200).cloned().unwrap();
    assert!(info.active);
    assert_eq!(info.price_at, 42_000);
    assert_eq!(info.liquidity_delta, 900);

    // crossing consumes the tick entirely
    let net = cross_limit_tick(&env, read, write, 200);
    assert_eq!(net, 900);
    let info = ticks.borrow().get(&200).cloned().unwrap();
    assert!(!info.active);
    assert_eq!(info.liquidity_absolute, 0);
    assert_eq!(info.liquidity_delta, 0);
}

#[test]
fn test_limit_tick_exit_boundary_negates() {
    let env = Env::default();
    let ticks = limit_store();
    let read = |_: &Env, t: i32| ticks.borrow().get(&t).cloned().unwrap_or_default();
    let write = |_: &Env, t: i32, info: &LimitTick| {
        ticks.borrow_mut().insert(t, info.clone());
    };

    update_limit_tick(&env, read, write, 300, 900, 43_000, true);
    let info = ticks.borrow().get(&300).cloned().unwrap();
    assert_eq!(info.liquidity_delta, -900);
    assert_eq!(info.liquidity_absolute, 900);

    // removing deactivates
    let flipped = update_limit_tick(&env, read, write, 300, -900, 43_000, true);
    assert!(flipped);
    assert!(!ticks.borrow().get(&300).cloned().unwrap().active);
}

#[test]
fn test_fee_growth_inside_current_in_range() {
    let env = Env::default();
    let ticks = range_store();
    let read = |_: &Env, t: i32| ticks.borrow().get(&t).cloned().unwrap_or_default();
    let write = |_: &Env, t: i32, info: &RangeTick| {
        ticks.borrow_mut().insert(t, info.clone());
    };

    // lower initialized below current (outside = globals at creation),
    // upper initialized above current (outside = 0)
    update_range_tick(&env, read, write, -100, 0, 10, 300, 700, 0, 0, false);
    update_range_tick(&env, read, write, 100, 0, 10, 300, 700, 0, 0, true);

    // growth since creation: 300 -> 900 and 700 -> 1500, all inside
    let (inside_0, inside_1) = get_fee_growth_inside(&env, read, -100, 100, 0, 900, 1500);
    assert_eq!(inside_0, 600);
    assert_eq!(inside_1, 800);
}

#[test]
fn test_fee_growth_inside_current_outside_range() {
    let env = Env::default();
    let ticks = range_store();
    let read = |_: &Env, t: i32| ticks.borrow().get(&t).cloned().unwrap_or_default();
    let write = |_: &Env, t: i32, info: &RangeTick| {
        ticks.borrow_mut().insert(t, info.clone());
    };

    update_range_tick(&env, read, write, 100, 0, 10, 500, 0, 0, 0, false);
    update_range_tick(&env, read, write, 200, 0, 10, 500, 0, 0, 0, true);

    // current below the range, nothing ever accrued inside
    let (inside_0, _) = get_fee_growth_inside(&env, read, 100, 200, 0, 500, 0);
    assert_eq!(inside_0, 0);
}

#[test]
fn test_accumulators_inside_in_range() {
    let env = Env::default();
    let ticks = range_store();
    let read = |_: &Env, t: i32| ticks.borrow().get(&t).cloned().unwrap_or_default();
    let write = |_: &Env, t: i32, info: &RangeTick| {
        ticks.borrow_mut().insert(t, info.clone());
    };

    update_range_tick(&env, read, write, -50, 0, 10, 0, 0, 40, 8, false);
    update_range_tick(&env, read, write, 50, 0, 10, 0, 0, 40, 8, true);

    let (spl_inside, ts_inside) = get_accumulators_inside(&env, read, -50, 50, 0, 100, 20);
    assert_eq!(spl_inside, 60);
    assert_eq!(ts_inside, 12);
}
