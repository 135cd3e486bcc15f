// CoralSwap Sample Oracle Package
//
// Cumulative tick-seconds and seconds-per-liquidity samples kept in a ring
// buffer. The contract owns the storage; this package works through injected
// read/write closures, one slot per sample.

#![no_std]

use coralswap_math::div_q64;
use soroban_sdk::{contracttype, Env, Vec};

/// One recorded sample. A zero timestamp marks a slot that was never
/// written (the genesis sample is stored with the pool's start time).
#[contracttype]
#[derive(Clone, Debug)]
pub struct Sample {
    pub block_timestamp: u64,
    /// Cumulative tick * seconds
    pub tick_seconds: i64,
    /// Cumulative seconds / liquidity, Q64.64
    pub seconds_per_liquidity: u128,
}

impl Default for Sample {
    fn default() -> Self {
        Self {
            block_timestamp: 0,
            tick_seconds: 0,
            seconds_per_liquidity: 0,
        }
    }
}

/// Ring buffer bookkeeping, carried in pool state.
#[contracttype]
#[derive(Clone, Debug)]
pub struct SampleState {
    /// Slot of the newest sample
    pub index: u32,
    /// Number of populated slots
    pub count: u32,
    /// Ring capacity
    pub count_max: u32,
}

fn advance(sample: &Sample, to_timestamp: u64, tick: i32, liquidity: u128) -> Sample {
    let elapsed = to_timestamp.saturating_sub(sample.block_timestamp);
    let divisor = if liquidity > 0 { liquidity } else { 1 };
    Sample {
        block_timestamp: to_timestamp,
        tick_seconds: sample
            .tick_seconds
            .saturating_add((tick as i64).saturating_mul(elapsed as i64)),
        seconds_per_liquidity: sample
            .seconds_per_liquidity
            .wrapping_add(div_q64(elapsed as u128, divisor)),
    }
}

/// Write the genesis sample and return the initial bookkeeping.
pub fn initialize_samples(
    env: &Env,
    write_sample: impl Fn(&Env, u32, &Sample),
    timestamp: u64,
) -> SampleState {
    write_sample(
        env,
        0,
        &Sample {
            block_timestamp: timestamp,
            tick_seconds: 0,
            seconds_per_liquidity: 0,
        },
    );
    SampleState {
        index: 0,
        count: 1,
        count_max: 1,
    }
}

/// Record a sample for the current instant.
///
/// Idempotent per timestamp: a second call in the same instant leaves the
/// buffer untouched. Returns the updated bookkeeping and whether a new slot
/// was written.
pub fn record(
    env: &Env,
    read_sample: impl Fn(&Env, u32) -> Sample,
    write_sample: impl Fn(&Env, u32, &Sample),
    state: &SampleState,
    timestamp: u64,
    tick: i32,
    liquidity: u128,
) -> (SampleState, bool) {
    let newest = read_sample(env, state.index);
    if newest.block_timestamp == timestamp {
        return (state.clone(), false);
    }

    let next_index = (state.index + 1) % state.count_max;
    write_sample(env, next_index, &advance(&newest, timestamp, tick, liquidity));

    (
        SampleState {
            index: next_index,
            count: state.count.saturating_add(1).min(state.count_max),
            count_max: state.count_max,
        },
        true,
    )
}

/// Raise the ring capacity. Capacity only grows; retained samples are
/// untouched and new slots fill in as swaps come through.
pub fn grow(state: &SampleState, new_count_max: u32) -> SampleState {
    if new_count_max <= state.count_max {
        panic!("sample count not grown");
    }
    SampleState {
        index: state.index,
        count: state.count,
        count_max: new_count_max,
    }
}

fn oldest_sample(
    env: &Env,
    read_sample: &impl Fn(&Env, u32) -> Sample,
    state: &SampleState,
) -> Sample {
    // The slot after the newest is the oldest once the ring has wrapped.
    let next = (state.index + 1) % state.count_max;
    let sample = read_sample(env, next);
    if sample.block_timestamp != 0 {
        sample
    } else {
        read_sample(env, 0)
    }
}

/// Surrounding samples for a target timestamp, oldest-first ring order.
fn surrounding(
    env: &Env,
    read_sample: &impl Fn(&Env, u32) -> Sample,
    state: &SampleState,
    target: u64,
) -> (Sample, Sample) {
    let mut lo = (state.index + 1) as u64;
    let mut hi = (state.index as u64) + state.count_max as u64;

    loop {
        let mid = (lo + hi) / 2;
        let before = read_sample(env, (mid % state.count_max as u64) as u32);

        // skip slots that were never populated
        if before.block_timestamp == 0 {
            lo = mid + 1;
            continue;
        }

        let after = read_sample(env, ((mid + 1) % state.count_max as u64) as u32);

        if before.block_timestamp <= target
            && (after.block_timestamp == 0 || target < after.block_timestamp)
        {
            return (before, after);
        }

        if before.block_timestamp > target {
            hi = mid - 1;
        } else {
            lo = mid + 1;
        }
    }
}

/// Cumulative accumulators as of `target`, interpolating between retained
/// samples and extrapolating past the newest one.
fn cumulatives_at(
    env: &Env,
    read_sample: &impl Fn(&Env, u32) -> Sample,
    state: &SampleState,
    target: u64,
    tick_now: i32,
    liquidity_now: u128,
) -> (i64, u128) {
    let newest = read_sample(env, state.index);
    if target >= newest.block_timestamp {
        let advanced = advance(&newest, target, tick_now, liquidity_now);
        return (advanced.tick_seconds, advanced.seconds_per_liquidity);
    }

    let oldest = oldest_sample(env, read_sample, state);
    if target < oldest.block_timestamp {
        panic!("sample lookback too old");
    }

    let (before, after) = surrounding(env, read_sample, state, target);

    if before.block_timestamp == target {
        return (before.tick_seconds, before.seconds_per_liquidity);
    }

    // linear interpolation between the two surrounding samples
    let span = after.block_timestamp - before.block_timestamp;
    let gap = target - before.block_timestamp;

    let ts_delta = (after.tick_seconds - before.tick_seconds) as i128;
    let tick_seconds =
        before.tick_seconds + (ts_delta * gap as i128 / span as i128) as i64;

    // staged so delta * gap cannot overflow
    let spl_delta = after
        .seconds_per_liquidity
        .wrapping_sub(before.seconds_per_liquidity);
    let spl_part = spl_delta / span as u128 * gap as u128
        + (spl_delta % span as u128) * gap as u128 / span as u128;
    let seconds_per_liquidity = before.seconds_per_liquidity.wrapping_add(spl_part);

    (tick_seconds, seconds_per_liquidity)
}

/// Cumulative tick-seconds and seconds-per-liquidity at each requested
/// lookback. Fails when a lookback precedes the oldest retained sample.
#[allow(clippy::too_many_arguments)]
pub fn sample(
    env: &Env,
    read_sample: impl Fn(&Env, u32) -> Sample,
    state: &SampleState,
    now: u64,
    tick_now: i32,
    liquidity_now: u128,
    seconds_agos: &Vec<u64>,
) -> (Vec<i64>, Vec<u128>) {
    let mut tick_seconds = Vec::new(env);
    let mut seconds_per_liquidity = Vec::new(env);

    for seconds_ago in seconds_agos.iter() {
        let target = now.saturating_sub(seconds_ago);
        let (ts, spl) = cumulatives_at(env, &read_sample, state, target, tick_now, liquidity_now);
        tick_seconds.push_back(ts);
        seconds_per_liquidity.push_back(spl);
    }

    (tick_seconds, seconds_per_liquidity)
}

/// Time-weighted average tick over the window `[now - from_ago, now - to_ago]`.
#[allow(clippy::too_many_arguments)]
pub fn average_tick(
    env: &Env,
    read_sample: impl Fn(&Env, u32) -> Sample,
    state: &SampleState,
    now: u64,
    tick_now: i32,
    liquidity_now: u128,
    from_ago: u64,
    to_ago: u64,
) -> i32 {
    if from_ago <= to_ago {
        panic!("invalid sample window");
    }

    let (ts_from, _) = cumulatives_at(
        env,
        &read_sample,
        state,
        now.saturating_sub(from_ago),
        tick_now,
        liquidity_now,
    );
    let (ts_to, _) = cumulatives_at(
        env,
        &read_sample,
        state,
        now.saturating_sub(to_ago),
        tick_now,
        liquidity_now,
    );

    ((ts_to - ts_from) / (from_ago - to_ago) as i64) as i32
}
