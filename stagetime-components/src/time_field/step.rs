//! Up/Down stepping rules.

use crate::time_model::Meridiem;

use super::segment::StepPolicy;

/// Minutes per hour and seconds per minute; the cycle a carrying segment
/// rolls over at.
const CARRY_CYCLE: i64 = 60;

/// Applies `delta` to `value` under `policy`.
///
/// `Carry` returns the raw sum; the commit step resolves it. `Toggle` is
/// not numeric and returns `value` unchanged.
pub fn step_value(policy: StepPolicy, value: i64, delta: i64) -> i64 {
    match policy {
        StepPolicy::Wrap { min, max } => {
            let span = max - min + 1;
            min + (value - min + delta).rem_euclid(span)
        }
        StepPolicy::Floor { min } => value.saturating_add(delta).max(min),
        StepPolicy::Clamp { min, max } => value.saturating_add(delta).clamp(min, max),
        StepPolicy::Carry => value.saturating_add(delta),
        StepPolicy::Toggle => value,
    }
}

/// Moves `value` to the neighbouring member of `allowed` in the direction of
/// `delta`.
///
/// Past either end a carrying segment rolls into the next cycle (so the
/// commit step carries or borrows); every other policy stays put.
pub fn step_snapped(policy: StepPolicy, value: i64, delta: i64, allowed: &[u32]) -> i64 {
    let mut values = allowed.iter().map(|&v| i64::from(v));
    let (Some(first), Some(last)) = (values.clone().next(), values.clone().last()) else {
        return step_value(policy, value, delta);
    };

    if delta > 0 {
        match values.find(|&v| v > value) {
            Some(next) => next,
            None if policy == StepPolicy::Carry => first + CARRY_CYCLE,
            None => value,
        }
    } else if delta < 0 {
        match values.rev().find(|&v| v < value) {
            Some(previous) => previous,
            None if policy == StepPolicy::Carry => last - CARRY_CYCLE,
            None => value,
        }
    } else {
        value
    }
}

/// Splits a rolled carry result into the value the segment keeps and the
/// step (-1, 0 or +1) owed to the next-higher segment.
pub fn split_carry(value: i64) -> (i64, i64) {
    (value.rem_euclid(CARRY_CYCLE), value.div_euclid(CARRY_CYCLE))
}

/// Any non-zero step flips AM/PM.
pub fn step_meridiem(meridiem: Meridiem, delta: i64) -> Meridiem {
    if delta != 0 {
        meridiem.toggle()
    } else {
        meridiem
    }
}
