//! Digit-entry state machine.
//!
//! A numeric segment is either idle or holding one buffered digit. Each
//! typed digit moves it to the next state and says whether a value is now
//! complete. The decision only depends on the segment, the hour convention,
//! the buffered digit and the new digit, so it lives in a pure function.

use super::segment::Segment;

/// Hour range convention of a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourConvention {
    /// Hours 1-12 with a separate AM/PM segment.
    Twelve,
    /// Hours 0-23 when typed.
    TwentyFour,
}

/// A digit waiting for its partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDigit {
    /// Segment the digit was typed into.
    pub segment: Segment,
    /// The digit, 0-9.
    pub digit: u8,
}

/// Outcome of typing a digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStep {
    /// Keep the digit and wait for a second one.
    Buffer(u8),
    /// The segment value is complete.
    Commit(u32),
    /// Commit `value`, then feed `digit` to the next segment as its first
    /// keystroke.
    CommitThenReprocess {
        /// Completed value of the current segment.
        value: u32,
        /// Digit to replay in the next segment.
        digit: u8,
    },
    /// The segment does not take digits.
    Ignore,
}

/// Feeds `digit` to `segment` given the currently buffered digit.
///
/// Minute and second values may come out above 59 (typed `9`, `9`); the
/// commit step carries or clamps them.
pub fn enter_digit(
    segment: Segment,
    convention: HourConvention,
    buffered: Option<u8>,
    digit: u8,
) -> EntryStep {
    debug_assert!(digit <= 9);
    match segment {
        Segment::Hour => match convention {
            HourConvention::Twelve => twelve_hour(buffered, digit),
            HourConvention::TwentyFour => twenty_four_hour(buffered, digit),
        },
        Segment::Minute | Segment::Second => match buffered {
            None => EntryStep::Buffer(digit),
            Some(first) => EntryStep::Commit(u32::from(first) * 10 + u32::from(digit)),
        },
        Segment::Meridiem => EntryStep::Ignore,
    }
}

fn twelve_hour(buffered: Option<u8>, digit: u8) -> EntryStep {
    match (buffered, digit) {
        // 00 is not a 12-hour value; start over from "0".
        (Some(0), 0) => EntryStep::Buffer(0),
        (Some(0), d) => EntryStep::Commit(u32::from(d)),
        (Some(1), d @ 0..=2) => EntryStep::Commit(10 + u32::from(d)),
        (Some(1), d) => EntryStep::CommitThenReprocess { value: 1, digit: d },
        (_, d @ 0..=1) => EntryStep::Buffer(d),
        (_, d) => EntryStep::Commit(u32::from(d)),
    }
}

fn twenty_four_hour(buffered: Option<u8>, digit: u8) -> EntryStep {
    match buffered {
        Some(first) => {
            let combined = u32::from(first) * 10 + u32::from(digit);
            if combined <= 23 {
                EntryStep::Commit(combined)
            } else {
                EntryStep::Commit(u32::from(digit))
            }
        }
        None if digit <= 2 => EntryStep::Buffer(digit),
        None => EntryStep::Commit(u32::from(digit)),
    }
}

/// Value committed when focus leaves with `buffered` still pending.
///
/// A lone `0` is not a 12-hour hour and is dropped.
pub fn complete_buffered(
    segment: Segment,
    convention: HourConvention,
    buffered: u8,
) -> Option<u32> {
    match (segment, convention, buffered) {
        (Segment::Meridiem, _, _) => None,
        (Segment::Hour, HourConvention::Twelve, 0) => None,
        (_, _, d) => Some(u32::from(d)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H12: HourConvention = HourConvention::Twelve;
    const H24: HourConvention = HourConvention::TwentyFour;

    #[test]
    fn twelve_hour_first_digit() {
        assert_eq!(enter_digit(Segment::Hour, H12, None, 0), EntryStep::Buffer(0));
        assert_eq!(enter_digit(Segment::Hour, H12, None, 1), EntryStep::Buffer(1));
        assert_eq!(enter_digit(Segment::Hour, H12, None, 2), EntryStep::Commit(2));
        assert_eq!(enter_digit(Segment::Hour, H12, None, 9), EntryStep::Commit(9));
    }

    #[test]
    fn twelve_hour_after_zero() {
        assert_eq!(enter_digit(Segment::Hour, H12, Some(0), 7), EntryStep::Commit(7));
        assert_eq!(enter_digit(Segment::Hour, H12, Some(0), 0), EntryStep::Buffer(0));
    }

    #[test]
    fn twelve_hour_after_one() {
        assert_eq!(enter_digit(Segment::Hour, H12, Some(1), 0), EntryStep::Commit(10));
        assert_eq!(enter_digit(Segment::Hour, H12, Some(1), 2), EntryStep::Commit(12));
        assert_eq!(
            enter_digit(Segment::Hour, H12, Some(1), 3),
            EntryStep::CommitThenReprocess { value: 1, digit: 3 }
        );
    }

    #[test]
    fn twenty_four_hour() {
        assert_eq!(enter_digit(Segment::Hour, H24, None, 2), EntryStep::Buffer(2));
        assert_eq!(enter_digit(Segment::Hour, H24, None, 3), EntryStep::Commit(3));
        assert_eq!(enter_digit(Segment::Hour, H24, Some(2), 3), EntryStep::Commit(23));
        assert_eq!(enter_digit(Segment::Hour, H24, Some(0), 0), EntryStep::Commit(0));
        assert_eq!(enter_digit(Segment::Hour, H24, Some(2), 5), EntryStep::Commit(5));
    }

    #[test]
    fn minutes_and_seconds_always_buffer_first() {
        assert_eq!(enter_digit(Segment::Minute, H12, None, 7), EntryStep::Buffer(7));
        assert_eq!(enter_digit(Segment::Minute, H12, Some(4), 5), EntryStep::Commit(45));
        assert_eq!(enter_digit(Segment::Second, H24, Some(9), 9), EntryStep::Commit(99));
        assert_eq!(enter_digit(Segment::Meridiem, H12, None, 1), EntryStep::Ignore);
    }

    #[test]
    fn completing_a_lone_digit() {
        assert_eq!(complete_buffered(Segment::Hour, H12, 1), Some(1));
        assert_eq!(complete_buffered(Segment::Hour, H12, 0), None);
        assert_eq!(complete_buffered(Segment::Hour, H24, 0), Some(0));
        assert_eq!(complete_buffered(Segment::Second, H24, 5), Some(5));
    }
}
