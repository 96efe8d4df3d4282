//! The two editor variants.
//!
//! [`TimeField`](super::TimeField) is generic over [`FieldVariant`]; a
//! variant supplies its segment layout, hour convention, the defaults for
//! segments not yet entered, and the parse/resolve/serialize trio for its
//! external value.

use std::fmt;

use crate::time_model::{
    COMMON_SECONDS, FIVE_MINUTE_STEPS, Meridiem, duration_to_segments, format_clock_time,
    format_duration, parse_clock_time,
};

use super::{
    commit::{RawTime, resolve_clock, resolve_duration},
    entry::HourConvention,
    segment::{Segment, SegmentLayout, SegmentSpec, StepPolicy},
};

/// Variant-specific behaviour of a time editor.
pub trait FieldVariant: Send + Sync + 'static {
    /// External value type.
    type Value: Clone + PartialEq + fmt::Debug + Send + Sync + 'static;

    /// Segments in editing order.
    const LAYOUT: SegmentLayout;

    /// How typed hours are read.
    const HOUR_CONVENTION: HourConvention;

    /// Values used for segments not yet entered.
    fn defaults() -> RawTime;

    /// Parses an external value; malformed values yield `None`.
    fn parse(value: &Self::Value) -> Option<RawTime>;

    /// Resolves overflow and snapping; every field of the result is in
    /// range.
    fn resolve(raw: RawTime, snap: bool) -> RawTime;

    /// Serializes a resolved candidate.
    fn serialize(resolved: &RawTime) -> Self::Value;

    /// Allowed values of `segment` when snapping is enabled.
    fn snap_list(segment: Segment) -> Option<&'static [u32]>;
}

/// 12-hour editor counting down to a wall-clock time.
///
/// The external value is the display string, e.g. `"07:30 PM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountdownVariant;

impl FieldVariant for CountdownVariant {
    type Value = String;

    const LAYOUT: SegmentLayout = SegmentLayout::new(&[
        SegmentSpec {
            segment: Segment::Hour,
            width: 2,
            policy: StepPolicy::Wrap { min: 1, max: 12 },
        },
        SegmentSpec {
            segment: Segment::Minute,
            width: 2,
            policy: StepPolicy::Clamp { min: 0, max: 59 },
        },
        SegmentSpec {
            segment: Segment::Meridiem,
            width: 2,
            policy: StepPolicy::Toggle,
        },
    ]);

    const HOUR_CONVENTION: HourConvention = HourConvention::Twelve;

    fn defaults() -> RawTime {
        RawTime {
            hour: 12,
            minute: 0,
            second: 0,
            meridiem: Meridiem::Am,
        }
    }

    fn parse(value: &String) -> Option<RawTime> {
        parse_clock_time(value).map(RawTime::from)
    }

    fn resolve(raw: RawTime, snap: bool) -> RawTime {
        resolve_clock(raw, snap).into()
    }

    fn serialize(resolved: &RawTime) -> String {
        format_clock_time(
            resolved.hour.clamp(0, 23) as u8,
            resolved.minute.clamp(0, 59) as u8,
            resolved.meridiem,
        )
    }

    fn snap_list(segment: Segment) -> Option<&'static [u32]> {
        match segment {
            Segment::Minute => Some(&FIVE_MINUTE_STEPS),
            _ => None,
        }
    }
}

/// 24-hour editor for an elapsed duration.
///
/// The external value is the total number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerVariant;

impl FieldVariant for TimerVariant {
    type Value = u64;

    const LAYOUT: SegmentLayout = SegmentLayout::new(&[
        SegmentSpec {
            segment: Segment::Hour,
            width: 2,
            policy: StepPolicy::Floor { min: 0 },
        },
        SegmentSpec {
            segment: Segment::Minute,
            width: 2,
            policy: StepPolicy::Carry,
        },
        SegmentSpec {
            segment: Segment::Second,
            width: 2,
            policy: StepPolicy::Carry,
        },
    ]);

    const HOUR_CONVENTION: HourConvention = HourConvention::TwentyFour;

    fn defaults() -> RawTime {
        RawTime {
            hour: 0,
            minute: 0,
            second: 0,
            meridiem: Meridiem::Am,
        }
    }

    fn parse(value: &u64) -> Option<RawTime> {
        let seconds = i64::try_from(*value).ok()?;
        duration_to_segments(seconds).map(RawTime::from)
    }

    fn resolve(raw: RawTime, snap: bool) -> RawTime {
        resolve_duration(raw, snap).into()
    }

    fn serialize(resolved: &RawTime) -> u64 {
        resolve_duration(*resolved, false).total_seconds()
    }

    fn snap_list(segment: Segment) -> Option<&'static [u32]> {
        match segment {
            Segment::Minute => Some(&FIVE_MINUTE_STEPS),
            Segment::Second => Some(&COMMON_SECONDS),
            _ => None,
        }
    }
}

/// Formats a timer value the way the timer editor shows it.
pub fn timer_display(seconds: u64) -> String {
    let seconds = i64::try_from(seconds).unwrap_or(i64::MAX);
    duration_to_segments(seconds)
        .map(format_duration)
        .unwrap_or_default()
}
