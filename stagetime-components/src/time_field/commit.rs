//! Overflow resolution and snapping applied before a value leaves the editor.

use crate::time_model::{
    COMMON_SECONDS, ClockTime, DurationParts, FIVE_MINUTE_STEPS, Meridiem, duration_to_segments,
    snap_to_nearest,
};

use super::segment::Segment;

/// Candidate segment values on their way to a commit.
///
/// Numbers are signed and unbounded so steps and typed overflow can be
/// represented before resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTime {
    /// Hour.
    pub hour: i64,
    /// Minute.
    pub minute: i64,
    /// Second (timer variant).
    pub second: i64,
    /// AM/PM (countdown variant).
    pub meridiem: Meridiem,
}

impl RawTime {
    /// Numeric value of `segment`; `Meridiem` reads as 0 for AM and 1 for PM.
    pub fn get(&self, segment: Segment) -> i64 {
        match segment {
            Segment::Hour => self.hour,
            Segment::Minute => self.minute,
            Segment::Second => self.second,
            Segment::Meridiem => match self.meridiem {
                Meridiem::Am => 0,
                Meridiem::Pm => 1,
            },
        }
    }

    /// Replaces the numeric value of `segment`; for `Meridiem` zero is AM and
    /// anything else PM.
    pub fn set(&mut self, segment: Segment, value: i64) {
        match segment {
            Segment::Hour => self.hour = value,
            Segment::Minute => self.minute = value,
            Segment::Second => self.second = value,
            Segment::Meridiem => {
                self.meridiem = if value == 0 {
                    Meridiem::Am
                } else {
                    Meridiem::Pm
                }
            }
        }
    }
}

impl From<ClockTime> for RawTime {
    fn from(time: ClockTime) -> Self {
        Self {
            hour: i64::from(time.hour),
            minute: i64::from(time.minute),
            second: 0,
            meridiem: time.meridiem,
        }
    }
}

impl From<DurationParts> for RawTime {
    fn from(parts: DurationParts) -> Self {
        Self {
            hour: i64::try_from(parts.hour).unwrap_or(i64::MAX),
            minute: i64::from(parts.minute),
            second: i64::from(parts.second),
            meridiem: Meridiem::Am,
        }
    }
}

/// Resolves a countdown candidate to a valid clock time.
///
/// The hour is brought into 1-12, the minute is clamped to 0-59 (a clock
/// never carries minutes into the hour) and, with `snap`, moved to the
/// nearest five-minute step.
pub fn resolve_clock(raw: RawTime, snap: bool) -> ClockTime {
    let hour = (raw.hour - 1).rem_euclid(12) + 1;
    let mut minute = raw.minute.clamp(0, 59) as u32;
    if snap {
        minute = snap_to_nearest(minute, &FIVE_MINUTE_STEPS);
    }
    ClockTime {
        hour: hour as u8,
        minute: minute as u8,
        meridiem: raw.meridiem,
    }
}

/// Resolves a timer candidate to a valid duration.
///
/// Seconds of 60 or more carry into minutes, minutes into hours, and
/// negative values borrow; the total never drops below zero. With `snap`,
/// minutes move to five-minute steps and seconds to common cue points.
pub fn resolve_duration(raw: RawTime, snap: bool) -> DurationParts {
    let total = raw
        .hour
        .saturating_mul(3_600)
        .saturating_add(raw.minute.saturating_mul(60))
        .saturating_add(raw.second)
        .max(0);
    let mut parts = duration_to_segments(total).unwrap_or_default();
    if snap {
        parts.minute = snap_to_nearest(u32::from(parts.minute), &FIVE_MINUTE_STEPS) as u8;
        parts.second = snap_to_nearest(u32::from(parts.second), &COMMON_SECONDS) as u8;
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(hour: i64, minute: i64, second: i64) -> RawTime {
        RawTime {
            hour,
            minute,
            second,
            meridiem: Meridiem::Pm,
        }
    }

    #[test]
    fn clock_clamps_minutes_without_touching_the_hour() {
        let time = resolve_clock(raw(6, 99, 0), false);
        assert_eq!((time.hour, time.minute), (6, 59));
        let time = resolve_clock(raw(13, -4, 0), false);
        assert_eq!((time.hour, time.minute), (1, 0));
        assert_eq!(resolve_clock(raw(0, 0, 0), false).hour, 12);
    }

    #[test]
    fn clock_snaps_minutes() {
        assert_eq!(resolve_clock(raw(6, 7, 0), true).minute, 5);
        assert_eq!(resolve_clock(raw(6, 8, 0), true).minute, 10);
        assert_eq!(resolve_clock(raw(6, 30, 0), true).minute, 30);
    }

    #[test]
    fn duration_carries_and_borrows() {
        let parts = resolve_duration(raw(0, 2, 99), false);
        assert_eq!((parts.hour, parts.minute, parts.second), (0, 3, 39));
        let parts = resolve_duration(raw(0, 59, 60), false);
        assert_eq!((parts.hour, parts.minute, parts.second), (1, 0, 0));
        let parts = resolve_duration(raw(0, 1, -1), false);
        assert_eq!((parts.hour, parts.minute, parts.second), (0, 0, 59));
        assert_eq!(resolve_duration(raw(0, 0, -1), false), DurationParts::default());
    }

    #[test]
    fn duration_snaps_minutes_and_seconds() {
        let parts = resolve_duration(raw(1, 7, 25), true);
        assert_eq!((parts.hour, parts.minute, parts.second), (1, 5, 20));
    }

    #[test]
    fn resolving_is_idempotent() {
        let once = resolve_duration(raw(0, 2, 99), true);
        let twice = resolve_duration(RawTime::from(once), true);
        assert_eq!(once, twice);

        let once = resolve_clock(raw(7, 42, 0), false);
        let twice = resolve_clock(RawTime::from(once), false);
        assert_eq!(once, twice);
    }

    #[test]
    fn raw_time_accessors() {
        let mut time = raw(1, 2, 3);
        time.set(Segment::Second, 30);
        time.set(Segment::Meridiem, 0);
        assert_eq!(time.get(Segment::Second), 30);
        assert_eq!(time.get(Segment::Meridiem), 0);
        assert_eq!(time.meridiem, Meridiem::Am);
    }
}
