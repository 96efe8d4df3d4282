//! Clock-time and duration arithmetic shared by the time editors.
//!
//! Everything here is pure. Malformed input yields `None`, never a panic.

use std::fmt;

/// Minute values offered when minutes snap to five-minute steps.
pub const FIVE_MINUTE_STEPS: [u32; 12] = [0, 5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55];

/// Second values offered when seconds snap to common cue points.
pub const COMMON_SECONDS: [u32; 7] = [0, 5, 10, 15, 20, 30, 45];

/// Indicates whether a 12-hour time is before or after noon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Meridiem {
    /// Ante meridiem (before noon).
    #[default]
    Am,
    /// Post meridiem (after noon).
    Pm,
}

impl Meridiem {
    /// Display text, `"AM"` or `"PM"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }

    /// The other half of the day.
    pub fn toggle(self) -> Self {
        match self {
            Meridiem::Am => Meridiem::Pm,
            Meridiem::Pm => Meridiem::Am,
        }
    }

    /// Maps a typed `a`/`p` (either case) to a meridiem.
    pub fn from_key(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'a' => Some(Meridiem::Am),
            'p' => Some(Meridiem::Pm),
            _ => None,
        }
    }

    /// Parses `"AM"`/`"PM"`, case-insensitive.
    pub fn parse(text: &str) -> Option<Self> {
        if text.eq_ignore_ascii_case("am") {
            Some(Meridiem::Am)
        } else if text.eq_ignore_ascii_case("pm") {
            Some(Meridiem::Pm)
        } else {
            None
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A wall-clock time in 12-hour form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockTime {
    /// Hour, 1-12.
    pub hour: u8,
    /// Minute, 0-59.
    pub minute: u8,
    /// Half of the day.
    pub meridiem: Meridiem,
}

impl ClockTime {
    /// Hour in 24-hour form (0-23).
    pub fn hour_24(&self) -> u8 {
        to_24_hour(self.hour, self.meridiem)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_clock_time(self.hour, self.minute, self.meridiem))
    }
}

/// An elapsed duration split into hour, minute and second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DurationParts {
    /// Whole hours, uncapped.
    pub hour: u64,
    /// Minute, 0-59.
    pub minute: u8,
    /// Second, 0-59.
    pub second: u8,
}

impl DurationParts {
    /// Total number of seconds.
    pub fn total_seconds(&self) -> u64 {
        segments_to_duration(
            Some(self.hour),
            Some(u64::from(self.minute)),
            Some(u64::from(self.second)),
        )
    }
}

impl fmt::Display for DurationParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_duration(*self))
    }
}

/// Converts a 12-hour hour and meridiem to a 24-hour hour.
pub fn to_24_hour(hour: u8, meridiem: Meridiem) -> u8 {
    let base = hour % 12;
    match meridiem {
        Meridiem::Am => base,
        Meridiem::Pm => base + 12,
    }
}

/// Converts a 24-hour hour (taken modulo 24) to 12-hour form.
pub fn from_24_hour(hour: u8) -> (u8, Meridiem) {
    let hour = hour % 24;
    let meridiem = if hour >= 12 { Meridiem::Pm } else { Meridiem::Am };
    let hour = hour % 12;
    (if hour == 0 { 12 } else { hour }, meridiem)
}

/// Parses a clock time.
///
/// Accepts `"h:mm AM"` / `"hh:mm pm"` (hour 1-12, meridiem in any case, the
/// space is optional) or a 24-hour `"HH:mm"` (hour 0-23), which is converted
/// to 12-hour form.
///
/// ```
/// use stagetime_components::time_model::{Meridiem, parse_clock_time};
///
/// let time = parse_clock_time("6:30 PM").unwrap();
/// assert_eq!((time.hour, time.minute, time.meridiem), (6, 30, Meridiem::Pm));
/// assert_eq!(parse_clock_time("18:30"), Some(time));
/// assert_eq!(parse_clock_time("13:30 PM"), None);
/// ```
pub fn parse_clock_time(text: &str) -> Option<ClockTime> {
    let (hour_text, rest) = text.trim().split_once(':')?;
    let hour = parse_digits(hour_text, 1, 2)?;
    let minute = parse_digits(rest.get(..2)?, 2, 2)?;
    if minute > 59 {
        return None;
    }
    let minute = minute as u8;
    let tail = rest.get(2..)?.trim();

    if tail.is_empty() {
        if hour > 23 {
            return None;
        }
        let (hour, meridiem) = from_24_hour(hour as u8);
        return Some(ClockTime {
            hour,
            minute,
            meridiem,
        });
    }

    let meridiem = Meridiem::parse(tail)?;
    if !(1..=12).contains(&hour) {
        return None;
    }
    Some(ClockTime {
        hour: hour as u8,
        minute,
        meridiem,
    })
}

/// Parses an elapsed duration written as `"H:mm:ss"` or `"H:mm"`.
///
/// Hours take any number of digits; minute and second are two digits, 0-59.
/// A missing second defaults to 0.
pub fn parse_duration(text: &str) -> Option<DurationParts> {
    let mut parts = text.trim().split(':');
    let hour_text = parts.next()?;
    let minute_text = parts.next()?;
    let second_text = parts.next();
    if parts.next().is_some() {
        return None;
    }

    if hour_text.is_empty() || !hour_text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour = hour_text.parse::<u64>().ok()?;
    let minute = parse_digits(minute_text, 2, 2)?;
    let second = match second_text {
        Some(second_text) => parse_digits(second_text, 2, 2)?,
        None => 0,
    };
    if minute > 59 || second > 59 {
        return None;
    }
    Some(DurationParts {
        hour,
        minute: minute as u8,
        second: second as u8,
    })
}

/// Formats a clock time as zero-padded `"hh:mm AM"`.
///
/// The hour goes through 24-hour form and back, so `0` and `12` both
/// render as `12`.
pub fn format_clock_time(hour: u8, minute: u8, meridiem: Meridiem) -> String {
    let (hour, meridiem) = from_24_hour(to_24_hour(hour, meridiem));
    format!("{hour:02}:{:02} {meridiem}", minute.min(59))
}

/// Formats a duration as `"hh:mm:ss"`. Hours take at least two digits.
pub fn format_duration(parts: DurationParts) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        parts.hour, parts.minute, parts.second
    )
}

/// Splits a number of seconds into hour, minute and second.
///
/// Negative input yields `None`.
pub fn duration_to_segments(total_seconds: i64) -> Option<DurationParts> {
    let total = u64::try_from(total_seconds).ok()?;
    Some(DurationParts {
        hour: total / 3_600,
        minute: ((total % 3_600) / 60) as u8,
        second: (total % 60) as u8,
    })
}

/// Joins hour, minute and second into a number of seconds.
///
/// Missing parts count as zero.
pub fn segments_to_duration(hour: Option<u64>, minute: Option<u64>, second: Option<u64>) -> u64 {
    hour.unwrap_or(0)
        .saturating_mul(3_600)
        .saturating_add(minute.unwrap_or(0).saturating_mul(60))
        .saturating_add(second.unwrap_or(0))
}

/// Returns the member of `allowed` closest to `value`.
///
/// `allowed` is scanned in order and only a strictly smaller distance
/// replaces the current best, so on a tie the first member found wins (the
/// lower one for an ascending list). An empty list returns `value`.
///
/// ```
/// use stagetime_components::time_model::{FIVE_MINUTE_STEPS, snap_to_nearest};
///
/// assert_eq!(snap_to_nearest(7, &FIVE_MINUTE_STEPS), 5);
/// assert_eq!(snap_to_nearest(8, &FIVE_MINUTE_STEPS), 10);
/// ```
pub fn snap_to_nearest(value: u32, allowed: &[u32]) -> u32 {
    let mut best = value;
    let mut best_distance = u32::MAX;
    for &candidate in allowed {
        let distance = value.abs_diff(candidate);
        if distance < best_distance {
            best = candidate;
            best_distance = distance;
        }
    }
    best
}

fn parse_digits(text: &str, min_len: usize, max_len: usize) -> Option<u32> {
    if text.len() < min_len || text.len() > max_len {
        return None;
    }
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_twelve_hour_text() {
        assert_eq!(
            parse_clock_time("6:30 PM"),
            Some(ClockTime {
                hour: 6,
                minute: 30,
                meridiem: Meridiem::Pm
            })
        );
        assert_eq!(
            parse_clock_time(" 12:05am "),
            Some(ClockTime {
                hour: 12,
                minute: 5,
                meridiem: Meridiem::Am
            })
        );
        assert_eq!(parse_clock_time("0:30 AM"), None);
        assert_eq!(parse_clock_time("13:00 PM"), None);
        assert_eq!(parse_clock_time("6:60 PM"), None);
        assert_eq!(parse_clock_time("6:3 PM"), None);
        assert_eq!(parse_clock_time("6:30 XM"), None);
        assert_eq!(parse_clock_time(""), None);
        assert_eq!(parse_clock_time("six:30 PM"), None);
    }

    #[test]
    fn parses_twenty_four_hour_text() {
        assert_eq!(
            parse_clock_time("00:15"),
            Some(ClockTime {
                hour: 12,
                minute: 15,
                meridiem: Meridiem::Am
            })
        );
        assert_eq!(
            parse_clock_time("12:00"),
            Some(ClockTime {
                hour: 12,
                minute: 0,
                meridiem: Meridiem::Pm
            })
        );
        assert_eq!(
            parse_clock_time("23:59").map(|t| t.hour_24()),
            Some(23)
        );
        assert_eq!(parse_clock_time("24:00"), None);
    }

    #[test]
    fn clock_round_trip() {
        for hour in 1..=12u8 {
            for minute in 0..=59u8 {
                for meridiem in [Meridiem::Am, Meridiem::Pm] {
                    let text = format_clock_time(hour, minute, meridiem);
                    assert_eq!(
                        parse_clock_time(&text),
                        Some(ClockTime {
                            hour,
                            minute,
                            meridiem
                        }),
                        "{text}"
                    );
                }
            }
        }
    }

    #[test]
    fn format_normalises_hour() {
        assert_eq!(format_clock_time(7, 30, Meridiem::Pm), "07:30 PM");
        assert_eq!(format_clock_time(0, 0, Meridiem::Am), "12:00 AM");
        assert_eq!(format_clock_time(12, 0, Meridiem::Pm), "12:00 PM");
    }

    #[test]
    fn parses_durations() {
        assert_eq!(
            parse_duration("01:02:03"),
            Some(DurationParts {
                hour: 1,
                minute: 2,
                second: 3
            })
        );
        assert_eq!(
            parse_duration("00:45"),
            Some(DurationParts {
                hour: 0,
                minute: 45,
                second: 0
            })
        );
        assert_eq!(parse_duration("30:00:00").map(|p| p.hour), Some(30));
        assert_eq!(parse_duration("00:60:00"), None);
        assert_eq!(parse_duration("00:00:61"), None);
        assert_eq!(parse_duration("1:2:3"), None);
        assert_eq!(parse_duration("1:02:03:04"), None);
        assert_eq!(parse_duration(":02"), None);
    }

    #[test]
    fn duration_conversion() {
        assert_eq!(
            duration_to_segments(125),
            Some(DurationParts {
                hour: 0,
                minute: 2,
                second: 5
            })
        );
        assert_eq!(duration_to_segments(-1), None);
        assert_eq!(segments_to_duration(None, Some(3), None), 180);
        assert_eq!(segments_to_duration(Some(1), Some(1), Some(1)), 3_661);

        for seconds in [0i64, 1, 59, 60, 3_599, 3_600, 86_399, 86_400, 359_999, 1_000_000] {
            let parts = duration_to_segments(seconds).unwrap();
            assert_eq!(parts.total_seconds(), seconds as u64);
        }
    }

    #[test]
    fn formats_duration() {
        assert_eq!(format_duration(DurationParts::default()), "00:00:00");
        let parts = duration_to_segments(3_661).unwrap();
        assert_eq!(parts.to_string(), "01:01:01");
        let long = duration_to_segments(100 * 3_600).unwrap();
        assert_eq!(long.to_string(), "100:00:00");
    }

    #[test]
    fn snap_prefers_first_minimum() {
        assert_eq!(snap_to_nearest(7, &FIVE_MINUTE_STEPS), 5);
        assert_eq!(snap_to_nearest(8, &FIVE_MINUTE_STEPS), 10);
        assert_eq!(snap_to_nearest(59, &FIVE_MINUTE_STEPS), 55);
        assert_eq!(snap_to_nearest(25, &COMMON_SECONDS), 20);
        assert_eq!(snap_to_nearest(38, &COMMON_SECONDS), 45);
        assert_eq!(snap_to_nearest(37, &COMMON_SECONDS), 30);
        assert_eq!(snap_to_nearest(9, &[]), 9);
    }

    #[test]
    fn meridiem_keys() {
        assert_eq!(Meridiem::from_key('A'), Some(Meridiem::Am));
        assert_eq!(Meridiem::from_key('p'), Some(Meridiem::Pm));
        assert_eq!(Meridiem::from_key('x'), None);
        assert_eq!(Meridiem::Am.toggle(), Meridiem::Pm);
    }
}
