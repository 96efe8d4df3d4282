//! Companion list picker for time editors.
//!
//! ## Usage
//!
//! Offer direct selection of a segment value next to a masked time editor.
//! The editor opens the list on Down when no segment is active yet; a
//! selected option goes through the same commit path as typing.

use crate::{
    time_field::{HourConvention, Segment},
    time_model::Meridiem,
};

/// Value carried by a list option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionValue {
    /// A numeric segment value.
    Number(u32),
    /// AM or PM.
    Meridiem(Meridiem),
}

/// One selectable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOption {
    /// Segment the option sets.
    pub segment: Segment,
    /// Value the option sets.
    pub value: OptionValue,
    /// Text shown in the list.
    pub label: String,
}

/// Builds the options for `segment`.
///
/// Hours follow the convention (1-12 or 0-23). Minutes and seconds list
/// `allowed` when snapping is configured, otherwise every value 0-59.
pub fn segment_options(
    segment: Segment,
    convention: HourConvention,
    allowed: Option<&[u32]>,
) -> Vec<TimeOption> {
    let numbers = |values: Vec<u32>| -> Vec<TimeOption> {
        values
            .into_iter()
            .map(|value| TimeOption {
                segment,
                value: OptionValue::Number(value),
                label: format!("{value:02}"),
            })
            .collect()
    };

    match segment {
        Segment::Hour => match convention {
            HourConvention::Twelve => numbers((1..=12).collect()),
            HourConvention::TwentyFour => numbers((0..=23).collect()),
        },
        Segment::Minute | Segment::Second => match allowed {
            Some(allowed) => numbers(allowed.to_vec()),
            None => numbers((0..=59).collect()),
        },
        Segment::Meridiem => [Meridiem::Am, Meridiem::Pm]
            .into_iter()
            .map(|meridiem| TimeOption {
                segment,
                value: OptionValue::Meridiem(meridiem),
                label: meridiem.to_string(),
            })
            .collect(),
    }
}

/// Open/closed state and highlighted row of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeListState {
    open: bool,
    highlighted: usize,
}

impl TimeListState {
    /// Returns true while the list is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Index of the highlighted option.
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Shows the list with `highlighted` selected.
    pub fn open(&mut self, highlighted: usize) {
        self.open = true;
        self.highlighted = highlighted;
    }

    /// Hides the list.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Moves the highlight by `delta` rows, clamped to `len` options.
    pub fn move_highlight(&mut self, delta: i64, len: usize) {
        if len == 0 {
            self.highlighted = 0;
            return;
        }
        let max = (len - 1) as i64;
        self.highlighted = (self.highlighted as i64 + delta).clamp(0, max) as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_model::FIVE_MINUTE_STEPS;

    #[test]
    fn hour_options_follow_convention() {
        let twelve = segment_options(Segment::Hour, HourConvention::Twelve, None);
        assert_eq!(twelve.len(), 12);
        assert_eq!(twelve[0].label, "01");
        let twenty_four = segment_options(Segment::Hour, HourConvention::TwentyFour, None);
        assert_eq!(twenty_four.len(), 24);
        assert_eq!(twenty_four[0].value, OptionValue::Number(0));
    }

    #[test]
    fn minute_options_use_snap_list() {
        let all = segment_options(Segment::Minute, HourConvention::Twelve, None);
        assert_eq!(all.len(), 60);
        let snapped =
            segment_options(Segment::Minute, HourConvention::Twelve, Some(&FIVE_MINUTE_STEPS));
        assert_eq!(snapped.len(), 12);
        assert_eq!(snapped[3].label, "15");
    }

    #[test]
    fn meridiem_options() {
        let options = segment_options(Segment::Meridiem, HourConvention::Twelve, None);
        let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["AM", "PM"]);
    }

    #[test]
    fn highlight_is_clamped() {
        let mut list = TimeListState::default();
        list.open(1);
        list.move_highlight(-5, 3);
        assert_eq!(list.highlighted(), 0);
        list.move_highlight(10, 3);
        assert_eq!(list.highlighted(), 2);
        list.close();
        assert!(!list.is_open());
    }
}
