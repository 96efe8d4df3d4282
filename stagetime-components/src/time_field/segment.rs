//! Segment descriptors, ordering and caret mapping for masked time text.

use std::ops::Range;

use smallvec::SmallVec;

/// One editable part of a masked time.
///
/// Declaration order is the editing order: `Hour < Minute < Second` and
/// `Hour < Minute < Meridiem`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    /// Hour.
    Hour,
    /// Minute.
    Minute,
    /// Second (timer variant).
    Second,
    /// AM/PM (countdown variant).
    Meridiem,
}

impl Segment {
    /// Mask text shown while the segment has no value.
    pub fn placeholder(self) -> &'static str {
        match self {
            Segment::Hour => "hh",
            Segment::Minute => "mm",
            Segment::Second => "ss",
            Segment::Meridiem => "aa",
        }
    }
}

/// How Up/Down change a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPolicy {
    /// Wrap around inside `[min, max]`.
    Wrap {
        /// Lowest value.
        min: i64,
        /// Highest value.
        max: i64,
    },
    /// Never go below `min`; no upper bound.
    Floor {
        /// Lowest value.
        min: i64,
    },
    /// Stay inside `[min, max]`.
    Clamp {
        /// Lowest value.
        min: i64,
        /// Highest value.
        max: i64,
    },
    /// Leave the range freely; the commit step carries or borrows into the
    /// next-higher segment.
    Carry,
    /// Two-valued field; any step flips it.
    Toggle,
}

/// Descriptor of one segment in a variant's mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentSpec {
    /// Which segment.
    pub segment: Segment,
    /// Minimum rendered width in characters.
    pub width: usize,
    /// Step behaviour.
    pub policy: StepPolicy,
}

/// Ordered segments of a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentLayout {
    specs: &'static [SegmentSpec],
}

impl SegmentLayout {
    /// Wraps an ordered, non-empty list of specs.
    pub const fn new(specs: &'static [SegmentSpec]) -> Self {
        Self { specs }
    }

    /// All specs in editing order.
    pub fn specs(&self) -> &'static [SegmentSpec] {
        self.specs
    }

    /// Segments in editing order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.specs.iter().map(|spec| spec.segment)
    }

    /// The first segment.
    pub fn first(&self) -> Segment {
        self.specs.first().map_or(Segment::Hour, |spec| spec.segment)
    }

    /// The terminal segment.
    pub fn last(&self) -> Segment {
        self.specs.last().map_or(Segment::Hour, |spec| spec.segment)
    }

    /// Position of `segment`, if the layout has it.
    pub fn index_of(&self, segment: Segment) -> Option<usize> {
        self.specs.iter().position(|spec| spec.segment == segment)
    }

    /// Descriptor of `segment`, if the layout has it.
    pub fn spec(&self, segment: Segment) -> Option<&'static SegmentSpec> {
        self.specs.iter().find(|spec| spec.segment == segment)
    }

    /// Returns true when the layout has `segment`.
    pub fn contains(&self, segment: Segment) -> bool {
        self.index_of(segment).is_some()
    }

    /// The segment after `current`; the terminal segment stays put.
    pub fn next_segment(&self, current: Segment) -> Segment {
        match self.index_of(current) {
            Some(idx) if idx + 1 < self.specs.len() => self.specs[idx + 1].segment,
            Some(_) => current,
            None => self.first(),
        }
    }

    /// The segment before `current`; the first segment stays put.
    pub fn previous_segment(&self, current: Segment) -> Segment {
        match self.index_of(current) {
            Some(idx) if idx > 0 => self.specs[idx - 1].segment,
            Some(_) => current,
            None => self.first(),
        }
    }

    /// Separator rendered before the segment at `index` (none before the
    /// first). AM/PM is set off by a space, numbers by a colon.
    pub fn separator_before(&self, index: usize) -> &'static str {
        match self.specs.get(index) {
            None => "",
            Some(_) if index == 0 => "",
            Some(spec) if spec.segment == Segment::Meridiem => " ",
            Some(_) => ":",
        }
    }
}

/// Character ranges of each segment in the rendered mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskLayout {
    ranges: SmallVec<[(Segment, Range<usize>); 3]>,
}

impl MaskLayout {
    /// Builds the table from the layout and the rendered width of each
    /// segment (missing or narrower widths fall back to the declared width).
    pub fn new(layout: &SegmentLayout, widths: &[usize]) -> Self {
        let mut ranges = SmallVec::new();
        let mut offset = 0;
        for (idx, spec) in layout.specs().iter().enumerate() {
            offset += layout.separator_before(idx).len();
            let width = widths
                .get(idx)
                .copied()
                .unwrap_or(spec.width)
                .max(spec.width);
            ranges.push((spec.segment, offset..offset + width));
            offset += width;
        }
        Self { ranges }
    }

    /// Character range of `segment`.
    pub fn range_of(&self, segment: Segment) -> Option<Range<usize>> {
        self.ranges
            .iter()
            .find(|(s, _)| *s == segment)
            .map(|(_, range)| range.clone())
    }

    /// Segment owning caret position `caret`.
    ///
    /// A segment owns the positions from its first character up to the
    /// position right after its last one. Anything past the table belongs
    /// to the last segment.
    pub fn segment_at_caret(&self, caret: usize) -> Segment {
        for (segment, range) in &self.ranges {
            if caret <= range.end {
                return *segment;
            }
        }
        self.ranges
            .last()
            .map_or(Segment::Hour, |(segment, _)| *segment)
    }

    /// Total rendered length.
    pub fn len(&self) -> usize {
        self.ranges.last().map_or(0, |(_, range)| range.end)
    }

    /// Returns true for an empty table.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
