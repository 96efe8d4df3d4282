//! Masked, keyboard-driven time editors.
//!
//! ## Usage
//!
//! Use [`CountdownField`] to pick the wall-clock time a countdown runs to,
//! and [`TimerField`] to enter an elapsed duration. Both share one engine:
//! digits are buffered per segment until a value is unambiguous, Up/Down
//! step the active segment, Left/Right move between segments, and every
//! completed value passes through a single commit step that resolves
//! overflow, applies snapping and calls `on_change` exactly once.
//!
//! ```
//! use stagetime_components::time_field::{TimeFieldArgs, TimerField};
//! use stagetime_ui::{CallbackWith, KeyEvent, State};
//!
//! let emitted = State::new(Vec::new());
//! let sink = emitted.clone();
//! let mut field = TimerField::new(
//!     Some(125),
//!     TimeFieldArgs::default(),
//!     CallbackWith::new(move |seconds| sink.with_mut(|e| e.push(seconds))),
//! );
//!
//! field.focus_at(Some(6));
//! field.handle_key(&KeyEvent::character('9'));
//! field.handle_key(&KeyEvent::character('9'));
//!
//! assert_eq!(emitted.get(), vec![219]);
//! assert_eq!(field.display_text(), "00:03:39");
//! ```

pub mod commit;
pub mod entry;
pub mod segment;
pub mod step;
pub mod variant;

use std::{marker::PhantomData, ops::Range};

use derive_setters::Setters;
use stagetime_ui::{Callback, CallbackWith, Control, EventFlow, Focus, Key, KeyEvent, NamedKey};
use tracing::{debug, trace};

pub use self::{
    commit::RawTime,
    entry::{EntryStep, HourConvention, PendingDigit},
    segment::{MaskLayout, Segment, SegmentLayout, SegmentSpec, StepPolicy},
    variant::{CountdownVariant, FieldVariant, TimerVariant},
};
use self::{
    entry::{complete_buffered, enter_digit},
    step::{split_carry, step_meridiem, step_snapped, step_value},
};
use crate::{
    time_list::{OptionValue, TimeListState, TimeOption, segment_options},
    time_model::Meridiem,
};

/// Editor for the clock time a countdown runs to (`"07:30 PM"`).
pub type CountdownField = TimeField<CountdownVariant>;

/// Editor for an elapsed duration in seconds.
pub type TimerField = TimeField<TimerVariant>;

/// Configuration options for a [`TimeField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Setters)]
pub struct TimeFieldArgs {
    /// Snap committed minutes (and timer seconds) to the allowed lists
    /// instead of accepting them verbatim.
    pub snap_minutes: bool,
    /// Whether the list picker renders detached from the field. Only the
    /// rendering layer reads this.
    pub portal: bool,
}

/// What a segment currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentText {
    /// Nothing entered yet.
    Empty,
    /// A buffered first digit.
    Provisional(u8),
    /// A committed number.
    Number(i64),
    /// A committed AM/PM.
    Meridiem(Meridiem),
}

impl SegmentText {
    /// Text rendered for `segment` in the mask.
    pub fn render(&self, segment: Segment) -> String {
        match self {
            SegmentText::Empty => segment.placeholder().to_string(),
            SegmentText::Provisional(digit) => format!("{digit:02}"),
            SegmentText::Number(value) => format!("{value:02}"),
            SegmentText::Meridiem(meridiem) => meridiem.to_string(),
        }
    }
}

/// Segmented time editor, generic over its [`FieldVariant`].
///
/// Called directly, `on_change` runs before the editing call returns.
/// Driven through [`Control`], committed values are queued and handed to
/// the host by [`Control::take_notifications`], so a host that keeps the
/// editor in a [`State`](stagetime_ui::State) can write the value back from
/// inside `on_change`.
pub struct TimeField<V: FieldVariant> {
    focus: Focus,
    args: TimeFieldArgs,
    on_change: CallbackWith<V::Value>,
    values: Option<RawTime>,
    pending: Option<PendingDigit>,
    active: Option<Segment>,
    selection: Option<Range<usize>>,
    pending_selection_frame: Option<Segment>,
    list: TimeListState,
    focused: bool,
    changes: Vec<V::Value>,
    holding_changes: bool,
    _variant: PhantomData<V>,
}

impl<V: FieldVariant> TimeField<V> {
    /// Creates an editor showing `value` (all segments empty for `None`).
    pub fn new(
        value: Option<V::Value>,
        args: TimeFieldArgs,
        on_change: CallbackWith<V::Value>,
    ) -> Self {
        let mut field = Self {
            focus: Focus::new(),
            args,
            on_change,
            values: None,
            pending: None,
            active: None,
            selection: None,
            pending_selection_frame: None,
            list: TimeListState::default(),
            focused: false,
            changes: Vec::new(),
            holding_changes: false,
            _variant: PhantomData,
        };
        field.set_value(value);
        field
    }

    /// Replaces the edited value from outside.
    ///
    /// The external value always wins: it is re-parsed and any buffered
    /// digit is dropped. Malformed values leave every segment empty.
    pub fn set_value(&mut self, value: Option<V::Value>) {
        self.values = value.as_ref().and_then(V::parse);
        self.pending = None;
        if let Some(segment) = self.active {
            self.pending_selection_frame = Some(segment);
        }
    }

    /// Serialized form of the current segments, without emitting it.
    pub fn value(&self) -> Option<V::Value> {
        self.values.as_ref().map(V::serialize)
    }

    /// Current configuration.
    pub fn args(&self) -> TimeFieldArgs {
        self.args
    }

    /// Segments of this editor in editing order.
    pub fn layout(&self) -> SegmentLayout {
        V::LAYOUT
    }

    /// The segment Up/Down operate on, once the user has entered one.
    pub fn active_segment(&self) -> Option<Segment> {
        self.active
    }

    /// The buffered first digit, if any.
    pub fn pending_digit(&self) -> Option<PendingDigit> {
        self.pending
    }

    /// Selected character range of the masked text.
    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    /// Returns true while a selection waits for the next frame.
    pub fn has_pending_selection_frame(&self) -> bool {
        self.pending_selection_frame.is_some()
    }

    /// Returns true while the editor has keyboard focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// List picker state.
    pub fn list(&self) -> TimeListState {
        self.list
    }

    /// What `segment` currently shows.
    pub fn segment_text(&self, segment: Segment) -> SegmentText {
        if let Some(pending) = self.pending {
            if pending.segment == segment {
                return SegmentText::Provisional(pending.digit);
            }
        }
        match (self.values, segment) {
            (None, _) => SegmentText::Empty,
            (Some(values), Segment::Meridiem) => SegmentText::Meridiem(values.meridiem),
            (Some(values), segment) => SegmentText::Number(values.get(segment)),
        }
    }

    /// The masked text, e.g. `"06:30 PM"`, `"00:02:05"` or `"hh:mm aa"`.
    pub fn display_text(&self) -> String {
        let mut text = String::new();
        for (idx, spec) in V::LAYOUT.specs().iter().enumerate() {
            text.push_str(V::LAYOUT.separator_before(idx));
            text.push_str(&self.segment_text(spec.segment).render(spec.segment));
        }
        text
    }

    /// Character ranges of the segments in the current text.
    pub fn mask_layout(&self) -> MaskLayout {
        let widths: Vec<usize> = V::LAYOUT
            .segments()
            .map(|segment| self.segment_text(segment).render(segment).len())
            .collect();
        MaskLayout::new(&V::LAYOUT, &widths)
    }

    /// Segment under caret position `caret`.
    pub fn segment_at_caret(&self, caret: usize) -> Segment {
        self.mask_layout().segment_at_caret(caret)
    }

    /// Makes `segment` active and schedules its selection for the next
    /// frame. A digit buffered in another segment is dropped.
    pub fn select_segment(&mut self, segment: Segment) {
        if !V::LAYOUT.contains(segment) {
            return;
        }
        if self.pending.is_some_and(|pending| pending.segment != segment) {
            self.pending = None;
        }
        if self.active != Some(segment) {
            debug!(?segment, "select segment");
        }
        self.active = Some(segment);
        self.pending_selection_frame = Some(segment);
    }

    /// Gives the editor focus, entering the segment under `caret` if given.
    pub fn focus_at(&mut self, caret: Option<usize>) {
        self.focused = true;
        if let Some(caret) = caret {
            let segment = self.segment_at_caret(caret);
            self.select_segment(segment);
        }
    }

    /// Focus left the editor: a buffered digit is committed on its own.
    pub fn blur(&mut self) {
        self.commit_pending();
        self.focused = false;
        self.list.close();
        self.selection = None;
        self.pending_selection_frame = None;
    }

    /// Applies a selection scheduled by a segment change. Called once the
    /// host has painted the new text.
    pub fn apply_pending_selection(&mut self) {
        if let Some(segment) = self.pending_selection_frame.take() {
            self.selection = self.mask_layout().range_of(segment);
        }
    }

    fn apply_selection_now(&mut self, segment: Segment) {
        self.pending_selection_frame = None;
        self.selection = self.mask_layout().range_of(segment);
    }

    /// Handles one keyboard event.
    ///
    /// `Tab` and modified characters propagate to the host; every other
    /// key is consumed, even when it changes nothing.
    pub fn handle_key(&mut self, event: &KeyEvent) -> EventFlow {
        if !event.is_pressed() {
            return EventFlow::Propagate;
        }
        // The previous frame's selection lands before this key is read.
        self.apply_pending_selection();
        trace!(key = ?event.logical_key, active = ?self.active, "time field key");

        match event.logical_key {
            Key::Named(NamedKey::Tab) => return EventFlow::Propagate,
            Key::Named(NamedKey::ArrowLeft) => self.move_segment(false),
            Key::Named(NamedKey::ArrowRight) => self.move_segment(true),
            Key::Named(NamedKey::ArrowUp) => {
                if self.list.is_open() {
                    let len = self.list_options().len();
                    self.list.move_highlight(-1, len);
                } else {
                    self.step(1);
                }
            }
            Key::Named(NamedKey::ArrowDown) => {
                if self.list.is_open() {
                    let len = self.list_options().len();
                    self.list.move_highlight(1, len);
                } else {
                    self.step(-1);
                }
            }
            Key::Named(NamedKey::Enter) => {
                if self.list.is_open() {
                    self.select_highlighted();
                } else {
                    self.commit_pending();
                }
            }
            Key::Named(NamedKey::Escape) => {
                self.pending = None;
                self.list.close();
            }
            Key::Named(NamedKey::Backspace) => self.pending = None,
            Key::Character(_) if event.modifiers.control || event.modifiers.alt => {
                return EventFlow::Propagate;
            }
            Key::Character(ch) => match ch.to_digit(10) {
                Some(digit) => self.type_digit(digit as u8),
                None => {
                    self.type_meridiem(ch);
                }
            },
        }
        EventFlow::Consumed
    }

    fn move_segment(&mut self, forward: bool) {
        let target = match self.active {
            None => V::LAYOUT.first(),
            Some(current) if forward => V::LAYOUT.next_segment(current),
            Some(current) => V::LAYOUT.previous_segment(current),
        };
        self.select_segment(target);
    }

    /// Types a digit into the active segment (the first one if none is
    /// active yet).
    pub fn type_digit(&mut self, digit: u8) {
        let segment = match self.active {
            Some(segment) => segment,
            None => {
                let first = V::LAYOUT.first();
                self.select_segment(first);
                first
            }
        };
        let buffered = self
            .pending
            .filter(|pending| pending.segment == segment)
            .map(|pending| pending.digit);

        match enter_digit(segment, V::HOUR_CONVENTION, buffered, digit) {
            EntryStep::Buffer(digit) => {
                trace!(?segment, digit, "buffer digit");
                self.pending = Some(PendingDigit { segment, digit });
                self.pending_selection_frame = Some(segment);
            }
            EntryStep::Commit(value) => {
                self.pending = None;
                self.commit_segment(segment, value);
                self.advance_from(segment);
            }
            EntryStep::CommitThenReprocess { value, digit } => {
                self.pending = None;
                self.commit_segment(segment, value);
                if self.advance_from(segment) != segment {
                    self.type_digit(digit);
                }
            }
            EntryStep::Ignore => {}
        }
    }

    /// Types `a`/`p` into the AM/PM segment. Returns true when it committed.
    pub fn type_meridiem(&mut self, ch: char) -> bool {
        if self.active != Some(Segment::Meridiem) {
            return false;
        }
        let Some(meridiem) = Meridiem::from_key(ch) else {
            return false;
        };
        self.pending = None;
        let mut raw = self.current_raw();
        raw.meridiem = meridiem;
        self.commit(raw);
        self.select_segment(Segment::Meridiem);
        true
    }

    /// Steps the active segment by `delta`.
    ///
    /// With no active segment, a downward step opens the list picker and an
    /// upward step enters the first segment. The selection is applied
    /// immediately so repeated presses never flicker to another segment.
    pub fn step(&mut self, delta: i64) {
        self.pending = None;
        let segment = match self.active {
            Some(segment) => segment,
            None if delta < 0 => {
                self.open_list();
                return;
            }
            None => V::LAYOUT.first(),
        };
        let mut raw = self.current_raw();
        self.step_segment(&mut raw, segment, delta);

        self.active = Some(segment);
        self.commit(raw);
        self.apply_selection_now(segment);
    }

    /// Applies one step to `segment` of `raw`. Returns false when the
    /// segment could not move; `raw` is then left untouched.
    fn step_segment(&self, raw: &mut RawTime, segment: Segment, delta: i64) -> bool {
        let Some(spec) = V::LAYOUT.spec(segment) else {
            return false;
        };
        let current = raw.get(segment);
        let allowed = V::snap_list(segment).filter(|_| self.args.snap_minutes);

        match (spec.policy, allowed) {
            (StepPolicy::Toggle, _) => {
                raw.meridiem = step_meridiem(raw.meridiem, delta);
                delta != 0
            }
            (StepPolicy::Carry, Some(allowed)) => {
                let (kept, carry) = split_carry(step_snapped(spec.policy, current, delta, allowed));
                if carry == 0 {
                    raw.set(segment, kept);
                    return kept != current;
                }
                // Past the end of its list the segment wraps and the
                // next-higher segment takes its own snapped step.
                let higher = V::LAYOUT.previous_segment(segment);
                let mut rolled = *raw;
                rolled.set(segment, kept);
                if higher != segment && self.step_segment(&mut rolled, higher, carry) {
                    *raw = rolled;
                    true
                } else {
                    false
                }
            }
            (policy, Some(allowed)) => {
                let next = step_snapped(policy, current, delta, allowed);
                raw.set(segment, next);
                next != current
            }
            (policy, None) => {
                let next = step_value(policy, current, delta);
                raw.set(segment, next);
                next != current
            }
        }
    }

    /// Commits a buffered digit as a complete value.
    pub fn commit_pending(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        if let Some(value) = complete_buffered(pending.segment, V::HOUR_CONVENTION, pending.digit)
        {
            self.commit_segment(pending.segment, value);
        }
        if let Some(segment) = self.active {
            self.pending_selection_frame = Some(segment);
        }
    }

    /// Opens the list picker for the active (or first) segment.
    pub fn open_list(&mut self) {
        let options = self.list_options();
        let current = self.current_option_index(&options).unwrap_or(0);
        debug!(segment = ?self.list_segment(), "open time list");
        self.list.open(current);
    }

    /// Closes the list picker.
    pub fn close_list(&mut self) {
        self.list.close();
    }

    /// Segment the list picker offers values for.
    pub fn list_segment(&self) -> Segment {
        self.active.unwrap_or_else(|| V::LAYOUT.first())
    }

    /// Options of the list picker.
    pub fn list_options(&self) -> Vec<TimeOption> {
        let segment = self.list_segment();
        let allowed = V::snap_list(segment).filter(|_| self.args.snap_minutes);
        segment_options(segment, V::HOUR_CONVENTION, allowed)
    }

    /// Commits a value picked from the list and enters its segment.
    pub fn select_option(&mut self, option: &TimeOption) {
        if !V::LAYOUT.contains(option.segment) {
            return;
        }
        self.pending = None;
        let mut raw = self.current_raw();
        match option.value {
            OptionValue::Number(value) => raw.set(option.segment, i64::from(value)),
            OptionValue::Meridiem(meridiem) => raw.meridiem = meridiem,
        }
        self.list.close();
        self.commit(raw);
        self.select_segment(option.segment);
    }

    fn select_highlighted(&mut self) {
        let options = self.list_options();
        if let Some(option) = options.get(self.list.highlighted()) {
            self.select_option(option);
        } else {
            self.list.close();
        }
    }

    fn current_option_index(&self, options: &[TimeOption]) -> Option<usize> {
        let values = self.values?;
        let segment = self.list_segment();
        options.iter().position(|option| match option.value {
            OptionValue::Number(value) => i64::from(value) == values.get(segment),
            OptionValue::Meridiem(meridiem) => meridiem == values.meridiem,
        })
    }

    fn advance_from(&mut self, segment: Segment) -> Segment {
        let next = V::LAYOUT.next_segment(segment);
        self.select_segment(next);
        next
    }

    fn current_raw(&self) -> RawTime {
        self.values.unwrap_or_else(V::defaults)
    }

    fn commit_segment(&mut self, segment: Segment, value: u32) {
        let mut raw = self.current_raw();
        raw.set(segment, i64::from(value));
        self.commit(raw);
    }

    /// The only place a value leaves the editor.
    #[tracing::instrument(level = "debug", skip(self))]
    fn commit(&mut self, raw: RawTime) {
        let resolved = V::resolve(raw, self.args.snap_minutes);
        let value = V::serialize(&resolved);
        self.values = Some(resolved);
        debug!(?value, "commit time value");
        self.changes.push(value);
        self.deliver_changes();
    }

    fn deliver_changes(&mut self) {
        if self.holding_changes {
            return;
        }
        for value in std::mem::take(&mut self.changes) {
            self.on_change.call(value);
        }
    }

    /// Runs `f` with change notifications queued instead of delivered.
    fn with_changes_held<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.holding_changes = true;
        let result = f(self);
        self.holding_changes = false;
        result
    }
}

impl<V: FieldVariant> Control for TimeField<V> {
    fn focus_handle(&self) -> Focus {
        self.focus
    }

    fn on_focus(&mut self, caret: Option<usize>) {
        self.with_changes_held(|field| field.focus_at(caret));
    }

    fn on_blur(&mut self) {
        self.with_changes_held(Self::blur);
    }

    fn on_key(&mut self, event: &KeyEvent) -> EventFlow {
        self.with_changes_held(|field| field.handle_key(event))
    }

    fn on_frame(&mut self) {
        self.apply_pending_selection();
    }

    fn display_text(&self) -> String {
        TimeField::display_text(self)
    }

    fn take_notifications(&mut self) -> Vec<Callback> {
        let on_change = self.on_change.clone();
        self.changes
            .drain(..)
            .map(|value| {
                let on_change = on_change.clone();
                Callback::new(move || on_change.call(value.clone()))
            })
            .collect()
    }
}
