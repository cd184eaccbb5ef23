#![forbid(unsafe_code)]

//! Drag-to-seek affordance along the trailing edge of the grid.
//!
//! The area draws a thin line indicator plus a floating tag label. Both
//! travel along the same fraction of their tracks. Dragging the area maps
//! the label track onto the whole scrollable height:
//!
//! ```text
//! offset = initial + translation.y * scrollable / (label_max_y - label_min_y)
//! ```
//!
//! clamped to `[0, max_offset]`. The area holds no reference to the
//! viewport it drives; it reports [`FastScrollAction`]s and the engine
//! applies them to whichever viewport currently owns the area.

use std::fmt;
use std::time::Duration;

use sparsegrid_core::animation::{Animation, Slide};
use sparsegrid_core::geometry::{Insets, Point, Rect, Size};
use sparsegrid_core::gesture::{DragEvent, DragTracker, TouchEvent};
use sparsegrid_core::timer::Countdown;
use unicode_width::UnicodeWidthStr;

use crate::binding::{HapticFeedback, NoHaptics};
use crate::config::FastScrollConfig;
use crate::viewport::FastScrollInput;

/// Alpha below this counts as invisible for hit testing.
const VISIBLE_ALPHA: f64 = 0.01;

// ---------------------------------------------------------------------------
// Tooltip
// ---------------------------------------------------------------------------

/// A one-time contextual hint shown next to the indicator.
pub struct DisplayTooltip {
    pub text: String,
    /// Name of an animation asset the host may play with the text.
    pub animation: Option<String>,
    /// Runs once, the first time the tooltip is shown.
    pub on_displayed: Option<Box<dyn FnOnce()>>,
}

impl DisplayTooltip {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            animation: None,
            on_displayed: None,
        }
    }

    #[must_use]
    pub fn with_animation(mut self, name: impl Into<String>) -> Self {
        self.animation = Some(name.into());
        self
    }

    #[must_use]
    pub fn on_displayed(mut self, hook: impl FnOnce() + 'static) -> Self {
        self.on_displayed = Some(Box::new(hook));
        self
    }
}

impl fmt::Debug for DisplayTooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayTooltip")
            .field("text", &self.text)
            .field("animation", &self.animation)
            .field("on_displayed", &self.on_displayed.is_some())
            .finish()
    }
}

#[derive(Debug)]
enum TooltipState {
    None,
    Pending(DisplayTooltip),
    Shown(DisplayTooltip),
    Dismissed,
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// What the engine must do in response to a fast-scroll touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FastScrollAction {
    /// A drag started. Notify `on_begin_fast_scroll`.
    Began,
    /// Move the owning viewport to this offset.
    SetContentOffset(f64),
    /// The drag ended before the dwell delay. Notify `on_tag_area_tap`.
    TagAreaTap,
    Ended,
    Cancelled,
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct FadingAlpha {
    value: f64,
    animation: Option<Slide>,
}

impl FadingAlpha {
    fn new(value: f64) -> Self {
        Self {
            value,
            animation: None,
        }
    }

    fn target(&self) -> f64 {
        self.animation.map_or(self.value, |a| a.to())
    }

    fn fade_to(&mut self, target: f64, duration: Duration) {
        if self.target() == target {
            return;
        }
        self.animation = Some(Slide::new(self.value, target, duration));
    }

    fn tick(&mut self, dt: Duration) {
        if let Some(animation) = self.animation.as_mut() {
            animation.tick(dt);
            self.value = animation.position();
            if animation.is_complete() {
                self.animation = None;
            }
        }
    }
}

/// Label track the drag ratio is derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Projection {
    min_y: f64,
    max_y: f64,
    scrollable_height: f64,
}

impl Projection {
    fn offset_for(&self, initial: f64, translation: f64, max_offset: f64) -> f64 {
        let span = self.max_y - self.min_y;
        let delta = if span > 0.0 {
            self.scrollable_height * translation / span
        } else {
            0.0
        };
        (initial + delta).clamp(0.0, max_offset.max(0.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    initial_offset: f64,
    began_at_label: bool,
    expanded: bool,
}

// ---------------------------------------------------------------------------
// FastScrollArea
// ---------------------------------------------------------------------------

pub struct FastScrollArea {
    config: FastScrollConfig,
    haptics: Box<dyn HapticFeedback>,
    tracker: DragTracker,
    dwell: Countdown,
    activity: Countdown,
    alpha: FadingAlpha,
    fits_content: bool,
    forced_hidden: bool,
    container_size: Size,
    insets: Insets,
    position_fraction: f64,
    indicator_height: f64,
    content_offset: f64,
    max_offset: f64,
    projection: Option<Projection>,
    session: Option<DragSession>,
    tag: Option<i32>,
    label: Option<String>,
    label_offset_x: f64,
    tooltip: TooltipState,
}

impl fmt::Debug for FastScrollArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FastScrollArea")
            .field("tag", &self.tag)
            .field("label", &self.label)
            .field("alpha", &self.alpha.value)
            .field("hidden", &self.is_hidden())
            .field("dragging", &self.is_dragging())
            .field("tooltip", &self.tooltip)
            .finish()
    }
}

impl Default for FastScrollArea {
    fn default() -> Self {
        Self::new(FastScrollConfig::default())
    }
}

impl FastScrollArea {
    pub fn new(config: FastScrollConfig) -> Self {
        Self {
            dwell: Countdown::new(config.dwell_delay),
            activity: Countdown::new(config.auto_hide_delay),
            config,
            haptics: Box::new(NoHaptics),
            tracker: DragTracker::new(),
            alpha: FadingAlpha::new(0.0),
            fits_content: true,
            forced_hidden: false,
            container_size: Size::ZERO,
            insets: Insets::default(),
            position_fraction: 0.0,
            indicator_height: 0.0,
            content_offset: 0.0,
            max_offset: 0.0,
            projection: None,
            session: None,
            tag: None,
            label: None,
            label_offset_x: 0.0,
            tooltip: TooltipState::None,
        }
    }

    #[must_use]
    pub fn with_haptics(mut self, haptics: Box<dyn HapticFeedback>) -> Self {
        self.haptics = haptics;
        self
    }

    pub fn set_haptics(&mut self, haptics: Box<dyn HapticFeedback>) {
        self.haptics = haptics;
    }

    // --- state ------------------------------------------------------------

    pub fn is_hidden(&self) -> bool {
        self.fits_content || self.forced_hidden
    }

    /// Force the area hidden regardless of content size.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.forced_hidden = hidden;
        if hidden {
            self.cancel_drag();
        }
    }

    /// Drop an in-progress drag without a tap. `true` when one was live.
    pub fn cancel_drag(&mut self) -> bool {
        if !self.tracker.is_dragging() && self.session.is_none() {
            return false;
        }
        self.tracker.reset();
        self.end_session();
        sparsegrid_core::debug!("fast scroll drag interrupted");
        true
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Overall opacity of the line and label.
    pub fn alpha(&self) -> f64 {
        self.alpha.value
    }

    pub fn tag(&self) -> Option<i32> {
        self.tag
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Horizontal nudge of the label while dragging. Zero at rest.
    pub fn label_offset_x(&self) -> f64 {
        self.label_offset_x
    }

    pub fn is_label_expanded(&self) -> bool {
        self.session.is_some_and(|s| s.expanded)
    }

    /// Tooltip currently on screen, if any.
    pub fn visible_tooltip(&self) -> Option<&DisplayTooltip> {
        match &self.tooltip {
            TooltipState::Shown(tooltip) => Some(tooltip),
            _ => None,
        }
    }

    /// Install the first-time tooltip. Ignored once one has been shown.
    pub fn set_tooltip(&mut self, tooltip: DisplayTooltip) {
        if matches!(self.tooltip, TooltipState::None | TooltipState::Pending(_)) {
            self.tooltip = TooltipState::Pending(tooltip);
        }
    }

    // --- geometry ---------------------------------------------------------

    fn label_width(&self) -> f64 {
        let chars = self.label.as_deref().map_or(0, UnicodeWidthStr::width);
        chars as f64 * self.config.label_glyph_advance + self.config.label_padding
    }

    fn label_track(&self) -> (f64, f64) {
        let min_y = self.config.indicator_vertical_inset + self.insets.top;
        let max_y = self.container_size.height
            - self.config.indicator_vertical_inset
            - self.insets.bottom
            - self.config.label_height;
        (min_y, max_y.max(min_y))
    }

    /// Label rectangle in container coordinates, including the drag nudge.
    pub fn label_frame(&self) -> Rect {
        let (min_y, max_y) = self.label_track();
        let width = self.label_width();
        Rect::new(
            self.container_size.width - self.config.label_trailing_inset - width
                + self.label_offset_x,
            min_y + (max_y - min_y) * self.position_fraction,
            width,
            self.config.label_height,
        )
    }

    /// Line indicator rectangle in container coordinates.
    pub fn line_frame(&self) -> Rect {
        let width = if self.is_dragging() {
            self.config.line_width_dragging
        } else {
            self.config.line_width
        };
        let min_y = self.insets.top + self.config.indicator_vertical_inset;
        let max_y = (self.container_size.height
            - self.insets.bottom
            - self.config.indicator_vertical_inset
            - self.indicator_height)
            .max(min_y);
        Rect::new(
            self.container_size.width - self.config.line_trailing_inset - width,
            min_y + (max_y - min_y) * self.position_fraction,
            width,
            self.indicator_height,
        )
    }

    pub fn indicator_height(&self) -> f64 {
        self.indicator_height
    }

    /// The label takes touches only once it has faded in.
    fn label_accepts(&self, point: Point) -> bool {
        self.alpha.value > VISIBLE_ALPHA && self.label.is_some() && self.label_frame().contains(point)
    }

    /// Whether a touch at `point` should start a fast-scroll drag.
    pub fn hit_test(&self, point: Point) -> bool {
        if self.is_hidden() {
            return false;
        }
        if self.label_accepts(point) {
            return true;
        }
        let (dx, dy) = self.config.line_hit_slop;
        self.line_frame().inset_by(-dx, -dy).contains(point)
    }

    // --- updates ----------------------------------------------------------

    /// Re-derive geometry from the owning viewport's latest pass.
    pub fn update(&mut self, input: &FastScrollInput, label: Option<String>) {
        self.container_size = input.container_size;
        self.insets = input.insets;
        self.content_offset = input.content_offset;
        self.max_offset = input.max_offset;

        let height = input.container_size.height;
        let track = (height - input.insets.top - input.insets.bottom).max(0.0);
        let fraction = if input.content_height > 0.0 {
            (track / input.content_height).clamp(0.0, 1.0)
        } else {
            1.0
        };
        // Degenerate geometry has nothing to scroll through.
        self.fits_content = track <= 0.0 || fraction >= 1.0;
        self.indicator_height = (fraction * track).ceil().max(self.config.min_indicator_height);

        let scrollable = input.content_height - height;
        self.position_fraction = if scrollable > 0.0 {
            (input.content_offset / scrollable).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let (min_y, max_y) = self.label_track();
        self.projection = Some(Projection {
            min_y,
            max_y,
            scrollable_height: scrollable.max(0.0),
        });

        if input.tag != self.tag {
            if self.is_dragging() {
                self.haptics.tap();
            }
            self.tag = input.tag;
        }
        self.label = label;

        if input.is_scrolling && !self.is_hidden() {
            self.alpha.fade_to(1.0, self.config.fade_duration);
            if !self.is_dragging() {
                self.activity.start();
            }
            self.show_tooltip_once();
        }
    }

    fn show_tooltip_once(&mut self) {
        self.tooltip = match std::mem::replace(&mut self.tooltip, TooltipState::Dismissed) {
            TooltipState::Pending(mut tooltip) => {
                if let Some(hook) = tooltip.on_displayed.take() {
                    hook();
                }
                sparsegrid_core::debug!(text = %tooltip.text, "fast scroll tooltip shown");
                TooltipState::Shown(tooltip)
            }
            other => other,
        };
    }

    fn expand(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.expanded {
            return;
        }
        session.expanded = true;
        self.label_offset_x = if session.began_at_label {
            self.config.label_expanded_offset
        } else {
            self.config.label_nudge
        };
        self.dwell.cancel();
        self.haptics.impact();
    }

    fn end_session(&mut self) {
        self.session = None;
        self.dwell.cancel();
        self.label_offset_x = 0.0;
        self.activity.start();
    }

    /// Feed a touch sample. `Began` touches outside [`hit_test`] are ignored.
    ///
    /// [`hit_test`]: Self::hit_test
    pub fn handle_touch(&mut self, event: &TouchEvent) -> Option<FastScrollAction> {
        if !self.tracker.is_dragging() && event.touch_count <= 1 && !self.hit_test(event.location) {
            return None;
        }
        match self.tracker.process(event)? {
            DragEvent::Began { location } => {
                let began_at_label = self.label_accepts(location);
                self.session = Some(DragSession {
                    initial_offset: self.content_offset,
                    began_at_label,
                    expanded: false,
                });
                self.dwell.start();
                self.activity.cancel();
                self.alpha.fade_to(1.0, self.config.fade_duration);
                sparsegrid_core::debug!(began_at_label, "fast scroll began");
                Some(FastScrollAction::Began)
            }
            DragEvent::Moved { translation, .. } => {
                self.expand();
                let session = self.session?;
                let projection = self.projection?;
                let offset =
                    projection.offset_for(session.initial_offset, translation.y, self.max_offset);
                Some(FastScrollAction::SetContentOffset(offset))
            }
            DragEvent::Ended { .. } => {
                let tapped = self.session.is_some_and(|s| !s.expanded) && self.dwell.is_running();
                self.end_session();
                sparsegrid_core::debug!(tapped, "fast scroll ended");
                Some(if tapped {
                    FastScrollAction::TagAreaTap
                } else {
                    FastScrollAction::Ended
                })
            }
            DragEvent::Cancelled => {
                self.end_session();
                sparsegrid_core::debug!("fast scroll cancelled");
                Some(FastScrollAction::Cancelled)
            }
        }
    }

    /// Advance the dwell, auto-hide and fade timers.
    pub fn tick(&mut self, dt: Duration) {
        if self.dwell.tick(dt) {
            self.expand();
        }
        if self.activity.tick(dt) {
            self.alpha.fade_to(0.0, self.config.fade_duration);
            if matches!(self.tooltip, TooltipState::Shown(_)) {
                self.tooltip = TooltipState::Dismissed;
            }
        }
        self.alpha.tick(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparsegrid_core::gesture::GesturePhase;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Haptics {
        taps: Rc<Cell<usize>>,
        impacts: Rc<Cell<usize>>,
    }

    impl HapticFeedback for Haptics {
        fn tap(&mut self) {
            self.taps.set(self.taps.get() + 1);
        }
        fn impact(&mut self) {
            self.impacts.set(self.impacts.get() + 1);
        }
    }

    fn input(offset: f64, tag: Option<i32>, scrolling: bool) -> FastScrollInput {
        FastScrollInput {
            container_size: Size::new(400.0, 800.0),
            insets: Insets::default(),
            content_height: 10_000.0,
            content_offset: offset,
            max_offset: 9_200.0,
            is_scrolling: scrolling,
            tag,
        }
    }

    fn area() -> (FastScrollArea, Haptics) {
        let haptics = Haptics::default();
        let area = FastScrollArea::default().with_haptics(Box::new(haptics.clone()));
        (area, haptics)
    }

    fn touch(phase: GesturePhase, x: f64, y: f64) -> TouchEvent {
        TouchEvent::new(phase, Point::new(x, y))
    }

    #[test]
    fn indicator_height_has_minimum() {
        let (mut area, _) = area();
        area.update(&input(0.0, Some(1), false), Some("Jan".into()));
        // 800 / 10000 * 800 = 64
        assert_eq!(area.indicator_height(), 64.0);
        let mut tall = input(0.0, None, false);
        tall.content_height = 100_000.0;
        area.update(&tall, None);
        assert_eq!(area.indicator_height(), 35.0);
    }

    #[test]
    fn hidden_when_content_fits() {
        let (mut area, _) = area();
        let mut short = input(0.0, None, true);
        short.content_height = 700.0;
        area.update(&short, None);
        assert!(area.is_hidden());
        assert!(!area.hit_test(Point::new(398.0, 10.0)));
    }

    #[test]
    fn zero_sized_container_is_hidden() {
        let (mut area, _) = area();
        let mut empty = input(0.0, Some(1), true);
        empty.container_size = Size::ZERO;
        empty.max_offset = 10_000.0;
        area.update(&empty, Some("Jan".into()));
        assert!(area.is_hidden());
        assert!(!area.hit_test(Point::ZERO));
        assert_eq!(area.handle_touch(&touch(GesturePhase::Began, 0.0, 0.0)), None);
    }

    #[test]
    fn indicator_tracks_offset_fraction() {
        let (mut area, _) = area();
        area.update(&input(4_600.0, Some(1), false), Some("Jan".into()));
        let label = area.label_frame();
        // Label track is [3, 800 - 3 - 32] = [3, 765]; halfway is 384.
        assert_eq!(label.min_y(), 384.0);
        // "Jan" is three columns: 3 * 7 + 26 = 47 wide, 12 from the edge.
        assert_eq!(label.width, 47.0);
        assert_eq!(label.min_x(), 400.0 - 12.0 - 47.0);
        assert_eq!(area.line_frame().min_x(), 394.0);
    }

    #[test]
    fn drag_maps_label_track_to_content() {
        let (mut area, _) = area();
        area.update(&input(0.0, Some(1), false), None);
        assert_eq!(area.handle_touch(&touch(GesturePhase::Began, 396.0, 40.0)), Some(FastScrollAction::Began));
        // Half of the 762pt label track.
        let action = area.handle_touch(&touch(GesturePhase::Changed, 396.0, 40.0 + 381.0));
        assert_eq!(action, Some(FastScrollAction::SetContentOffset(0.5 * (10_000.0 - 800.0))));
        let action = area.handle_touch(&touch(GesturePhase::Changed, 396.0, 40.0 + 5_000.0));
        assert_eq!(action, Some(FastScrollAction::SetContentOffset(9_200.0)));
        let action = area.handle_touch(&touch(GesturePhase::Changed, 396.0, -5_000.0));
        assert_eq!(action, Some(FastScrollAction::SetContentOffset(0.0)));
    }

    #[test]
    fn touch_outside_area_is_ignored() {
        let (mut area, _) = area();
        area.update(&input(0.0, Some(1), false), None);
        assert_eq!(area.handle_touch(&touch(GesturePhase::Began, 100.0, 40.0)), None);
        assert!(!area.is_dragging());
    }

    #[test]
    fn quick_release_is_tag_area_tap() {
        let (mut area, haptics) = area();
        area.update(&input(0.0, Some(1), false), None);
        area.handle_touch(&touch(GesturePhase::Began, 396.0, 40.0));
        area.tick(Duration::from_millis(50));
        let action = area.handle_touch(&touch(GesturePhase::Ended, 396.0, 40.0));
        assert_eq!(action, Some(FastScrollAction::TagAreaTap));
        assert_eq!(haptics.impacts.get(), 0);
    }

    #[test]
    fn dwell_expands_label_with_impact() {
        let (mut area, haptics) = area();
        // The label only takes touches once it has faded in.
        area.update(&input(0.0, Some(1), true), Some("Jan".into()));
        area.tick(Duration::from_millis(400));
        let label = area.label_frame();
        area.handle_touch(&touch(GesturePhase::Began, label.mid_x(), label.mid_y()));
        area.tick(Duration::from_millis(250));
        assert!(area.is_label_expanded());
        assert_eq!(area.label_offset_x(), -80.0);
        assert_eq!(haptics.impacts.get(), 1);
        let action = area.handle_touch(&touch(GesturePhase::Ended, label.mid_x(), label.mid_y()));
        assert_eq!(action, Some(FastScrollAction::Ended));
        assert_eq!(area.label_offset_x(), 0.0);
    }

    #[test]
    fn line_touch_under_faded_label_only_nudges() {
        let mut config = FastScrollConfig::default();
        config.line_hit_slop = (12.0, 2.0);
        let mut area = FastScrollArea::new(config);
        area.update(&input(0.0, Some(1), false), Some("Jan".into()));
        assert_eq!(area.alpha(), 0.0);
        // Inside both the label frame (341..388) and the widened line slop.
        let point = Point::new(385.0, 20.0);
        assert!(area.label_frame().contains(point));
        area.handle_touch(&touch(GesturePhase::Began, point.x, point.y));
        area.handle_touch(&touch(GesturePhase::Changed, point.x, point.y + 1.0));
        assert_eq!(area.label_offset_x(), -3.0);
    }

    #[test]
    fn first_move_nudges_line_drag() {
        let (mut area, haptics) = area();
        area.update(&input(0.0, Some(1), false), None);
        area.handle_touch(&touch(GesturePhase::Began, 396.0, 40.0));
        area.handle_touch(&touch(GesturePhase::Changed, 396.0, 41.0));
        assert_eq!(area.label_offset_x(), -3.0);
        assert_eq!(area.line_frame().width, 6.0);
        assert_eq!(haptics.impacts.get(), 1);
    }

    #[test]
    fn tag_change_taps_only_while_dragging() {
        let (mut area, haptics) = area();
        area.update(&input(0.0, Some(1), false), None);
        area.update(&input(10.0, Some(2), false), None);
        assert_eq!(haptics.taps.get(), 0);
        area.handle_touch(&touch(GesturePhase::Began, 396.0, 40.0));
        area.update(&input(20.0, Some(3), true), None);
        area.update(&input(30.0, Some(3), true), None);
        assert_eq!(haptics.taps.get(), 1);
    }

    #[test]
    fn second_touch_cancels_without_tap() {
        let (mut area, _) = area();
        area.update(&input(0.0, Some(1), false), None);
        area.handle_touch(&touch(GesturePhase::Began, 396.0, 40.0));
        let action = area.handle_touch(&touch(GesturePhase::Changed, 396.0, 40.0).with_touch_count(2));
        assert_eq!(action, Some(FastScrollAction::Cancelled));
        assert!(!area.is_dragging());
        let action = area.handle_touch(&touch(GesturePhase::Ended, 396.0, 40.0).with_touch_count(2));
        assert_eq!(action, None);
    }

    #[test]
    fn auto_hides_after_inactivity() {
        let (mut area, _) = area();
        area.update(&input(100.0, Some(1), true), None);
        area.tick(Duration::from_millis(400));
        assert_eq!(area.alpha(), 1.0);
        area.tick(Duration::from_millis(1_700));
        area.tick(Duration::from_millis(400));
        assert_eq!(area.alpha(), 0.0);
    }

    #[test]
    fn drag_suspends_auto_hide() {
        let (mut area, _) = area();
        area.update(&input(100.0, Some(1), true), None);
        area.handle_touch(&touch(GesturePhase::Began, 396.0, 40.0));
        area.tick(Duration::from_secs(5));
        assert_eq!(area.alpha(), 1.0);
    }

    #[test]
    fn tooltip_shows_once() {
        let (mut area, _) = area();
        let shown = Rc::new(Cell::new(0));
        let counter = Rc::clone(&shown);
        area.set_tooltip(
            DisplayTooltip::new("Drag to jump")
                .with_animation("swipe-down")
                .on_displayed(move || counter.set(counter.get() + 1)),
        );
        area.update(&input(0.0, Some(1), false), None);
        assert!(area.visible_tooltip().is_none());
        area.update(&input(10.0, Some(1), true), None);
        let tooltip = area.visible_tooltip().unwrap();
        assert_eq!(tooltip.text, "Drag to jump");
        assert_eq!(tooltip.animation.as_deref(), Some("swipe-down"));
        area.tick(Duration::from_secs(3));
        assert!(area.visible_tooltip().is_none());
        area.set_tooltip(DisplayTooltip::new("again"));
        area.update(&input(20.0, Some(1), true), None);
        assert!(area.visible_tooltip().is_none());
        assert_eq!(shown.get(), 1);
    }
}
