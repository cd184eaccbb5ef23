#![forbid(unsafe_code)]

//! Interactive cross-fade between two viewports at different zoom levels.
//!
//! # State machine
//!
//! ```text
//! Idle ──pinch──▶ Interactive ──end──▶ Settling ──done──▶ Idle
//!   │                 │  ▲                ▲
//!   │                 └──┘ retarget       │
//!   └──────── set_zoom_level ─────────────┘
//! ```
//!
//! Both viewports stay alive while a transition runs. Their presentations
//! are scaled and translated around the anchor item so the anchor stays
//! under the fingers at every progress value. Pinching past one zoom step
//! replaces the transition with one that starts at the boundary viewport
//! and targets the next ladder level.

use std::sync::Arc;
use std::time::Duration;

use slotmap::SlotMap;
use sparsegrid_core::animation::{Animation, Slide, ease_in_out};
use sparsegrid_core::geometry::{Point, Transform};
use sparsegrid_core::gesture::{GesturePhase, PinchEvent};
use sparsegrid_layout::{ContainerLayout, ZoomLadder, ZoomLevel};

use crate::binding::GridBinding;
use crate::config::ZoomTransitionConfig;
use crate::sparse_index::Items;
use crate::viewport::{
    Presentation, ScrollRestore, Viewport, ViewportEvents, ViewportId, ViewportSettings,
};

/// Exact at both ends.
fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from * (1.0 - t) + to * t
}

// ---------------------------------------------------------------------------
// Transition
// ---------------------------------------------------------------------------

/// Pinch scales mapped to progress 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRange {
    pub initial: f64,
    pub target: f64,
}

impl ScaleRange {
    /// Unclamped progress of `scale` through the range.
    pub fn progress(&self, scale: f64) -> f64 {
        let span = self.target - self.initial;
        if span == 0.0 {
            0.0
        } else {
            (scale - self.initial) / span
        }
    }

    pub fn is_zoom_in(&self) -> bool {
        self.target > self.initial
    }
}

/// Presentations of both ends of a transition at one progress value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionFrame {
    pub from: Presentation,
    pub to: Presentation,
}

/// One in-flight transition between two live viewports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransition {
    pub from: ViewportId,
    pub to: ViewportId,
    pub anchor_index: usize,
    /// Present for pinch-driven transitions.
    pub interactive: Option<ScaleRange>,
    pub progress: f64,
}

impl ViewportTransition {
    /// Presentations of `from` and `to` at `progress`.
    ///
    /// `None` when either viewport cannot place the anchor.
    pub fn frame_at<B: GridBinding>(
        &self,
        from: &Viewport<B>,
        to: &Viewport<B>,
        progress: f64,
        fade_start: f64,
    ) -> Option<TransitionFrame> {
        let mut from_anchor = from.frame_for_index(self.anchor_index)?;
        let mut to_anchor = to.frame_for_index(self.anchor_index)?;

        // Horizontal anchors follow whichever element sits under the anchor
        // center in each viewport.
        if let Some(frame) = from
            .anchor_item_at(from_anchor.center())
            .and_then(|item| from.frame_for_index(item.index))
        {
            from_anchor.x = frame.mid_x();
            from_anchor.width = 0.0;
        }
        if let Some(frame) = to
            .anchor_item_at(from_anchor.center())
            .and_then(|item| to.frame_for_index(item.index))
        {
            to_anchor.x = frame.mid_x();
            to_anchor.width = 0.0;
        }
        if from_anchor.height <= 0.0 || to_anchor.height <= 0.0 {
            return None;
        }

        let from_point = from_anchor.center();
        let to_point = to_anchor.center();
        let from_scale = lerp(1.0, to_anchor.height / from_anchor.height, progress);
        let to_scale = lerp(from_anchor.height / to_anchor.height, 1.0, progress);
        let delta = Point::new(to_point.x - from_point.x, to_point.y - from_point.y);
        let from_offset = Point::new(delta.x * progress, delta.y * progress);
        let to_offset = Point::new(-delta.x * (1.0 - progress), -delta.y * (1.0 - progress));

        let fade_span = (1.0 - fade_start).max(f64::EPSILON);
        Some(TransitionFrame {
            from: Presentation {
                transform: Transform::scaled_around(from_point, from_offset, from_scale),
                alpha: 1.0 - (progress - fade_start).max(0.0) / fade_span,
            },
            to: Presentation {
                transform: Transform::scaled_around(to_point, to_offset, to_scale),
                alpha: progress,
            },
        })
    }

    /// Move to `progress` and write both presentations. Missing anchors
    /// leave the previous presentations in place.
    pub fn apply<B: GridBinding>(
        &mut self,
        viewports: &mut SlotMap<ViewportId, Viewport<B>>,
        progress: f64,
        fade_start: f64,
    ) {
        self.progress = progress;
        let frame = match (viewports.get(self.from), viewports.get(self.to)) {
            (Some(from), Some(to)) => self.frame_at(from, to, progress, fade_start),
            _ => None,
        };
        let Some(frame) = frame else {
            return;
        };
        if let Some(from) = viewports.get_mut(self.from) {
            from.set_presentation(frame.from);
        }
        if let Some(to) = viewports.get_mut(self.to) {
            to.set_presentation(frame.to);
        }
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub enum ZoomPhase {
    Idle,
    /// A pinch is scrubbing the transition.
    Interactive(ViewportTransition),
    /// Animating toward `target` (0 reverts, 1 commits).
    Settling {
        transition: ViewportTransition,
        animation: Slide,
        target: f64,
    },
}

/// Everything a controller step may touch, borrowed from the engine.
pub struct TransitionContext<'a, B: GridBinding> {
    pub viewports: &'a mut SlotMap<ViewportId, Viewport<B>>,
    pub binding: &'a mut B,
    pub container: ContainerLayout,
    pub items: &'a Arc<Items>,
    pub ladder: &'a ZoomLadder,
    pub settings: ViewportSettings,
    /// Passes run by viewports created during the step, for the engine to
    /// route.
    pub events: Vec<(ViewportId, ViewportEvents)>,
}

impl<B: GridBinding> TransitionContext<'_, B> {
    fn spawn(&mut self, zoom: ZoomLevel, restore: Option<ScrollRestore>) -> ViewportId {
        let mut viewport = Viewport::new(zoom, self.settings);
        let events = viewport.update(self.binding, self.container, self.items, restore);
        let id = self.viewports.insert(viewport);
        self.events.push((id, events));
        id
    }

    fn release(&mut self, id: ViewportId) {
        if let Some(mut viewport) = self.viewports.remove(id) {
            viewport.release(self.binding);
        }
    }

    fn zoom_of(&self, id: ViewportId) -> Option<ZoomLevel> {
        self.viewports.get(id).map(Viewport::zoom)
    }
}

/// Outcome of a finished transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSettled {
    pub winner: ViewportId,
    /// `true` when the destination won.
    pub committed: bool,
    pub transition: ViewportTransition,
}

#[derive(Debug, Clone)]
pub struct ZoomTransitionController {
    config: ZoomTransitionConfig,
    phase: ZoomPhase,
}

impl Default for ZoomTransitionController {
    fn default() -> Self {
        Self::new(ZoomTransitionConfig::default())
    }
}

impl ZoomTransitionController {
    pub fn new(config: ZoomTransitionConfig) -> Self {
        Self {
            config,
            phase: ZoomPhase::Idle,
        }
    }

    pub fn config(&self) -> &ZoomTransitionConfig {
        &self.config
    }

    pub fn phase(&self) -> &ZoomPhase {
        &self.phase
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, ZoomPhase::Idle)
    }

    pub fn transition(&self) -> Option<&ViewportTransition> {
        match &self.phase {
            ZoomPhase::Idle => None,
            ZoomPhase::Interactive(transition) => Some(transition),
            ZoomPhase::Settling { transition, .. } => Some(transition),
        }
    }

    /// Feed a pinch sample. `current` is the resting viewport.
    pub fn pinch<B: GridBinding>(
        &mut self,
        cx: &mut TransitionContext<'_, B>,
        current: ViewportId,
        event: &PinchEvent,
    ) {
        match (event.phase, self.phase) {
            (GesturePhase::Began, _) => {}
            (GesturePhase::Changed, ZoomPhase::Idle) => {
                if event.scale != 1.0 {
                    self.begin_interactive(cx, current, event);
                }
            }
            (GesturePhase::Changed, ZoomPhase::Interactive(transition)) => {
                self.scrub(cx, current, transition, event.scale);
            }
            (GesturePhase::Ended | GesturePhase::Cancelled, ZoomPhase::Interactive(transition)) => {
                let progress = transition
                    .interactive
                    .map_or(transition.progress, |range| range.progress(event.scale))
                    .clamp(0.0, 1.0);
                let target = if progress < self.config.commit_threshold {
                    0.0
                } else {
                    1.0
                };
                sparsegrid_core::debug!(progress, target, "zoom pinch released");
                self.settle(transition, progress, target, self.config.settle_duration);
            }
            // Samples during settling, or without a live transition.
            _ => {}
        }
    }

    fn begin_interactive<B: GridBinding>(
        &mut self,
        cx: &mut TransitionContext<'_, B>,
        current: ViewportId,
        event: &PinchEvent,
    ) {
        let Some(zoom) = cx.zoom_of(current) else {
            return;
        };
        let zoom_in = event.scale > 1.0;
        let Some(next) = cx.ladder.step(zoom, zoom_in) else {
            return;
        };
        let Some((anchor_index, anchor_frame)) = cx.viewports.get(current).and_then(|viewport| {
            let item = viewport.anchor_item_at(event.location)?;
            Some((item.index, viewport.frame_for_index(item.index)?))
        }) else {
            return;
        };

        let factor = self.config.zoom_in_scale_factor;
        let range = ScaleRange {
            initial: 1.0,
            target: if zoom_in { factor } else { 1.0 / factor },
        };
        let to = cx.spawn(
            next,
            Some(ScrollRestore {
                y: anchor_frame.min_y(),
                index: anchor_index,
            }),
        );
        let mut transition = ViewportTransition {
            from: current,
            to,
            anchor_index,
            interactive: Some(range),
            progress: 0.0,
        };
        transition.apply(
            cx.viewports,
            range.progress(event.scale).clamp(0.0, 1.0),
            self.config.source_fade_start,
        );
        sparsegrid_core::debug!(
            from = zoom.percent(),
            to = next.percent(),
            anchor_index,
            "zoom transition began"
        );
        self.phase = ZoomPhase::Interactive(transition);
    }

    fn scrub<B: GridBinding>(
        &mut self,
        cx: &mut TransitionContext<'_, B>,
        current: ViewportId,
        mut transition: ViewportTransition,
        scale: f64,
    ) {
        let Some(range) = transition.interactive else {
            return;
        };
        let progress = range.progress(scale);
        if (0.0..=1.0).contains(&progress) {
            transition.apply(cx.viewports, progress, self.config.source_fade_start);
            self.phase = ZoomPhase::Interactive(transition);
            return;
        }

        let past_target = progress > 1.0;
        let boundary = if past_target {
            transition.to
        } else {
            transition.from
        };
        if let Some(next) = self.retarget(cx, &transition, boundary, past_target) {
            let mut replacement = Self::replace(cx, current, transition, next);
            let next_progress = replacement
                .interactive
                .map_or(0.0, |r| r.progress(scale))
                .clamp(0.0, 1.0);
            replacement.apply(cx.viewports, next_progress, self.config.source_fade_start);
            self.phase = ZoomPhase::Interactive(replacement);
        } else {
            transition.apply(
                cx.viewports,
                progress.clamp(0.0, 1.0),
                self.config.source_fade_start,
            );
            self.phase = ZoomPhase::Interactive(transition);
        }
    }

    /// Build the transition that continues past `boundary`, if the ladder
    /// has a level beyond it.
    fn retarget<B: GridBinding>(
        &self,
        cx: &mut TransitionContext<'_, B>,
        transition: &ViewportTransition,
        boundary: ViewportId,
        past_target: bool,
    ) -> Option<ViewportTransition> {
        let range = transition.interactive?;
        let boundary_zoom = cx.zoom_of(boundary)?;
        let factor = self.config.zoom_in_scale_factor;
        let start = if past_target {
            range.target
        } else {
            range.initial
        };
        // Continuing in the pinch direction past `to`, or reversing past
        // `from`, both move one more ladder step beyond the boundary.
        let zoom_in = range.is_zoom_in() == past_target;
        let next = cx.ladder.step(boundary_zoom, zoom_in)?;
        let next_scale = if zoom_in { start * factor } else { start / factor };
        let frame = cx
            .viewports
            .get(boundary)?
            .frame_for_index(transition.anchor_index)?;

        let to = cx.spawn(
            next,
            Some(ScrollRestore {
                y: frame.min_y(),
                index: transition.anchor_index,
            }),
        );
        sparsegrid_core::debug!(
            boundary = boundary_zoom.percent(),
            next = next.percent(),
            "zoom transition retargeted"
        );
        Some(ViewportTransition {
            from: boundary,
            to,
            anchor_index: transition.anchor_index,
            interactive: Some(ScaleRange {
                initial: start,
                target: next_scale,
            }),
            progress: 0.0,
        })
    }

    /// Swap `old` for `new`. The end of `old` that `new` does not keep is
    /// released, unless it is the resting viewport, which only goes dark.
    fn replace<B: GridBinding>(
        cx: &mut TransitionContext<'_, B>,
        current: ViewportId,
        old: ViewportTransition,
        new: ViewportTransition,
    ) -> ViewportTransition {
        for dropped in [old.from, old.to] {
            if dropped == new.from || dropped == new.to {
                continue;
            }
            if dropped == current {
                if let Some(viewport) = cx.viewports.get_mut(dropped) {
                    viewport.set_presentation(Presentation {
                        alpha: 0.0,
                        ..Presentation::default()
                    });
                }
            } else {
                cx.release(dropped);
            }
        }
        if let Some(viewport) = cx.viewports.get_mut(new.from) {
            viewport.set_presentation(Presentation::default());
        }
        new
    }

    fn settle(&mut self, mut transition: ViewportTransition, from: f64, target: f64, duration: Duration) {
        transition.progress = from;
        self.phase = ZoomPhase::Settling {
            transition,
            animation: Slide::new(from, target, duration).easing(ease_in_out),
            target,
        };
    }

    /// Start an animated switch to `level` anchored at the configured point.
    ///
    /// Returns `false` when nothing was started: a transition is already
    /// running, `level` is the current level, or no anchor item is visible.
    pub fn set_zoom_level<B: GridBinding>(
        &mut self,
        cx: &mut TransitionContext<'_, B>,
        current: ViewportId,
        level: ZoomLevel,
    ) -> bool {
        if self.is_active() || cx.zoom_of(current) == Some(level) {
            return false;
        }
        let anchor_point = self.config.discrete_anchor;
        let Some((anchor_index, anchor_frame)) = cx.viewports.get(current).and_then(|viewport| {
            let item = viewport.anchor_item_at(anchor_point)?;
            Some((item.index, viewport.frame_for_index(item.index)?))
        }) else {
            return false;
        };
        let to = cx.spawn(
            level,
            Some(ScrollRestore {
                y: anchor_frame.min_y(),
                index: anchor_index,
            }),
        );
        let mut transition = ViewportTransition {
            from: current,
            to,
            anchor_index,
            interactive: None,
            progress: 0.0,
        };
        transition.apply(cx.viewports, 0.0, self.config.source_fade_start);
        sparsegrid_core::debug!(level = level.percent(), anchor_index, "discrete zoom started");
        self.settle(transition, 0.0, 1.0, self.config.discrete_duration);
        true
    }

    /// Advance a settling transition. Returns the outcome when it finishes.
    pub fn tick<B: GridBinding>(
        &mut self,
        viewports: &mut SlotMap<ViewportId, Viewport<B>>,
        dt: Duration,
    ) -> Option<TransitionSettled> {
        let ZoomPhase::Settling {
            mut transition,
            mut animation,
            target,
        } = self.phase
        else {
            return None;
        };
        animation.tick(dt);
        transition.apply(viewports, animation.position(), self.config.source_fade_start);
        if !animation.is_complete() {
            self.phase = ZoomPhase::Settling {
                transition,
                animation,
                target,
            };
            return None;
        }

        self.phase = ZoomPhase::Idle;
        let committed = target >= 0.5;
        let winner = if committed {
            transition.to
        } else {
            transition.from
        };
        sparsegrid_core::debug!(committed, "zoom transition settled");
        Some(TransitionSettled {
            winner,
            committed,
            transition,
        })
    }
}
