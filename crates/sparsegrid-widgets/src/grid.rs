#![forbid(unsafe_code)]

//! The engine: one collaborator, a viewport arena, and the gesture state
//! machines wired together.
//!
//! [`SparseItemGrid`] owns every [`Viewport`] in a [`SlotMap`]. Exactly one
//! viewport is *current* at rest. During a zoom transition the arena also
//! holds the destination (and, after a retarget, the resting viewport that
//! went dark). Viewport passes report [`ViewportEvents`]; the engine routes
//! them:
//!
//! - hole requests go through the single-flight [`HoleLoader`],
//! - covering inset changes reach the collaborator only from the current
//!   viewport,
//! - fast-scroll input reaches the [`FastScrollArea`] only from the viewport
//!   that owns it.
//!
//! # Example
//!
//! ```ignore
//! let mut grid = SparseItemGrid::new(binding, GridConfig::default())?;
//! grid.update(ContainerLayout::new(Size::new(390.0, 844.0)), items);
//! grid.scroll_to_item(120);
//! grid.tick(Duration::from_millis(16));
//! ```

use std::sync::Arc;
use std::time::Duration;

use slotmap::SlotMap;
use sparsegrid_core::geometry::{Point, Rect};
use sparsegrid_core::gesture::{PinchEvent, TouchEvent};
use sparsegrid_layout::{ConfigError, ContainerLayout, ZoomLevel, ZoomSteps};

use crate::binding::{ElementOf, GridBinding, HapticFeedback, HoleTicket, InsetTransition};
use crate::config::GridConfig;
use crate::element::VisibleElement;
use crate::fast_scroll::{DisplayTooltip, FastScrollAction, FastScrollArea};
use crate::hole_loader::HoleLoader;
use crate::shimmer::{Placeholder, ShimmerSweep};
use crate::sparse_index::{Item, Items};
use crate::viewport::{
    Presentation, ScrollSource, Viewport, ViewportEvents, ViewportId, ViewportSettings,
};
use crate::zoom_transition::{TransitionContext, TransitionSettled, ZoomTransitionController};

/// A live viewport and how to draw it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportPresentation {
    pub id: ViewportId,
    pub zoom: ZoomLevel,
    pub presentation: Presentation,
}

pub struct SparseItemGrid<B: GridBinding> {
    binding: B,
    config: GridConfig,
    settings: ViewportSettings,
    viewports: SlotMap<ViewportId, Viewport<B>>,
    current: Option<ViewportId>,
    scroll_area_owner: Option<ViewportId>,
    container: Option<ContainerLayout>,
    items: Arc<Items>,
    hole_loader: HoleLoader,
    zoom: ZoomTransitionController,
    fast_scroll: FastScrollArea,
    shimmer: ShimmerSweep,
}

impl<B: GridBinding> std::fmt::Debug for SparseItemGrid<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SparseItemGrid")
            .field("current", &self.current)
            .field("viewports", &self.viewports.len())
            .field("count", &self.items.count())
            .field("hole_loader", &self.hole_loader)
            .field("zoom", &self.zoom.phase())
            .finish()
    }
}

impl<B: GridBinding> SparseItemGrid<B> {
    pub fn new(binding: B, config: GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            binding,
            settings: ViewportSettings::from_config(&config),
            viewports: SlotMap::with_key(),
            current: None,
            scroll_area_owner: None,
            container: None,
            items: Arc::new(Items::empty()),
            hole_loader: HoleLoader::new(),
            zoom: ZoomTransitionController::new(config.zoom),
            fast_scroll: FastScrollArea::new(config.fast_scroll),
            shimmer: ShimmerSweep::new(&config.shimmer),
            config,
        })
    }

    #[must_use]
    pub fn with_haptics(mut self, haptics: Box<dyn HapticFeedback>) -> Self {
        self.fast_scroll.set_haptics(haptics);
        self
    }

    // --- accessors --------------------------------------------------------

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn binding(&self) -> &B {
        &self.binding
    }

    pub fn binding_mut(&mut self) -> &mut B {
        &mut self.binding
    }

    pub fn items(&self) -> &Arc<Items> {
        &self.items
    }

    pub fn hole_loader(&self) -> &HoleLoader {
        &self.hole_loader
    }

    pub fn fast_scroll(&self) -> &FastScrollArea {
        &self.fast_scroll
    }

    pub fn zoom_controller(&self) -> &ZoomTransitionController {
        &self.zoom
    }

    pub fn is_transitioning(&self) -> bool {
        self.zoom.is_active()
    }

    pub fn current_viewport(&self) -> Option<&Viewport<B>> {
        self.current.and_then(|id| self.viewports.get(id))
    }

    pub fn viewport(&self, id: ViewportId) -> Option<&Viewport<B>> {
        self.viewports.get(id)
    }

    pub fn zoom_level(&self) -> ZoomLevel {
        self.current_viewport()
            .map_or(self.config.initial_zoom, Viewport::zoom)
    }

    /// Ladder neighbors of the current level.
    pub fn available_zoom_levels(&self) -> ZoomSteps {
        self.config.zoom_ladder.neighbors(self.zoom_level())
    }

    pub fn covering_inset_offset(&self) -> f64 {
        self.current_viewport()
            .map_or(0.0, Viewport::covering_inset_offset)
    }

    /// Vertical shimmer phase shared by every placeholder, `+1` to `-1`.
    pub fn shimmer_phase(&self) -> f64 {
        self.shimmer.phase()
    }

    pub fn placeholders(&self) -> &[Placeholder] {
        self.current_viewport()
            .map(Viewport::placeholders)
            .unwrap_or_default()
    }

    /// Viewports to draw, back to front.
    pub fn presentations(&self) -> Vec<ViewportPresentation> {
        let ids = match self.zoom.transition() {
            Some(transition) => vec![transition.from, transition.to],
            None => self.current.into_iter().collect(),
        };
        ids.into_iter()
            .filter_map(|id| {
                let viewport = self.viewports.get(id)?;
                Some(ViewportPresentation {
                    id,
                    zoom: viewport.zoom(),
                    presentation: viewport.presentation(),
                })
            })
            .collect()
    }

    fn is_fixed_height(&self) -> bool {
        self.container
            .is_some_and(|container| container.fixed_item_height.is_some())
    }

    // --- event routing ----------------------------------------------------

    fn dispatch(&mut self, id: ViewportId, events: ViewportEvents) {
        if let Some(request) = events.hole {
            self.hole_loader.maybe_resolve(&mut self.binding, &request);
        }
        if let Some(transition) = events.covering {
            if self.current == Some(id) {
                let offset = self.covering_inset_offset();
                self.binding.covering_inset_offset_updated(offset, transition);
            }
        }
        if let Some(input) = events.fast_scroll {
            if self.scroll_area_owner == Some(id) {
                let label = input.tag.and_then(|tag| self.binding.tag_label(tag));
                self.fast_scroll.update(&input, label);
            }
        }
    }

    fn with_current(
        &mut self,
        f: impl FnOnce(&mut Viewport<B>, &mut B) -> ViewportEvents,
    ) -> Option<ViewportId> {
        let id = self.current?;
        let viewport = self.viewports.get_mut(id)?;
        let events = f(viewport, &mut self.binding);
        self.dispatch(id, events);
        Some(id)
    }

    fn run_transition<R>(
        &mut self,
        f: impl FnOnce(&mut ZoomTransitionController, &mut TransitionContext<'_, B>, ViewportId) -> R,
    ) -> Option<R> {
        let current = self.current?;
        let container = self.container?;
        let mut cx = TransitionContext {
            viewports: &mut self.viewports,
            binding: &mut self.binding,
            container,
            items: &self.items,
            ladder: &self.config.zoom_ladder,
            settings: self.settings,
            events: Vec::new(),
        };
        let result = f(&mut self.zoom, &mut cx, current);
        let events = cx.events;
        for (id, events) in events {
            self.dispatch(id, events);
        }
        Some(result)
    }

    // --- snapshot ---------------------------------------------------------

    /// Push new geometry and a new snapshot.
    ///
    /// While a zoom transition runs only the inputs are recorded; the
    /// winning viewport adopts them when the transition settles.
    pub fn update(&mut self, container: ContainerLayout, items: impl Into<Arc<Items>>) {
        self.items = items.into();
        self.container = Some(container);
        self.fast_scroll.set_hidden(container.lock_scrolling_at_top);
        if self.zoom.is_active() {
            return;
        }
        if self.current.is_none() {
            let id = self
                .viewports
                .insert(Viewport::new(self.config.initial_zoom, self.settings));
            self.current = Some(id);
            self.scroll_area_owner = Some(id);
        }
        let items = Arc::clone(&self.items);
        self.with_current(|viewport, binding| viewport.update(binding, container, &items, None));
    }

    /// Deliver the completion of a hole load. Stale tickets are ignored.
    pub fn hole_load_completed(&mut self, ticket: HoleTicket) -> bool {
        if !self.hole_loader.complete(ticket) {
            return false;
        }
        let next = self.current_viewport().and_then(Viewport::hole_to_load);
        if let Some(request) = next {
            self.hole_loader.maybe_resolve(&mut self.binding, &request);
        }
        true
    }

    // --- scrolling --------------------------------------------------------

    /// Direct scroll input on the current viewport. Ignored during a zoom
    /// transition.
    pub fn scroll_to_offset(&mut self, offset: f64) {
        if self.zoom.is_active() {
            return;
        }
        self.with_current(|viewport, binding| viewport.scroll_to(binding, offset, ScrollSource::User));
    }

    pub fn begin_dragging(&mut self) {
        if self.zoom.is_active() {
            return;
        }
        if let Some(viewport) = self.current.and_then(|id| self.viewports.get_mut(id)) {
            viewport.begin_dragging();
            self.binding.on_scroll();
        }
    }

    pub fn end_dragging(&mut self, will_decelerate: bool) {
        if self.zoom.is_active() {
            return;
        }
        self.with_current(|viewport, _| viewport.end_dragging(will_decelerate));
    }

    pub fn end_decelerating(&mut self) {
        if self.zoom.is_active() {
            return;
        }
        self.with_current(|viewport, _| viewport.end_decelerating());
    }

    pub fn scroll_to_item(&mut self, index: usize) {
        if self.zoom.is_active() {
            return;
        }
        self.with_current(|viewport, binding| viewport.scroll_to_item(binding, index));
    }

    /// Animate to the top. `false` when already there.
    pub fn scroll_to_top(&mut self) -> bool {
        if self.zoom.is_active() {
            return false;
        }
        self.current
            .and_then(|id| self.viewports.get_mut(id))
            .is_some_and(Viewport::scroll_to_top)
    }

    // --- gestures ---------------------------------------------------------

    /// Resolve a tap and notify the collaborator. Disabled in list mode and
    /// during zoom transitions.
    pub fn tap(&mut self, point: Point) -> Option<Item> {
        if self.is_fixed_height() || self.zoom.is_active() {
            return None;
        }
        let item = self.current_viewport()?.item_at(point)?;
        self.binding.on_tap(&item);
        Some(item)
    }

    /// Feed a pinch sample. Disabled in list mode.
    pub fn pinch(&mut self, event: PinchEvent) {
        if self.is_fixed_height() {
            return;
        }
        let was_active = self.zoom.is_active();
        self.run_transition(|zoom, cx, current| zoom.pinch(cx, current, &event));
        if !was_active && self.zoom.is_active() {
            self.interrupt_scrolling();
        }
    }

    /// The source viewport holds still for the length of a transition.
    fn interrupt_scrolling(&mut self) {
        self.fast_scroll.cancel_drag();
        for (_, viewport) in self.viewports.iter_mut() {
            viewport.interrupt_scrolling();
        }
    }

    /// Whether a touch at `point` belongs to the fast-scroll area.
    pub fn fast_scroll_hit_test(&self, point: Point) -> bool {
        self.fast_scroll.hit_test(point)
    }

    /// Feed a touch to the fast-scroll area. Returns `true` when consumed.
    /// Touches are not consumed during a zoom transition.
    pub fn fast_scroll_touch(&mut self, event: TouchEvent) -> bool {
        if self.zoom.is_active() {
            return false;
        }
        let Some(action) = self.fast_scroll.handle_touch(&event) else {
            return false;
        };
        match action {
            FastScrollAction::Began => self.binding.on_begin_fast_scroll(),
            FastScrollAction::SetContentOffset(offset) => {
                if let Some(owner) = self.scroll_area_owner {
                    if let Some(viewport) = self.viewports.get_mut(owner) {
                        let events =
                            viewport.scroll_to(&mut self.binding, offset, ScrollSource::FastScroll);
                        self.dispatch(owner, events);
                    }
                }
            }
            FastScrollAction::TagAreaTap => self.binding.on_tag_area_tap(),
            FastScrollAction::Ended | FastScrollAction::Cancelled => {}
        }
        true
    }

    pub fn set_scrolling_area_tooltip(&mut self, tooltip: DisplayTooltip) {
        self.fast_scroll.set_tooltip(tooltip);
    }

    // --- zoom -------------------------------------------------------------

    /// Animate to `level`. Ignored during a transition or when `level` is
    /// already current. Without a visible anchor item the switch is
    /// immediate.
    pub fn set_zoom_level(&mut self, level: ZoomLevel) {
        if self.zoom.is_active() || self.zoom_level() == level {
            return;
        }
        let started = self
            .run_transition(|zoom, cx, current| zoom.set_zoom_level(cx, current, level))
            .unwrap_or(false);
        if started {
            self.interrupt_scrolling();
        } else {
            self.switch_immediately(level);
        }
    }

    fn switch_immediately(&mut self, level: ZoomLevel) {
        let Some(container) = self.container else {
            return;
        };
        let mut viewport = Viewport::new(level, self.settings);
        let events = viewport.update(&mut self.binding, container, &self.items, None);
        let id = self.viewports.insert(viewport);
        sparsegrid_core::debug!(level = level.percent(), "zoom switched without transition");
        self.adopt(id);
        self.dispatch(id, events);
    }

    /// Make `winner` current and discard every other viewport.
    fn adopt(&mut self, winner: ViewportId) {
        let losers: Vec<ViewportId> = self.viewports.keys().filter(|id| *id != winner).collect();
        for id in losers {
            if let Some(mut viewport) = self.viewports.remove(id) {
                viewport.release(&mut self.binding);
            }
        }
        self.current = Some(winner);
        self.scroll_area_owner = Some(winner);
    }

    fn finish_transition(&mut self, settled: TransitionSettled) {
        let winner = settled.winner;
        self.adopt(winner);
        let (Some(container), Some(viewport)) = (self.container, self.viewports.get_mut(winner))
        else {
            return;
        };
        viewport.set_presentation(Presentation::default());
        let mut events = viewport.update(&mut self.binding, container, &self.items, None);
        if events.fast_scroll.is_none() {
            events.fast_scroll = viewport.fast_scroll_input();
        }
        let covering = viewport.covering_inset_offset();
        self.dispatch(winner, events);
        self.binding
            .covering_inset_offset_updated(covering, InsetTransition::Immediate);
    }

    // --- visible elements -------------------------------------------------

    /// Visit every element bound in the current viewport.
    pub fn for_each_visible_element(&mut self, mut f: impl FnMut(&mut VisibleElement<ElementOf<B>>)) {
        let Some(viewport) = self.current.and_then(|id| self.viewports.get_mut(id)) else {
            return;
        };
        for element in viewport.visible_elements_mut() {
            f(element);
        }
    }

    /// Frame of `index` in container coordinates, or `None` past the end.
    pub fn frame_for_item(&self, index: usize) -> Option<Rect> {
        if index >= self.items.count() {
            return None;
        }
        self.current_viewport()?.frame_for_index(index)
    }

    // --- time -------------------------------------------------------------

    /// Advance every animation and timer by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.shimmer.tick(dt);
        self.fast_scroll.tick(dt);

        let animating: Vec<ViewportId> = self
            .viewports
            .iter()
            .filter(|(_, viewport)| viewport.is_animating_scroll())
            .map(|(id, _)| id)
            .collect();
        for id in animating {
            if let Some(viewport) = self.viewports.get_mut(id) {
                let events = viewport.tick(&mut self.binding, dt);
                self.dispatch(id, events);
            }
        }

        if let Some(settled) = self.zoom.tick(&mut self.viewports, dt) {
            self.finish_transition(settled);
        }
    }
}
