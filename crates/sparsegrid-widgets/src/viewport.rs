#![forbid(unsafe_code)]

//! One zoom level's live rendering of one snapshot.
//!
//! A [`Viewport`] pairs a [`GridLayout`] with an [`Items`] snapshot and a
//! headless scroll model. Each pass over the visible range:
//!
//! 1. Reuses the element already bound to an item id, or creates and binds
//!    a new one (batched into a single [`GridBinding::bind`] call).
//! 2. Draws pooled placeholders for unknown indices (grid mode only).
//! 3. Unbinds every element whose id left the range.
//! 4. Reports the first gap as a [`HoleRequest`] and the fast-scroll input.
//!
//! Elements are keyed by item id, never by index, so they survive index
//! shifts between snapshots. Side effects the engine must route (hole
//! loads, inset notifications, fast-scroll updates) come back as
//! [`ViewportEvents`] rather than being called from here.

use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

use rustc_hash::{FxHashMap, FxHashSet};
use sparsegrid_core::animation::{Animation, Slide, ease_in_out};
use sparsegrid_core::geometry::{Insets, Point, Rect, Size, Transform};
use sparsegrid_layout::{ContainerLayout, GridLayout, LayoutMetrics, ZoomLevel};

use crate::binding::{ElementOf, GridBinding, InsetTransition};
use crate::config::GridConfig;
use crate::element::{DisplayElement, DisplaySurface, VisibleElement};
use crate::hole_loader::HoleRequest;
use crate::shimmer::{Placeholder, ShimmerRegion};
use crate::sparse_index::{Item, ItemId, Items};

slotmap::new_key_type! {
    /// Arena key of a viewport owned by the engine.
    pub struct ViewportId;
}

/// Offsets closer than this are treated as equal.
const OFFSET_EPSILON: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Inputs and outputs
// ---------------------------------------------------------------------------

/// Origin of a scroll offset change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollSource {
    /// Direct manipulation. May overshoot the content bounds.
    User,
    /// Driven by the fast-scroll drag.
    FastScroll,
    Programmatic,
}

/// Keep `index` at `y` points from the container top after a relayout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRestore {
    pub y: f64,
    pub index: usize,
}

/// How a viewport is drawn relative to the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    pub transform: Transform,
    pub alpha: f64,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            alpha: 1.0,
        }
    }
}

/// Per-viewport settings taken from [`GridConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSettings {
    pub metrics: LayoutMetrics,
    pub scroll_animation_duration: Duration,
    pub covering_snap_duration: Duration,
}

impl ViewportSettings {
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            metrics: config.layout,
            scroll_animation_duration: config.scroll_animation_duration,
            covering_snap_duration: config.covering_snap_duration,
        }
    }
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self::from_config(&GridConfig::default())
    }
}

/// Everything the fast-scroll area needs from a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FastScrollInput {
    pub container_size: Size,
    pub insets: Insets,
    pub content_height: f64,
    pub content_offset: f64,
    /// Largest programmatic offset, `content_size - bounds`.
    pub max_offset: f64,
    /// The user is dragging or the content is decelerating.
    pub is_scrolling: bool,
    /// Tag at the top of the visible range.
    pub tag: Option<i32>,
}

/// Side effects of a viewport pass, routed by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportEvents {
    /// First gap in the visible range.
    pub hole: Option<HoleRequest>,
    /// The covering inset offset changed.
    pub covering: Option<InsetTransition>,
    pub fast_scroll: Option<FastScrollInput>,
}

impl ViewportEvents {
    /// Fold a later pass into this one. Later values win.
    pub fn merge(&mut self, later: ViewportEvents) {
        if later.hole.is_some() {
            self.hole = later.hole;
        }
        if later.covering.is_some() {
            self.covering = later.covering;
        }
        if later.fast_scroll.is_some() {
            self.fast_scroll = later.fast_scroll;
        }
    }
}

// ---------------------------------------------------------------------------
// Scroll model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScrollState {
    bounds: Size,
    content_size: Size,
    offset: f64,
    is_dragging: bool,
    is_decelerating: bool,
    scroll_enabled: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            bounds: Size::ZERO,
            content_size: Size::ZERO,
            offset: 0.0,
            is_dragging: false,
            is_decelerating: false,
            scroll_enabled: true,
        }
    }
}

impl ScrollState {
    fn max_offset(&self) -> f64 {
        (self.content_size.height - self.bounds.height).max(0.0)
    }

    fn clamp(&self, offset: f64) -> f64 {
        offset.min(self.max_offset()).max(0.0)
    }
}

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

pub struct Viewport<B: GridBinding> {
    zoom: ZoomLevel,
    settings: ViewportSettings,
    layout: Option<GridLayout>,
    items: Option<Arc<Items>>,
    scroll: ScrollState,
    previous_offset: f64,
    covering_inset: f64,
    scroll_animation: Option<Slide>,
    visible: FxHashMap<ItemId, VisibleElement<ElementOf<B>>>,
    placeholders: Vec<Placeholder>,
    presentation: Presentation,
}

impl<B: GridBinding> std::fmt::Debug for Viewport<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewport")
            .field("zoom", &self.zoom)
            .field("offset", &self.scroll.offset)
            .field("visible", &self.visible.len())
            .field("placeholders", &self.placeholders.len())
            .field("covering_inset", &self.covering_inset)
            .finish()
    }
}

impl<B: GridBinding> Viewport<B> {
    pub fn new(zoom: ZoomLevel, settings: ViewportSettings) -> Self {
        Self {
            zoom,
            settings,
            layout: None,
            items: None,
            scroll: ScrollState::default(),
            previous_offset: 0.0,
            covering_inset: 0.0,
            scroll_animation: None,
            visible: FxHashMap::default(),
            placeholders: Vec::new(),
            presentation: Presentation::default(),
        }
    }

    // --- accessors --------------------------------------------------------

    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    pub fn layout(&self) -> Option<&GridLayout> {
        self.layout.as_ref()
    }

    pub fn items(&self) -> Option<&Arc<Items>> {
        self.items.as_ref()
    }

    pub fn offset(&self) -> f64 {
        self.scroll.offset
    }

    pub fn max_offset(&self) -> f64 {
        self.scroll.max_offset()
    }

    pub fn content_size(&self) -> Size {
        self.scroll.content_size
    }

    /// The visible rectangle in content coordinates.
    pub fn visible_rect(&self) -> Rect {
        Rect::new(
            0.0,
            self.scroll.offset,
            self.scroll.bounds.width,
            self.scroll.bounds.height,
        )
    }

    pub fn covering_inset_offset(&self) -> f64 {
        self.covering_inset
    }

    pub fn is_dragging(&self) -> bool {
        self.scroll.is_dragging
    }

    pub fn is_decelerating(&self) -> bool {
        self.scroll.is_decelerating
    }

    pub fn is_scroll_enabled(&self) -> bool {
        self.scroll.scroll_enabled
    }

    pub fn is_animating_scroll(&self) -> bool {
        self.scroll_animation.is_some()
    }

    pub fn visible_elements(&self) -> impl Iterator<Item = &VisibleElement<ElementOf<B>>> {
        self.visible.values()
    }

    pub fn visible_elements_mut(
        &mut self,
    ) -> impl Iterator<Item = &mut VisibleElement<ElementOf<B>>> {
        self.visible.values_mut()
    }

    pub fn visible_element(&self, id: ItemId) -> Option<&VisibleElement<ElementOf<B>>> {
        self.visible.get(&id)
    }

    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    pub fn set_presentation(&mut self, presentation: Presentation) {
        self.presentation = presentation;
    }

    // --- snapshot and geometry --------------------------------------------

    /// Adopt new geometry or a new snapshot. No-op when both are unchanged
    /// (snapshots compare by identity).
    pub fn update(
        &mut self,
        binding: &mut B,
        container: ContainerLayout,
        items: &Arc<Items>,
        restore: Option<ScrollRestore>,
    ) -> ViewportEvents {
        let same_geometry = self
            .layout
            .as_ref()
            .is_some_and(|layout| *layout.container() == container);
        let same_items = self
            .items
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, items));
        if same_geometry && same_items {
            return ViewportEvents::default();
        }
        self.layout = Some(GridLayout::new(container, self.zoom, &self.settings.metrics));
        self.items = Some(Arc::clone(items));
        self.update_visible(binding, true, restore)
    }

    /// Unbind everything. Called when the viewport is discarded.
    pub fn release(&mut self, binding: &mut B) {
        for (_, visible) in self.visible.drain() {
            binding.unbind(visible.element);
        }
        self.placeholders.clear();
        self.scroll_animation = None;
    }

    fn create_element(binding: &mut B) -> Option<ElementOf<B>> {
        binding
            .create_surface()
            .map(DisplayElement::Surface)
            .or_else(|| binding.create_view().map(DisplayElement::View))
    }

    fn set_offset_silently(&mut self, offset: f64) {
        self.scroll.offset = offset;
        self.previous_offset = offset;
    }

    fn visible_range(&self) -> Option<RangeInclusive<usize>> {
        let layout = self.layout.as_ref()?;
        let items = self.items.as_ref()?;
        layout.visible_index_range(&self.visible_rect(), items.count())
    }

    fn update_visible(
        &mut self,
        binding: &mut B,
        reset_scrolling: bool,
        restore: Option<ScrollRestore>,
    ) -> ViewportEvents {
        let (Some(layout), Some(items)) = (self.layout.clone(), self.items.clone()) else {
            return ViewportEvents::default();
        };
        let container = *layout.container();

        if reset_scrolling {
            self.scroll.bounds = container.size;
            self.scroll.content_size = layout.scroll_content_size(items.count());
        }
        if container.lock_scrolling_at_top {
            self.scroll.scroll_enabled = false;
            self.scroll_animation = None;
            self.set_offset_silently(0.0);
        } else {
            self.scroll.scroll_enabled = true;
            if let Some(restore) = restore {
                let target = layout.frame(restore.index).min_y() - restore.y;
                let clamped = self.scroll.clamp(target);
                self.set_offset_silently(clamped);
            }
        }

        let visible_rect = self.visible_rect();
        let range = layout.visible_index_range(&visible_rect, items.count());

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "sparse_grid.update_visible",
            zoom = self.zoom.percent(),
            first = ?range.as_ref().map(|r| *r.start()),
            last = ?range.as_ref().map(|r| *r.end()),
        )
        .entered();

        let colors = binding.shimmer_colors();
        let shimmer_for = |frame: Rect| {
            ShimmerRegion::new(
                frame.offset_by(0.0, -visible_rect.min_y()),
                container.size,
                colors,
            )
        };

        let mut seen = FxHashSet::default();
        let mut used_placeholders = 0;
        let mut bind_items: Vec<Item> = Vec::new();
        let mut bind_frames: Vec<(usize, Rect)> = Vec::new();
        let mut bind_elements: Vec<ElementOf<B>> = Vec::new();

        for index in range.clone().into_iter().flatten() {
            let frame = layout.frame(index);
            if let Some(item) = items.item_at(index) {
                seen.insert(item.id);
                if let Some(visible) = self.visible.get_mut(&item.id) {
                    visible.index = index;
                    visible.frame = frame;
                    visible.element.set_frame(frame);
                    visible.element.update(frame.size());
                    visible.shimmer = visible.element.needs_shimmer().then(|| shimmer_for(frame));
                } else if let Some(mut element) = Self::create_element(binding) {
                    element.set_frame(frame);
                    bind_items.push(*item);
                    bind_frames.push((index, frame));
                    bind_elements.push(element);
                } else {
                    sparsegrid_core::warn!(
                        index,
                        "binding produced neither a surface nor a view"
                    );
                }
            } else if container.fixed_item_height.is_none() {
                let placeholder = Placeholder {
                    index,
                    frame,
                    shimmer: shimmer_for(frame),
                };
                match self.placeholders.get_mut(used_placeholders) {
                    Some(slot) => *slot = placeholder,
                    None => self.placeholders.push(placeholder),
                }
                used_placeholders += 1;
            }
        }

        if !bind_items.is_empty() {
            binding.bind(&bind_items, &mut bind_elements);
            for ((item, (index, frame)), element) in
                bind_items.iter().zip(bind_frames).zip(bind_elements)
            {
                let shimmer = element.needs_shimmer().then(|| shimmer_for(frame));
                self.visible.insert(
                    item.id,
                    VisibleElement {
                        id: item.id,
                        index,
                        frame,
                        shimmer,
                        element,
                    },
                );
            }
        }

        let stale: Vec<ItemId> = self
            .visible
            .keys()
            .filter(|id| !seen.contains(*id))
            .copied()
            .collect();
        for id in stale {
            if let Some(visible) = self.visible.remove(&id) {
                binding.unbind(visible.element);
            }
        }
        self.placeholders.truncate(used_placeholders);

        ViewportEvents {
            hole: Self::first_gap(&items, range.clone()),
            covering: None,
            fast_scroll: self.fast_scroll_input_for(&layout, &items, range),
        }
    }

    fn first_gap(items: &Items, range: Option<RangeInclusive<usize>>) -> Option<HoleRequest> {
        let missing = range?.find(|&index| items.item_at(index).is_none())?;
        items
            .closest_hole(missing)
            .map(|anchor| HoleRequest::for_gap(*anchor, missing))
    }

    /// The gap a hole load should target right now, if any.
    pub fn hole_to_load(&self) -> Option<HoleRequest> {
        let items = self.items.as_ref()?;
        Self::first_gap(items, self.visible_range())
    }

    fn fast_scroll_input_for(
        &self,
        layout: &GridLayout,
        items: &Items,
        range: Option<RangeInclusive<usize>>,
    ) -> Option<FastScrollInput> {
        if items.items().is_empty() {
            return None;
        }
        let tag = range.and_then(|mut r| r.find_map(|index| items.tag_at_or_below(index)));
        let container = layout.container();
        Some(FastScrollInput {
            container_size: container.size,
            insets: container.scroll_indicator_insets,
            content_height: layout.content_extent(items.count()),
            content_offset: self.scroll.offset,
            max_offset: self.scroll.max_offset(),
            is_scrolling: self.scroll.is_dragging || self.scroll.is_decelerating,
            tag,
        })
    }

    /// Current fast-scroll input without running a pass.
    pub fn fast_scroll_input(&self) -> Option<FastScrollInput> {
        let layout = self.layout.as_ref()?;
        let items = self.items.as_ref()?;
        self.fast_scroll_input_for(layout, items, self.visible_range())
    }

    // --- scrolling --------------------------------------------------------

    fn did_scroll(&mut self, binding: &mut B, source: ScrollSource) -> ViewportEvents {
        let mut events = self.update_visible(binding, false, None);
        let Some(top) = self.layout.as_ref().map(|l| l.container().insets.top.max(0.0)) else {
            return events;
        };

        let offset = self.scroll.offset;
        let delta = offset - self.previous_offset;
        self.previous_offset = offset;

        let mut candidate = (self.covering_inset + delta).clamp(0.0, top);
        if offset <= 0.0 {
            candidate = 0.0;
        }
        let apply = match source {
            ScrollSource::FastScroll => offset <= top && candidate < self.covering_inset,
            ScrollSource::User | ScrollSource::Programmatic => candidate != self.covering_inset,
        };
        if apply {
            self.covering_inset = candidate;
            events.covering = Some(InsetTransition::Immediate);
        }
        events
    }

    /// Move the content to `offset`. User input is passed through as is;
    /// other sources are clamped to the content.
    pub fn scroll_to(&mut self, binding: &mut B, offset: f64, source: ScrollSource) -> ViewportEvents {
        if !self.scroll.scroll_enabled || self.layout.is_none() {
            return ViewportEvents::default();
        }
        self.scroll.offset = match source {
            ScrollSource::User => offset,
            ScrollSource::FastScroll | ScrollSource::Programmatic => self.scroll.clamp(offset),
        };
        self.did_scroll(binding, source)
    }

    pub fn begin_dragging(&mut self) {
        self.scroll.is_dragging = true;
        self.scroll.is_decelerating = false;
        self.scroll_animation = None;
    }

    pub fn end_dragging(&mut self, will_decelerate: bool) -> ViewportEvents {
        self.scroll.is_dragging = false;
        self.scroll.is_decelerating = will_decelerate;
        if will_decelerate {
            ViewportEvents::default()
        } else {
            self.snap_covering_inset()
        }
    }

    /// Forget drag, deceleration and scroll animation state without snapping.
    pub fn interrupt_scrolling(&mut self) {
        self.scroll.is_dragging = false;
        self.scroll.is_decelerating = false;
        self.scroll_animation = None;
    }

    pub fn end_decelerating(&mut self) -> ViewportEvents {
        self.scroll.is_decelerating = false;
        self.snap_covering_inset()
    }

    /// Jump so `index`'s row starts at the top, clamped to the content.
    pub fn scroll_to_item(&mut self, binding: &mut B, index: usize) -> ViewportEvents {
        let Some(layout) = self.layout.as_ref() else {
            return ViewportEvents::default();
        };
        if layout.container().lock_scrolling_at_top {
            return ViewportEvents::default();
        }
        let target = layout.frame(index).min_y();
        self.scroll_animation = None;
        self.scroll_to(binding, target, ScrollSource::Programmatic)
    }

    /// Start an animated scroll to the top. `false` when already there.
    pub fn scroll_to_top(&mut self) -> bool {
        if self.scroll.offset > 0.0 {
            self.animate_to(0.0);
            true
        } else {
            false
        }
    }

    fn animate_to(&mut self, target: f64) -> bool {
        if (target - self.scroll.offset).abs() < OFFSET_EPSILON {
            return false;
        }
        self.scroll_animation = Some(
            Slide::new(self.scroll.offset, target, self.settings.scroll_animation_duration)
                .easing(ease_in_out),
        );
        true
    }

    /// Advance an animated scroll.
    pub fn tick(&mut self, binding: &mut B, dt: Duration) -> ViewportEvents {
        let Some(animation) = self.scroll_animation.as_mut() else {
            return ViewportEvents::default();
        };
        animation.tick(dt);
        let position = animation.position();
        let finished = animation.is_complete();
        self.scroll.offset = position;
        let mut events = self.did_scroll(binding, ScrollSource::Programmatic);
        if finished {
            self.scroll_animation = None;
            events.merge(self.snap_covering_inset());
        }
        events
    }

    /// Settle the covering inset (or the offset within the header zone) on
    /// whichever side of the midpoint it rests.
    fn snap_covering_inset(&mut self) -> ViewportEvents {
        let mut events = ViewportEvents::default();
        let Some(top) = self.layout.as_ref().map(|l| l.container().insets.top.max(0.0)) else {
            return events;
        };
        let offset = self.scroll.offset;
        if offset < top {
            let target = if offset <= top / 2.0 { 0.0 } else { top };
            self.animate_to(target);
        } else {
            let mut covering = if self.covering_inset > top / 2.0 { top } else { 0.0 };
            if offset <= 0.0 {
                covering = 0.0;
            }
            if covering != self.covering_inset {
                self.covering_inset = covering;
                events.covering = Some(InsetTransition::Animated(self.settings.covering_snap_duration));
            }
        }
        events
    }

    // --- hit testing ------------------------------------------------------

    fn to_content(&self, point: Point) -> Point {
        Point::new(point.x, point.y + self.scroll.offset)
    }

    fn item_for(&self, visible: &VisibleElement<ElementOf<B>>) -> Option<Item> {
        self.items
            .as_ref()?
            .item_at(visible.index)
            .filter(|item| item.id == visible.id)
            .copied()
    }

    /// Item whose element contains `point` (container coordinates).
    pub fn item_at(&self, point: Point) -> Option<Item> {
        let local = self.to_content(point);
        self.visible
            .values()
            .find(|visible| visible.frame.contains(local))
            .and_then(|visible| self.item_for(visible))
    }

    /// Item whose element center is nearest `point`. Ties go to the lower index.
    pub fn anchor_item_at(&self, point: Point) -> Option<Item> {
        let local = self.to_content(point);
        self.visible
            .values()
            .map(|visible| (visible.frame.center().distance_squared(local), visible))
            .min_by(|(da, a), (db, b)| da.total_cmp(db).then(a.index.cmp(&b.index)))
            .and_then(|(_, visible)| self.item_for(visible))
    }

    /// Frame of `index` in container coordinates.
    pub fn frame_for_index(&self, index: usize) -> Option<Rect> {
        let layout = self.layout.as_ref()?;
        Some(layout.frame(index).offset_by(0.0, -self.scroll.offset))
    }
}
