#![forbid(unsafe_code)]

//! The collaborator contract consumed by the engine.
//!
//! The host implements [`GridBinding`] once. The engine owns the binding
//! and calls back into it synchronously on the host's UI thread.

use std::fmt;
use std::time::Duration;

use crate::element::{DisplayElement, DisplaySurface};
use crate::shimmer::ShimmerColors;
use crate::sparse_index::{HoleAnchor, Item};

/// Which side of a hole anchor the collaborator should fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoleLocation {
    /// Near the anchor, no direction preference.
    Around,
    /// Indices below the anchor.
    TowardLower,
    /// Indices above the anchor.
    TowardUpper,
}

/// Identifies one in-flight hole load. Hand it back to
/// `SparseItemGrid::hole_load_completed` when the load finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HoleTicket(pub(crate) u64);

impl HoleTicket {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HoleTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hole-{}", self.0)
    }
}

/// How a covering inset change should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsetTransition {
    Immediate,
    Animated(Duration),
}

/// Display element type produced by a binding.
pub type ElementOf<B> = DisplayElement<<B as GridBinding>::Surface, <B as GridBinding>::View>;

/// Everything the engine needs from the surrounding application.
pub trait GridBinding {
    type Surface: DisplaySurface;
    type View: DisplaySurface;

    /// Preferred factory. Return `None` to fall back to [`create_view`](Self::create_view).
    fn create_surface(&mut self) -> Option<Self::Surface>;

    fn create_view(&mut self) -> Option<Self::View> {
        None
    }

    /// Bind newly visible items to newly created elements, pairwise.
    fn bind(&mut self, items: &[Item], elements: &mut [ElementOf<Self>]);

    /// An element left the visible range and is handed back.
    fn unbind(&mut self, element: ElementOf<Self>);

    /// Start filling a hole. Report completion with the ticket.
    fn load_hole(&mut self, anchor: &HoleAnchor, location: HoleLocation, ticket: HoleTicket);

    /// Label shown by the fast-scroll indicator for `tag`.
    fn tag_label(&self, tag: i32) -> Option<String>;

    fn on_tap(&mut self, _item: &Item) {}

    /// The fast-scroll label was tapped without dragging.
    fn on_tag_area_tap(&mut self) {}

    /// The user started dragging the content.
    fn on_scroll(&mut self) {}

    fn on_begin_fast_scroll(&mut self) {}

    fn covering_inset_offset_updated(&mut self, _offset: f64, _transition: InsetTransition) {}

    fn shimmer_colors(&self) -> ShimmerColors {
        ShimmerColors::default()
    }
}

/// Haptic feedback sink, injected into the engine.
pub trait HapticFeedback {
    /// Light tick, fired when the fast-scroll tag changes.
    fn tap(&mut self);

    /// Stronger pulse, fired when the fast-scroll label expands.
    fn impact(&mut self);
}

/// Discards all feedback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl HapticFeedback for NoHaptics {
    fn tap(&mut self) {}

    fn impact(&mut self) {}
}
