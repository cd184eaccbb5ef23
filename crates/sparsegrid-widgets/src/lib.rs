#![forbid(unsafe_code)]

//! Sparse virtualized grid: snapshots, viewports, and gesture-driven zoom.
//!
//! - [`Items`] - immutable sparse snapshot with hole anchors
//! - [`Viewport`] - one zoom level rendering one snapshot
//! - [`HoleLoader`] - single-flight gate around [`GridBinding::load_hole`]
//! - [`ZoomTransitionController`] - pinch and discrete zoom transitions
//! - [`FastScrollArea`] - drag-to-seek indicator with tag labels
//! - [`SparseItemGrid`] - the engine tying them together

pub mod binding;
pub mod config;
pub mod element;
pub mod fast_scroll;
pub mod grid;
pub mod hole_loader;
pub mod shimmer;
pub mod sparse_index;
pub mod viewport;
pub mod zoom_transition;

pub use binding::{
    ElementOf, GridBinding, HapticFeedback, HoleLocation, HoleTicket, InsetTransition, NoHaptics,
};
pub use config::{FastScrollConfig, GridConfig, ZoomTransitionConfig};
pub use element::{DisplayElement, DisplaySurface, VisibleElement};
pub use fast_scroll::{DisplayTooltip, FastScrollAction, FastScrollArea};
pub use grid::{SparseItemGrid, ViewportPresentation};
pub use hole_loader::{HoleLoader, HoleRequest};
pub use shimmer::{Placeholder, ShimmerColors, ShimmerConfig, ShimmerRegion, ShimmerSweep};
pub use sparse_index::{HoleAnchor, Item, ItemId, Items, SnapshotError};
pub use viewport::{
    FastScrollInput, Presentation, ScrollRestore, ScrollSource, Viewport, ViewportEvents,
    ViewportId, ViewportSettings,
};
pub use zoom_transition::{
    ScaleRange, TransitionContext, TransitionFrame, TransitionSettled, ViewportTransition,
    ZoomPhase, ZoomTransitionController,
};
