#![forbid(unsafe_code)]

//! Sparse virtualized grid public facade crate.
//!
//! Re-exports the engine surface from the internal crates and offers a
//! prelude for hosts implementing [`GridBinding`].

// --- Core re-exports -------------------------------------------------------

pub use sparsegrid_core::animation::{Animation, EasingFn, Slide, Sweep};
pub use sparsegrid_core::geometry::{Insets, Point, Rect, Size, Transform};
pub use sparsegrid_core::gesture::{GesturePhase, PinchEvent, TouchEvent};

// --- Layout re-exports -----------------------------------------------------

pub use sparsegrid_layout::{
    ConfigError, ContainerLayout, GridLayout, LayoutMetrics, ZoomLadder, ZoomLevel, ZoomSteps,
};

// --- Engine re-exports -----------------------------------------------------

pub use sparsegrid_widgets::{
    DisplayElement, DisplaySurface, DisplayTooltip, ElementOf, FastScrollConfig, GridBinding,
    GridConfig, HapticFeedback, HoleAnchor, HoleLocation, HoleTicket, InsetTransition, Item,
    ItemId, Items, NoHaptics, Placeholder, ShimmerColors, ShimmerConfig, ShimmerRegion,
    SnapshotError, SparseItemGrid, ViewportPresentation, ZoomTransitionConfig,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for sparsegrid hosts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A snapshot handed to the engine was malformed.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    /// The engine configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Standard result type for sparsegrid APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ContainerLayout, DisplaySurface, ElementOf, Error, GesturePhase, GridBinding, GridConfig,
        HoleAnchor, HoleLocation, HoleTicket, Item, ItemId, Items, PinchEvent, Point, Rect,
        Result, Size, SparseItemGrid, TouchEvent, ZoomLevel,
    };

    pub use crate::{core, layout, widgets};
}

pub use sparsegrid_core as core;
pub use sparsegrid_layout as layout;
pub use sparsegrid_widgets as widgets;

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(indices: &[usize]) -> Result<Items> {
        let items = indices.iter().map(|&i| Item::new(i as u64, i, 0)).collect();
        Ok(Items::new(items, vec![], 10)?)
    }

    #[test]
    fn snapshot_errors_convert() {
        assert!(snapshot(&[1, 2, 3]).is_ok());
        assert_eq!(
            snapshot(&[3, 1]),
            Err(Error::Snapshot(SnapshotError::ItemsNotAscending {
                previous: 3,
                next: 1
            }))
        );
    }

    #[test]
    fn config_errors_keep_their_message() {
        let err: Error = ConfigError::InitialZoomNotOnLadder(33).into();
        assert_eq!(err.to_string(), "initial zoom level 33 is not on the zoom ladder");
    }
}
