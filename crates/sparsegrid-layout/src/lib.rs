#![forbid(unsafe_code)]

//! Grid geometry for one zoom level.
//!
//! - [`ZoomLevel`] / [`ZoomLadder`] - the discrete densities a grid can show
//! - [`ContainerLayout`] - the host surface geometry pushed into the engine
//! - [`GridLayout`] - index to rectangle mapping, content extent, visible range
//!
//! Everything here is a pure function of its inputs.

pub mod error;
pub mod grid;
pub mod zoom;

pub use error::ConfigError;
pub use grid::{ContainerLayout, GridLayout, LayoutMetrics};
pub use sparsegrid_core::geometry::{Insets, Point, Rect, Size};
pub use zoom::{ZoomLadder, ZoomLevel, ZoomSteps};
