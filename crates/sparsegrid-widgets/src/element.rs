#![forbid(unsafe_code)]

//! Display elements produced by the host's rendering backend.
//!
//! The backend may hand out either a lightweight drawing surface or a full
//! view. Both are driven through the same [`DisplaySurface`] capability set,
//! so the viewport has a single code path for either backing.

use sparsegrid_core::geometry::{Rect, Size};

use crate::shimmer::ShimmerRegion;
use crate::sparse_index::ItemId;

/// What the viewport needs from anything that draws one item.
pub trait DisplaySurface {
    /// Position in content coordinates.
    fn set_frame(&mut self, frame: Rect);

    /// Called for elements that stay visible across passes.
    fn update(&mut self, size: Size);

    /// Whether the element is still loading and wants the shimmer overlay.
    fn needs_shimmer(&self) -> bool {
        false
    }
}

/// Either backing kind, unified behind [`DisplaySurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayElement<S, V> {
    Surface(S),
    View(V),
}

impl<S, V> DisplayElement<S, V> {
    pub fn as_surface(&self) -> Option<&S> {
        match self {
            Self::Surface(surface) => Some(surface),
            Self::View(_) => None,
        }
    }

    pub fn as_view(&self) -> Option<&V> {
        match self {
            Self::Surface(_) => None,
            Self::View(view) => Some(view),
        }
    }

    pub fn as_surface_mut(&mut self) -> Option<&mut S> {
        match self {
            Self::Surface(surface) => Some(surface),
            Self::View(_) => None,
        }
    }

    pub fn as_view_mut(&mut self) -> Option<&mut V> {
        match self {
            Self::Surface(_) => None,
            Self::View(view) => Some(view),
        }
    }
}

impl<S: DisplaySurface, V: DisplaySurface> DisplaySurface for DisplayElement<S, V> {
    fn set_frame(&mut self, frame: Rect) {
        match self {
            Self::Surface(surface) => surface.set_frame(frame),
            Self::View(view) => view.set_frame(frame),
        }
    }

    fn update(&mut self, size: Size) {
        match self {
            Self::Surface(surface) => surface.update(size),
            Self::View(view) => view.update(size),
        }
    }

    fn needs_shimmer(&self) -> bool {
        match self {
            Self::Surface(surface) => surface.needs_shimmer(),
            Self::View(view) => view.needs_shimmer(),
        }
    }
}

/// A bound element tracked by a viewport, keyed by item id.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleElement<E> {
    pub id: ItemId,
    pub index: usize,
    /// Frame in content coordinates.
    pub frame: Rect,
    /// Present while the element asks for a loading shimmer.
    pub shimmer: Option<ShimmerRegion>,
    pub element: E,
}
