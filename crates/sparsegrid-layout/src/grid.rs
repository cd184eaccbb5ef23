#![forbid(unsafe_code)]

//! Index to rectangle mapping for one zoom level.
//!
//! # Square-grid sizing
//!
//! ```text
//! base      = floor(min(max_item_width, width / 3))
//! target    = base * zoom / 100
//! per_row   = floor(width / target)
//! item      = floor_px((width - spacing * (per_row - 1)) / per_row)
//! last_item = width - (item + spacing) * (per_row - 1)
//! ```
//!
//! The last column stretches to absorb the rounding remainder so rows
//! always span the full width.
//!
//! # Fixed-height (list) mode
//!
//! One item per row, sized `(width, fixed_height)`, with no spacing.

use std::ops::RangeInclusive;

use sparsegrid_core::geometry::{Insets, Rect, Size, floor_to_pixels};

use crate::zoom::ZoomLevel;

/// Surface geometry supplied by the host on every update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerLayout {
    pub size: Size,
    /// Content insets. `top` is the leading inset reserved for headers.
    pub insets: Insets,
    /// Insets applied to the fast-scroll track.
    pub scroll_indicator_insets: Insets,
    /// Pins the scroll offset to the top and disables scrolling.
    pub lock_scrolling_at_top: bool,
    /// When set, switches to single-column rows of this height.
    pub fixed_item_height: Option<f64>,
}

impl ContainerLayout {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    #[must_use]
    pub fn with_scroll_indicator_insets(mut self, insets: Insets) -> Self {
        self.scroll_indicator_insets = insets;
        self
    }

    #[must_use]
    pub fn with_lock_scrolling_at_top(mut self, lock: bool) -> Self {
        self.lock_scrolling_at_top = lock;
        self
    }

    #[must_use]
    pub fn with_fixed_item_height(mut self, height: Option<f64>) -> Self {
        self.fixed_item_height = height;
        self
    }
}

/// Tunables for square-grid sizing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutMetrics {
    /// Gap between columns and between rows.
    pub item_spacing: f64,
    /// Upper bound for the base item width before zoom is applied.
    pub max_item_width: f64,
    /// Device pixels per point, used for rounding item sizes.
    pub pixel_scale: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            item_spacing: 1.0,
            max_item_width: 150.0,
            pixel_scale: 3.0,
        }
    }
}

impl LayoutMetrics {
    #[must_use]
    pub fn with_item_spacing(mut self, spacing: f64) -> Self {
        self.item_spacing = spacing;
        self
    }

    #[must_use]
    pub fn with_max_item_width(mut self, width: f64) -> Self {
        self.max_item_width = width;
        self
    }

    #[must_use]
    pub fn with_pixel_scale(mut self, scale: f64) -> Self {
        self.pixel_scale = scale;
        self
    }
}

/// Minimum number of columns the base width is derived from.
const BASE_COLUMNS: f64 = 3.0;

/// Resolved geometry for one `(container, zoom)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    container: ContainerLayout,
    zoom: ZoomLevel,
    item_size: Size,
    spacing: f64,
    items_per_row: usize,
    last_item_width: f64,
}

impl GridLayout {
    pub fn new(container: ContainerLayout, zoom: ZoomLevel, metrics: &LayoutMetrics) -> Self {
        let width = container.size.width.max(0.0);

        let layout = if let Some(height) = container.fixed_item_height {
            Self {
                container,
                zoom,
                item_size: Size::new(width, height.max(0.0)),
                spacing: 0.0,
                items_per_row: 1,
                last_item_width: width,
            }
        } else {
            let spacing = metrics.item_spacing.max(0.0);
            let base = metrics.max_item_width.min(width / BASE_COLUMNS).floor();
            let target = zoom.scale() * base;
            let items_per_row = if target > 0.0 {
                ((width / target).floor() as usize).max(1)
            } else {
                1
            };
            let gaps = spacing * (items_per_row - 1) as f64;
            let item_width = floor_to_pixels(
                ((width - gaps) / items_per_row as f64).max(0.0),
                metrics.pixel_scale,
            );
            let last_item_width = width - (item_width + spacing) * (items_per_row - 1) as f64;
            Self {
                container,
                zoom,
                item_size: Size::new(item_width, item_width),
                spacing,
                items_per_row,
                last_item_width,
            }
        };

        sparsegrid_core::debug!(
            zoom = layout.zoom.percent(),
            items_per_row = layout.items_per_row,
            item_width = layout.item_size.width,
            item_height = layout.item_size.height,
            "grid layout computed"
        );
        layout
    }

    pub fn container(&self) -> &ContainerLayout {
        &self.container
    }

    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    pub fn item_size(&self) -> Size {
        self.item_size
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn items_per_row(&self) -> usize {
        self.items_per_row
    }

    /// Width of the last column, which absorbs the rounding remainder.
    pub fn last_item_width(&self) -> f64 {
        self.last_item_width
    }

    /// Vertical distance between the tops of consecutive rows.
    pub fn row_pitch(&self) -> f64 {
        self.item_size.height + self.spacing
    }

    /// True when no item can occupy any area.
    pub fn is_degenerate(&self) -> bool {
        self.container.size.width <= 0.0 || self.item_size.is_empty()
    }

    pub fn row_of(&self, index: usize) -> usize {
        index / self.items_per_row
    }

    /// Rectangle of `index` in content coordinates.
    pub fn frame(&self, index: usize) -> Rect {
        let row = self.row_of(index);
        let column = index % self.items_per_row;
        let width = if column == self.items_per_row - 1 {
            self.last_item_width
        } else {
            self.item_size.width
        };
        Rect::new(
            column as f64 * (self.item_size.width + self.spacing),
            self.container.insets.top + row as f64 * self.row_pitch(),
            width,
            self.item_size.height,
        )
    }

    /// Bottom edge of the last item, or the leading inset when empty.
    pub fn content_extent(&self, count: usize) -> f64 {
        match count.checked_sub(1) {
            Some(last) => self.frame(last).max_y(),
            None => self.container.insets.top,
        }
    }

    /// Size of the scrollable content including the trailing inset.
    pub fn scroll_content_size(&self, count: usize) -> Size {
        Size::new(
            self.container.size.width,
            self.content_extent(count) + self.container.insets.bottom,
        )
    }

    /// Indices whose rows intersect `view`, padded by one row on each side.
    ///
    /// Returns `None` for degenerate geometry, an empty collection, or a
    /// view that lies entirely outside the content.
    pub fn visible_index_range(&self, view: &Rect, count: usize) -> Option<RangeInclusive<usize>> {
        if count == 0 || self.is_degenerate() || view.height <= 0.0 {
            return None;
        }
        let pitch = self.row_pitch();
        let top = view.min_y() - self.container.insets.top;
        let bottom = view.max_y() - self.container.insets.top;

        // Padded by one row on each side. `ceil - 1` is the last row starting
        // above `bottom`, so the padded last row is `ceil`.
        let first_row = (top / pitch).floor() as i64 - 1;
        let last_row = (bottom / pitch).ceil() as i64;
        if last_row < 0 {
            return None;
        }

        let per_row = self.items_per_row as i64;
        let last_index = count as i64 - 1;
        let first = (first_row.max(0) * per_row).min(last_index + 1);
        let last = ((last_row + 1) * per_row - 1).min(last_index);
        if first > last {
            return None;
        }
        Some(first as usize..=last as usize)
    }
}
