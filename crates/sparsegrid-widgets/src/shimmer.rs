#![forbid(unsafe_code)]

//! Loading placeholders and the shared shimmer sweep.
//!
//! Each shimmering element samples one tall gradient through a contents
//! rectangle equal to its on-screen frame divided by the container size.
//! All elements share a single [`ShimmerSweep`] phase, so the highlight
//! moves across the grid as one band.

use std::time::Duration;

use sparsegrid_core::animation::{Animation, Sweep};
use sparsegrid_core::geometry::{Rect, Size};

/// Placeholder theming, as packed `0xAARRGGBB` colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShimmerColors {
    pub background: u32,
    pub foreground: u32,
}

impl ShimmerColors {
    pub const fn new(background: u32, foreground: u32) -> Self {
        Self {
            background,
            foreground,
        }
    }
}

/// The slice of the shared gradient an element should display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShimmerRegion {
    /// Normalized to the container: `(0, 0, 1, 1)` is the whole surface.
    pub contents_rect: Rect,
    pub colors: ShimmerColors,
}

impl ShimmerRegion {
    /// `frame_in_view` is the element frame relative to the visible top.
    pub fn new(frame_in_view: Rect, container: Size, colors: ShimmerColors) -> Self {
        let contents_rect = if container.is_empty() {
            Rect::default()
        } else {
            Rect::new(
                frame_in_view.x / container.width,
                frame_in_view.y / container.height,
                frame_in_view.width / container.width,
                frame_in_view.height / container.height,
            )
        };
        Self {
            contents_rect,
            colors,
        }
    }
}

/// A pooled skeleton drawn where an index is not yet known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placeholder {
    pub index: usize,
    /// Frame in content coordinates.
    pub frame: Rect,
    pub shimmer: ShimmerRegion,
}

/// Shimmer timing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShimmerConfig {
    /// One full top-to-bottom pass.
    pub period: Duration,
    /// Wait before the first pass.
    pub initial_delay: Duration,
}

impl Default for ShimmerConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(800),
            initial_delay: Duration::from_secs(1),
        }
    }
}

/// The single repeating sweep shared by every shimmering element.
#[derive(Debug, Clone)]
pub struct ShimmerSweep {
    sweep: Sweep,
}

impl ShimmerSweep {
    pub fn new(config: &ShimmerConfig) -> Self {
        Self {
            sweep: Sweep::new(config.period, config.initial_delay),
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        self.sweep.tick(dt);
    }

    /// Additive vertical offset for contents rectangles, running from
    /// `1.0` down to `-1.0` each period. Stays at `1.0` during the delay.
    pub fn phase(&self) -> f64 {
        1.0 - 2.0 * self.sweep.value()
    }

    pub fn is_running(&self) -> bool {
        self.sweep.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_is_normalized_to_container() {
        let region = ShimmerRegion::new(
            Rect::new(100.0, 200.0, 50.0, 80.0),
            Size::new(400.0, 800.0),
            ShimmerColors::new(0xFF11_1111, 0x80FF_FFFF),
        );
        assert_eq!(region.contents_rect, Rect::new(0.25, 0.25, 0.125, 0.1));
    }

    #[test]
    fn region_for_empty_container_is_zero() {
        let region = ShimmerRegion::new(
            Rect::new(1.0, 1.0, 1.0, 1.0),
            Size::ZERO,
            ShimmerColors::default(),
        );
        assert_eq!(region.contents_rect, Rect::default());
    }

    #[test]
    fn sweep_phase_runs_top_to_bottom_after_delay() {
        let mut sweep = ShimmerSweep::new(&ShimmerConfig::default());
        sweep.tick(Duration::from_millis(500));
        assert_eq!(sweep.phase(), 1.0);
        assert!(!sweep.is_running());
        sweep.tick(Duration::from_millis(900));
        assert!(sweep.is_running());
        assert!((sweep.phase() - 0.0).abs() < 1e-9);
    }
}
