#![forbid(unsafe_code)]

//! Engine configuration.
//!
//! Every tunable lives in [`GridConfig`]. Defaults reproduce the stock
//! behavior; [`GridConfig::validate`] is run by the engine constructor.

use std::time::Duration;

use sparsegrid_core::geometry::Point;
use sparsegrid_layout::{ConfigError, LayoutMetrics, ZoomLadder, ZoomLevel};

use crate::shimmer::ShimmerConfig;

/// Pinch and discrete zoom transition tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoomTransitionConfig {
    /// Released progress below this reverts, otherwise commits.
    pub commit_threshold: f64,
    /// Progress at which the source viewport starts fading out.
    pub source_fade_start: f64,
    /// Animation to the nearest endpoint after a pinch ends.
    pub settle_duration: Duration,
    /// Length of a programmatic zoom change.
    pub discrete_duration: Duration,
    /// Container point used to pick the anchor for programmatic changes.
    pub discrete_anchor: Point,
    /// Pinch scale ratio that spans one zoom step.
    pub zoom_in_scale_factor: f64,
}

impl Default for ZoomTransitionConfig {
    fn default() -> Self {
        Self {
            commit_threshold: 0.3,
            source_fade_start: 0.6,
            settle_duration: Duration::from_millis(200),
            discrete_duration: Duration::from_millis(250),
            discrete_anchor: Point::new(0.0, 10.0),
            zoom_in_scale_factor: 2.0,
        }
    }
}

/// Fast-scroll indicator geometry and timing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FastScrollConfig {
    pub min_indicator_height: f64,
    /// Gap between the track ends and the container insets.
    pub indicator_vertical_inset: f64,
    /// Idle time before the indicators fade out.
    pub auto_hide_delay: Duration,
    /// Hold time before a drag expands the label.
    pub dwell_delay: Duration,
    pub fade_duration: Duration,
    pub label_height: f64,
    /// Horizontal padding added around the label text.
    pub label_padding: f64,
    /// Width of one terminal-style column of label text.
    pub label_glyph_advance: f64,
    pub label_trailing_inset: f64,
    pub line_width: f64,
    pub line_width_dragging: f64,
    pub line_trailing_inset: f64,
    /// Label shift when a drag began away from the label.
    pub label_nudge: f64,
    /// Label shift when a drag began on the label.
    pub label_expanded_offset: f64,
    /// Extra touch area around the line indicator, `(dx, dy)`.
    pub line_hit_slop: (f64, f64),
}

impl Default for FastScrollConfig {
    fn default() -> Self {
        Self {
            min_indicator_height: 35.0,
            indicator_vertical_inset: 3.0,
            auto_hide_delay: Duration::from_secs(2),
            dwell_delay: Duration::from_millis(200),
            fade_duration: Duration::from_millis(300),
            label_height: 32.0,
            label_padding: 26.0,
            label_glyph_advance: 7.0,
            label_trailing_inset: 12.0,
            line_width: 3.0,
            line_width_dragging: 6.0,
            line_trailing_inset: 3.0,
            label_nudge: -3.0,
            label_expanded_offset: -80.0,
            line_hit_slop: (4.0, 2.0),
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    pub zoom_ladder: ZoomLadder,
    pub initial_zoom: ZoomLevel,
    pub layout: LayoutMetrics,
    pub zoom: ZoomTransitionConfig,
    pub fast_scroll: FastScrollConfig,
    pub shimmer: ShimmerConfig,
    /// Animated scrolls (scroll to top, inset snapping).
    pub scroll_animation_duration: Duration,
    pub covering_snap_duration: Duration,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            zoom_ladder: ZoomLadder::default(),
            initial_zoom: ZoomLevel::DEFAULT,
            layout: LayoutMetrics::default(),
            zoom: ZoomTransitionConfig::default(),
            fast_scroll: FastScrollConfig::default(),
            shimmer: ShimmerConfig::default(),
            scroll_animation_duration: Duration::from_millis(300),
            covering_snap_duration: Duration::from_millis(200),
        }
    }
}

impl GridConfig {
    #[must_use]
    pub fn with_zoom_ladder(mut self, ladder: ZoomLadder) -> Self {
        self.zoom_ladder = ladder;
        self
    }

    #[must_use]
    pub fn with_initial_zoom(mut self, zoom: ZoomLevel) -> Self {
        self.initial_zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutMetrics) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_zoom_transition(mut self, zoom: ZoomTransitionConfig) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_fast_scroll(mut self, fast_scroll: FastScrollConfig) -> Self {
        self.fast_scroll = fast_scroll;
        self
    }

    #[must_use]
    pub fn with_shimmer(mut self, shimmer: ShimmerConfig) -> Self {
        self.shimmer = shimmer;
        self
    }

    #[must_use]
    pub fn with_scroll_animation_duration(mut self, duration: Duration) -> Self {
        self.scroll_animation_duration = duration;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.zoom_ladder.contains(self.initial_zoom) {
            return Err(ConfigError::InitialZoomNotOnLadder(self.initial_zoom.percent()));
        }
        let zoom = &self.zoom;
        if !(zoom.commit_threshold > 0.0 && zoom.commit_threshold < 1.0) {
            return Err(ConfigError::CommitThresholdOutOfRange(zoom.commit_threshold));
        }
        if !(zoom.source_fade_start >= 0.0 && zoom.source_fade_start < 1.0) {
            return Err(ConfigError::FadeStartOutOfRange(zoom.source_fade_start));
        }
        if !(zoom.zoom_in_scale_factor > 1.0) {
            return Err(ConfigError::ScaleFactorTooSmall(zoom.zoom_in_scale_factor));
        }
        let layout = &self.layout;
        if !(layout.pixel_scale > 0.0) {
            return Err(ConfigError::NonPositivePixelScale(layout.pixel_scale));
        }
        if !(layout.item_spacing >= 0.0) {
            return Err(ConfigError::NegativeSpacing(layout.item_spacing));
        }
        if !(layout.max_item_width > 0.0) {
            return Err(ConfigError::NonPositiveMaxItemWidth(layout.max_item_width));
        }
        if !(self.fast_scroll.min_indicator_height > 0.0) {
            return Err(ConfigError::NonPositiveIndicatorHeight(
                self.fast_scroll.min_indicator_height,
            ));
        }
        Ok(())
    }

    /// Parse a JSON document (missing fields take defaults) and validate it.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GridConfig::default().validate(), Ok(()));
    }

    #[test]
    fn initial_zoom_must_be_on_ladder() {
        let config = GridConfig::default().with_initial_zoom(ZoomLevel::new(90));
        assert_eq!(config.validate(), Err(ConfigError::InitialZoomNotOnLadder(90)));
    }

    #[test]
    fn rejects_out_of_range_thresholds() {
        let mut config = GridConfig::default();
        config.zoom.commit_threshold = 1.0;
        assert_eq!(config.validate(), Err(ConfigError::CommitThresholdOutOfRange(1.0)));

        let mut config = GridConfig::default();
        config.zoom.source_fade_start = 1.0;
        assert_eq!(config.validate(), Err(ConfigError::FadeStartOutOfRange(1.0)));

        let mut config = GridConfig::default();
        config.zoom.zoom_in_scale_factor = 1.0;
        assert_eq!(config.validate(), Err(ConfigError::ScaleFactorTooSmall(1.0)));
    }

    #[test]
    fn rejects_bad_layout_metrics() {
        let config = GridConfig::default().with_layout(LayoutMetrics::default().with_pixel_scale(0.0));
        assert_eq!(config.validate(), Err(ConfigError::NonPositivePixelScale(0.0)));

        let config =
            GridConfig::default().with_layout(LayoutMetrics::default().with_item_spacing(-1.0));
        assert_eq!(config.validate(), Err(ConfigError::NegativeSpacing(-1.0)));

        let mut config = GridConfig::default();
        config.fast_scroll.min_indicator_height = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveIndicatorHeight(0.0)));
    }

    #[test]
    fn rejects_nan() {
        let mut config = GridConfig::default();
        config.zoom.commit_threshold = f64::NAN;
        assert!(config.validate().is_err());
    }
}
