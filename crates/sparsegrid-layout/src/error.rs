#![forbid(unsafe_code)]

use thiserror::Error;

/// Rejected grid configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("zoom ladder must contain at least one level")]
    EmptyZoomLadder,
    #[error("zoom ladder must be strictly increasing, found {next} after {previous}")]
    ZoomLadderNotIncreasing { previous: u32, next: u32 },
    #[error("zoom level must be positive")]
    ZeroZoomLevel,
    #[error("initial zoom level {0} is not on the zoom ladder")]
    InitialZoomNotOnLadder(u32),
    #[error("commit threshold {0} must lie strictly between 0 and 1")]
    CommitThresholdOutOfRange(f64),
    #[error("source fade start {0} must lie in [0, 1)")]
    FadeStartOutOfRange(f64),
    #[error("zoom-in scale factor {0} must be greater than 1")]
    ScaleFactorTooSmall(f64),
    #[error("pixel scale {0} must be positive")]
    NonPositivePixelScale(f64),
    #[error("item spacing {0} must not be negative")]
    NegativeSpacing(f64),
    #[error("maximum item width {0} must be positive")]
    NonPositiveMaxItemWidth(f64),
    #[error("minimum indicator height {0} must be positive")]
    NonPositiveIndicatorHeight(f64),
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}
