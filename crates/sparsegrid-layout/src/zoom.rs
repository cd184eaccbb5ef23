#![forbid(unsafe_code)]

//! Discrete zoom levels.
//!
//! A zoom level is a percentage applied to the base item width. Higher
//! levels mean larger items and fewer items per row.

use std::fmt;

use crate::error::ConfigError;

/// A percentage-style item density. `100` is the natural size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ZoomLevel(u32);

impl ZoomLevel {
    pub const DEFAULT: ZoomLevel = ZoomLevel(100);

    pub const fn new(percent: u32) -> Self {
        Self(percent)
    }

    pub const fn percent(self) -> u32 {
        self.0
    }

    /// Multiplier relative to the base item width.
    pub fn scale(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl From<u32> for ZoomLevel {
    fn from(percent: u32) -> Self {
        Self(percent)
    }
}

/// Neighbors of a zoom level on a ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZoomSteps {
    /// Next smaller level (more items per row).
    pub decrement: Option<ZoomLevel>,
    /// Next larger level (fewer items per row).
    pub increment: Option<ZoomLevel>,
}

/// Strictly increasing sequence of zoom levels.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<u32>", into = "Vec<u32>"))]
pub struct ZoomLadder {
    levels: Vec<ZoomLevel>,
}

impl ZoomLadder {
    /// The stock ladder: 25, 40, 75, 100, 150.
    pub const STANDARD: [u32; 5] = [25, 40, 75, 100, 150];

    pub fn new(levels: impl IntoIterator<Item = u32>) -> Result<Self, ConfigError> {
        let levels: Vec<ZoomLevel> = levels.into_iter().map(ZoomLevel).collect();
        if levels.is_empty() {
            return Err(ConfigError::EmptyZoomLadder);
        }
        if levels.iter().any(|level| level.0 == 0) {
            return Err(ConfigError::ZeroZoomLevel);
        }
        if let Some(pair) = levels.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::ZoomLadderNotIncreasing {
                previous: pair[0].0,
                next: pair[1].0,
            });
        }
        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[ZoomLevel] {
        &self.levels
    }

    pub fn contains(&self, level: ZoomLevel) -> bool {
        self.levels.binary_search(&level).is_ok()
    }

    /// Adjacent levels around `level`. Works for levels not on the ladder too.
    pub fn neighbors(&self, level: ZoomLevel) -> ZoomSteps {
        let (below, above) = match self.levels.binary_search(&level) {
            Ok(position) => (position.checked_sub(1), position + 1),
            Err(insert) => (insert.checked_sub(1), insert),
        };
        ZoomSteps {
            decrement: below.and_then(|i| self.levels.get(i).copied()),
            increment: self.levels.get(above).copied(),
        }
    }

    /// One step toward larger items (`zoom_in`) or smaller items.
    pub fn step(&self, level: ZoomLevel, zoom_in: bool) -> Option<ZoomLevel> {
        let steps = self.neighbors(level);
        if zoom_in {
            steps.increment
        } else {
            steps.decrement
        }
    }
}

impl Default for ZoomLadder {
    fn default() -> Self {
        Self {
            levels: Self::STANDARD.iter().copied().map(ZoomLevel).collect(),
        }
    }
}

impl TryFrom<Vec<u32>> for ZoomLadder {
    type Error = ConfigError;

    fn try_from(levels: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(levels)
    }
}

impl From<ZoomLadder> for Vec<u32> {
    fn from(ladder: ZoomLadder) -> Self {
        ladder.levels.into_iter().map(ZoomLevel::percent).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ladder_is_standard() {
        let ladder = ZoomLadder::default();
        let percents: Vec<u32> = ladder.levels().iter().map(|l| l.percent()).collect();
        assert_eq!(percents, vec![25, 40, 75, 100, 150]);
    }

    #[test]
    fn rejects_bad_ladders() {
        assert_eq!(ZoomLadder::new(Vec::<u32>::new()), Err(ConfigError::EmptyZoomLadder));
        assert_eq!(
            ZoomLadder::new([25, 25, 40]),
            Err(ConfigError::ZoomLadderNotIncreasing {
                previous: 25,
                next: 25
            })
        );
        assert_eq!(ZoomLadder::new([0, 50]), Err(ConfigError::ZeroZoomLevel));
    }

    #[test]
    fn neighbors_on_ladder() {
        let ladder = ZoomLadder::default();
        let steps = ladder.neighbors(ZoomLevel::new(100));
        assert_eq!(steps.decrement, Some(ZoomLevel::new(75)));
        assert_eq!(steps.increment, Some(ZoomLevel::new(150)));
    }

    #[test]
    fn neighbors_at_ends() {
        let ladder = ZoomLadder::default();
        assert_eq!(ladder.neighbors(ZoomLevel::new(25)).decrement, None);
        assert_eq!(ladder.neighbors(ZoomLevel::new(150)).increment, None);
    }

    #[test]
    fn neighbors_off_ladder() {
        let ladder = ZoomLadder::default();
        let steps = ladder.neighbors(ZoomLevel::new(90));
        assert_eq!(steps.decrement, Some(ZoomLevel::new(75)));
        assert_eq!(steps.increment, Some(ZoomLevel::new(100)));
    }

    #[test]
    fn step_direction() {
        let ladder = ZoomLadder::new([100, 150, 225]).unwrap();
        assert_eq!(ladder.step(ZoomLevel::new(150), true), Some(ZoomLevel::new(225)));
        assert_eq!(ladder.step(ZoomLevel::new(150), false), Some(ZoomLevel::new(100)));
    }

    #[test]
    fn display_and_scale() {
        assert_eq!(ZoomLevel::new(75).to_string(), "75%");
        assert!((ZoomLevel::new(150).scale() - 1.5).abs() < 1e-12);
    }
}
