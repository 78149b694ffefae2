//! Session configuration.
//!
//! Hosts configure the game at startup by providing:
//! - `GridSize`: Board dimensions (`rows * cols` must be even)
//! - `Spacing`: Distance between card centers in world units
//! - `Timings`: Every delay the orchestrator waits on, in seconds
//! - `SessionConfig`: Combines all of the above plus presentation tunables
//!
//! Configuration is plain data and can be loaded from JSON:
//!
//! ```
//! use memory_match::core::SessionConfig;
//!
//! let config = SessionConfig::from_json_str(r#"{ "grid": { "rows": 2, "cols": 2 } }"#).unwrap();
//! assert_eq!(config.grid.card_count(), 4);
//! assert_eq!(config.timings.display_time, 1.0); // defaults fill the rest
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Board dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: u32,
    pub cols: u32,
}

impl GridSize {
    #[must_use]
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells. Saturates on grids too large to count;
    /// `validate` rejects those.
    #[must_use]
    pub const fn card_count(self) -> u32 {
        self.rows.saturating_mul(self.cols)
    }

    /// Number of pairs on a full board.
    #[must_use]
    pub const fn pair_count(self) -> u32 {
        self.card_count() / 2
    }

    /// Check that the grid is non-empty and has an even number of cells.
    pub fn validate(self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let Some(count) = self.rows.checked_mul(self.cols) else {
            return Err(ConfigError::GridTooLarge {
                rows: self.rows,
                cols: self.cols,
            });
        };
        if count % 2 != 0 {
            return Err(ConfigError::OddCardCount {
                rows: self.rows,
                cols: self.cols,
                count,
            });
        }
        Ok(())
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(4, 3)
    }
}

/// Distance between neighbouring card centers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub x: f32,
    pub y: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self { x: 3.0, y: 4.0 }
    }
}

/// Delays the orchestrator waits on, in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// How long a single flip animation takes.
    pub flip_duration: f32,

    /// Wait after a flip so the pronunciation clip can finish before the
    /// next tap is accepted.
    pub audio_settle_time: f32,

    /// How long two revealed cards stay visible before resolution. Also the
    /// pause between the two retirement phases.
    pub display_time: f32,

    /// Length of each retirement phase.
    pub retire_time: f32,

    /// Length of a screen transition.
    pub transition_time: f32,

    /// Delay between consecutive card spawn animations.
    pub spawn_stagger: f32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            flip_duration: 0.5,
            audio_settle_time: 1.0,
            display_time: 1.0,
            retire_time: 1.0,
            transition_time: 1.0,
            spawn_stagger: 0.05,
        }
    }
}

impl Timings {
    /// Every timing set to zero. Useful for headless hosts and tests that
    /// only care about ordering.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            flip_duration: 0.0,
            audio_settle_time: 0.0,
            display_time: 0.0,
            retire_time: 0.0,
            transition_time: 0.0,
            spawn_stagger: 0.0,
        }
    }

    #[must_use]
    pub fn flip(&self) -> Duration {
        secs(self.flip_duration)
    }

    #[must_use]
    pub fn audio_settle(&self) -> Duration {
        secs(self.audio_settle_time)
    }

    #[must_use]
    pub fn display(&self) -> Duration {
        secs(self.display_time)
    }

    #[must_use]
    pub fn retire(&self) -> Duration {
        secs(self.retire_time)
    }

    #[must_use]
    pub fn transition(&self) -> Duration {
        secs(self.transition_time)
    }

    #[must_use]
    pub fn spawn_stagger(&self) -> Duration {
        secs(self.spawn_stagger)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("flip_duration", self.flip_duration),
            ("audio_settle_time", self.audio_settle_time),
            ("display_time", self.display_time),
            ("retire_time", self.retire_time),
            ("transition_time", self.transition_time),
            ("spawn_stagger", self.spawn_stagger),
        ];
        for (name, value) in fields {
            if !(0.0..=MAX_TIMING_SECS).contains(&value) {
                return Err(ConfigError::InvalidTiming { name, value });
            }
        }
        Ok(())
    }
}

/// Longest delay any single timing may ask for, in seconds.
pub const MAX_TIMING_SECS: f32 = 3600.0;

/// Out-of-range values are rejected by `validate`; here they clamp so an
/// unvalidated config still cannot panic.
fn secs(value: f32) -> Duration {
    if value.is_finite() && value > 0.0 {
        Duration::try_from_secs_f32(value.min(MAX_TIMING_SECS)).unwrap_or(Duration::ZERO)
    } else {
        Duration::ZERO
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Board dimensions.
    pub grid: GridSize,

    /// Card spacing on the grid.
    pub card_spacing: Spacing,

    /// Delays.
    pub timings: Timings,

    /// Final scale of a matched card at the end of the gather phase.
    pub retire_scale: f32,

    /// How big a card grows mid-flip.
    pub flip_scale: f32,

    /// How far a card moves towards the camera mid-flip.
    pub flip_forward_distance: f32,

    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            card_spacing: Spacing::default(),
            timings: Timings::default(),
            retire_scale: 1.1,
            flip_scale: 1.5,
            flip_forward_distance: 1.0,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Create a configuration with default tunables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid size.
    #[must_use]
    pub fn with_grid(mut self, rows: u32, cols: u32) -> Self {
        self.grid = GridSize::new(rows, cols);
        self
    }

    /// Set the card spacing.
    #[must_use]
    pub fn with_spacing(mut self, x: f32, y: f32) -> Self {
        self.card_spacing = Spacing { x, y };
        self
    }

    /// Replace all timings.
    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Pin the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        self.timings.validate()?;
        for (name, value) in [("retire_scale", self.retire_scale), ("flip_scale", self.flip_scale)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidScale { name, value });
            }
        }
        Ok(())
    }

    /// Parse a configuration from JSON. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            what: "session config",
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.grid.card_count(), 12);
        assert_eq!(config.timings.flip(), Duration::from_millis(500));
        assert_eq!(config.timings.audio_settle(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_grid_validation() {
        assert!(GridSize::new(2, 2).validate().is_ok());
        assert!(matches!(
            GridSize::new(3, 3).validate(),
            Err(ConfigError::OddCardCount { count: 9, .. })
        ));
        assert!(matches!(
            GridSize::new(0, 4).validate(),
            Err(ConfigError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn test_builder() {
        let config = SessionConfig::new()
            .with_grid(2, 4)
            .with_spacing(1.0, 2.0)
            .with_timings(Timings::instant())
            .with_seed(5);

        assert_eq!(config.grid.pair_count(), 4);
        assert_eq!(config.card_spacing, Spacing { x: 1.0, y: 2.0 });
        assert_eq!(config.timings.display(), Duration::ZERO);
        assert_eq!(config.seed, Some(5));
    }

    #[test]
    fn test_negative_timing_rejected() {
        let mut config = SessionConfig::default();
        config.timings.display_time = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTiming { name: "display_time", .. })
        ));
    }

    #[test]
    fn test_oversized_grid_rejected() {
        assert!(matches!(
            GridSize::new(65536, 65536).validate(),
            Err(ConfigError::GridTooLarge { rows: 65536, cols: 65536 })
        ));
        assert_eq!(GridSize::new(65536, 65536).card_count(), u32::MAX);
    }

    #[test]
    fn test_huge_timing_rejected() {
        let result = SessionConfig::from_json_str(r#"{ "timings": { "flip_duration": 1e30 } }"#);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidTiming { name: "flip_duration", .. })
        ));

        let mut config = SessionConfig::default();
        config.timings.transition_time = MAX_TIMING_SECS + 1.0;
        assert!(config.validate().is_err());
        config.timings.transition_time = MAX_TIMING_SECS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unvalidated_timings_clamp() {
        let timings = Timings {
            flip_duration: 1e30,
            display_time: f32::NAN,
            retire_time: -2.0,
            ..Timings::default()
        };
        assert_eq!(timings.flip(), Duration::from_secs(3600));
        assert_eq!(timings.display(), Duration::ZERO);
        assert_eq!(timings.retire(), Duration::ZERO);
    }

    #[test]
    fn test_zero_scale_rejected() {
        let mut config = SessionConfig::default();
        config.retire_scale = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidScale { name: "retire_scale", .. })
        ));
    }

    #[test]
    fn test_json_partial_and_invalid() {
        let config = SessionConfig::from_json_str(
            r#"{ "grid": { "rows": 2, "cols": 3 }, "timings": { "flip_duration": 0.25 }, "seed": 11 }"#,
        )
        .unwrap();
        assert_eq!(config.grid, GridSize::new(2, 3));
        assert_eq!(config.timings.flip(), Duration::from_millis(250));
        assert_eq!(config.timings.display_time, 1.0);
        assert_eq!(config.seed, Some(11));

        let odd = SessionConfig::from_json_str(r#"{ "grid": { "rows": 1, "cols": 3 } }"#);
        assert!(matches!(odd, Err(ConfigError::OddCardCount { .. })));

        let garbage = SessionConfig::from_json_str("not json");
        assert!(matches!(garbage, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = SessionConfig::from_path("/definitely/not/here.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
