//! Breathing-mode classification from the smoothed MAR.
//!
//! Two thresholds split the MAR axis into three bands. Both thresholds are
//! inclusive and the upper band is checked first:
//!
//! ```text
//!   smoothed <= low          -> Nasal
//!   low < smoothed < high    -> Unknown
//!   smoothed >= high         -> Mouth
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_THRESHOLD_HIGH, DEFAULT_THRESHOLD_LOW, DEFAULT_WINDOW_SEC};
use crate::{Error, Result};

/// Breathing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouthState {
    /// Mouth closed, breathing through the nose
    Nasal,
    /// Mouth open
    Mouth,
    /// Between the thresholds
    Unknown,
}

impl MouthState {
    /// All states in display order
    pub const ALL: [Self; 3] = [Self::Nasal, Self::Mouth, Self::Unknown];

    /// State name as printed in reports
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nasal => "Nasal",
            Self::Mouth => "Mouth",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for MouthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification thresholds, `high > low` guaranteed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    high: f64,
    low: f64,
}

impl Thresholds {
    /// Create thresholds
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` unless both values are finite and `high > low`
    pub fn new(high: f64, low: f64) -> Result<Self> {
        if !high.is_finite() || !low.is_finite() {
            return Err(Error::ConfigError(format!(
                "Thresholds must be finite (high={high}, low={low})"
            )));
        }
        if high <= low {
            return Err(Error::ConfigError(format!(
                "High threshold ({high}) must be greater than low threshold ({low})"
            )));
        }
        Ok(Self { high, low })
    }

    /// Upper threshold
    #[must_use]
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Lower threshold
    #[must_use]
    pub fn low(&self) -> f64 {
        self.low
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high: DEFAULT_THRESHOLD_HIGH,
            low: DEFAULT_THRESHOLD_LOW,
        }
    }
}

/// Maps a smoothed MAR to a [`MouthState`]
#[derive(Debug, Clone)]
pub struct MouthStateScorer {
    thresholds: Thresholds,
    window_sec: u32,
}

impl MouthStateScorer {
    /// Create a scorer.
    ///
    /// `window_sec` is informational: it describes the smoothing window the
    /// caller sizes its moving average with and does not affect classification.
    #[must_use]
    pub fn new(thresholds: Thresholds, window_sec: u32) -> Self {
        Self {
            thresholds,
            window_sec,
        }
    }

    /// Classify a frame.
    ///
    /// `raw_mar` is accepted alongside the smoothed value but does not take
    /// part in the decision.
    #[must_use]
    pub fn classify(&self, _raw_mar: f64, smoothed_mar: f64) -> MouthState {
        if smoothed_mar >= self.thresholds.high {
            MouthState::Mouth
        } else if smoothed_mar <= self.thresholds.low {
            MouthState::Nasal
        } else {
            MouthState::Unknown
        }
    }

    /// Current thresholds
    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Replace both thresholds at runtime
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the new pair is not strictly ordered; the
    /// previous thresholds are kept in that case
    pub fn set_thresholds(&mut self, high: f64, low: f64) -> Result<()> {
        self.thresholds = Thresholds::new(high, low)?;
        Ok(())
    }

    /// Smoothing window length in seconds
    #[must_use]
    pub fn window_sec(&self) -> u32 {
        self.window_sec
    }
}

impl Default for MouthStateScorer {
    fn default() -> Self {
        Self::new(Thresholds::default(), DEFAULT_WINDOW_SEC)
    }
}
