//! Configuration management for the mouth-breathing monitor

use crate::{
    classifier::{MouthStateScorer, Thresholds},
    constants::{
        DEFAULT_ALERT_COOLDOWN_SEC, DEFAULT_ALERT_MIN_DURATION_SEC, DEFAULT_EXPECTED_FPS,
        DEFAULT_HISTORY_CAPACITY, DEFAULT_THRESHOLD_HIGH, DEFAULT_THRESHOLD_LOW, DEFAULT_WINDOW_SEC,
        MAX_HISTORY_CAPACITY,
    },
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Classification thresholds and smoothing window
    pub classifier: ClassifierConfig,

    /// Frame source configuration
    pub capture: CaptureConfig,

    /// Onset alert configuration
    pub alert: AlertConfig,

    /// Session bookkeeping
    pub session: SessionConfig,
}

/// Classifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Smoothed MAR at or above which the mouth counts as open
    pub threshold_high: f64,

    /// Smoothed MAR at or below which breathing counts as nasal
    pub threshold_low: f64,

    /// Smoothing window length in seconds
    pub window_sec: u32,
}

/// Frame source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Frame rate the source delivers at; sizes the smoothing window
    pub expected_fps: f64,

    /// Camera device index
    pub device_index: u32,

    /// Pace replays at the frame rate
    pub realtime: bool,
}

/// Onset alert configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Enable onset alerts
    pub enabled: bool,

    /// Continuous mouth-open time before an alert fires
    pub min_duration_sec: f64,

    /// Minimum time between two alerts
    pub cooldown_sec: f64,
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of recent frame records kept
    pub history_capacity: usize,

    /// Stop monitoring after this many seconds of stream time
    pub duration_limit_sec: Option<f64>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            threshold_high: DEFAULT_THRESHOLD_HIGH,
            threshold_low: DEFAULT_THRESHOLD_LOW,
            window_sec: DEFAULT_WINDOW_SEC,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            expected_fps: DEFAULT_EXPECTED_FPS,
            device_index: 0,
            realtime: true,
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_duration_sec: DEFAULT_ALERT_MIN_DURATION_SEC,
            cooldown_sec: DEFAULT_ALERT_COOLDOWN_SEC,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            duration_limit_sec: None,
        }
    }
}

fn non_negative_secs(name: &str, value: f64) -> Result<Duration> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::ConfigError(format!(
            "{name} must be a non-negative number of seconds, got {value}"
        )));
    }
    Duration::try_from_secs_f64(value)
        .map_err(|e| Error::ConfigError(format!("{name} of {value}s is out of range: {e}")))
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read or `ConfigError` if it
    /// does not parse
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Smoothing window in frames: `window_sec × expected_fps`, rounded.
    ///
    /// Returns 0 when the product is not a usable count; `validate` rejects
    /// that case.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn window_size(&self) -> usize {
        let frames = (f64::from(self.classifier.window_sec) * self.capture.expected_fps).round();
        if frames.is_finite() && frames >= 1.0 && frames <= f64::from(u32::MAX) {
            frames as usize
        } else {
            0
        }
    }

    /// Validated classification thresholds
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` unless `threshold_high > threshold_low`
    pub fn thresholds(&self) -> Result<Thresholds> {
        Thresholds::new(self.classifier.threshold_high, self.classifier.threshold_low)
    }

    /// Build the state classifier
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for invalid thresholds
    pub fn scorer(&self) -> Result<MouthStateScorer> {
        Ok(MouthStateScorer::new(self.thresholds()?, self.classifier.window_sec))
    }

    /// Alert minimum duration and cooldown
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for negative, non-finite or out-of-range values
    pub fn alert_timing(&self) -> Result<(Duration, Duration)> {
        Ok((
            non_negative_secs("Alert minimum duration", self.alert.min_duration_sec)?,
            non_negative_secs("Alert cooldown", self.alert.cooldown_sec)?,
        ))
    }

    /// Optional stream-time limit
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for negative, non-finite or out-of-range values
    pub fn duration_limit(&self) -> Result<Option<Duration>> {
        self.session
            .duration_limit_sec
            .map(|secs| non_negative_secs("Duration limit", secs))
            .transpose()
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` describing the first invalid setting
    pub fn validate(&self) -> Result<()> {
        self.thresholds()?;

        if self.classifier.window_sec == 0 {
            return Err(Error::ConfigError("Window length must be at least 1 second".to_string()));
        }
        if !self.capture.expected_fps.is_finite() || self.capture.expected_fps <= 0.0 {
            return Err(Error::ConfigError(format!(
                "Expected frame rate must be positive, got {}",
                self.capture.expected_fps
            )));
        }
        if self.window_size() == 0 {
            return Err(Error::ConfigError(format!(
                "Window of {}s at {} fps does not cover a single frame",
                self.classifier.window_sec, self.capture.expected_fps
            )));
        }

        self.alert_timing()?;
        self.duration_limit()?;

        if self.session.history_capacity == 0 {
            return Err(Error::ConfigError("History capacity must be greater than 0".to_string()));
        }
        if self.session.history_capacity > MAX_HISTORY_CAPACITY {
            return Err(Error::ConfigError(format!(
                "History capacity must be at most {MAX_HISTORY_CAPACITY}, got {}",
                self.session.history_capacity
            )));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r"# Mouth Breathing Monitor Configuration

# State classification
classifier:
  threshold_high: 0.62
  threshold_low: 0.45
  window_sec: 2

# Frame source
capture:
  expected_fps: 10.0
  device_index: 0
  realtime: true

# Onset alerts
alert:
  enabled: true
  min_duration_sec: 1.0
  cooldown_sec: 300.0

# Session
session:
  history_capacity: 300
  # duration_limit_sec: 600.0
";
