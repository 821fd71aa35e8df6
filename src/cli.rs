//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use log::info;

use crate::{config::Config, Result};

/// Watches lip landmarks and reports whether the subject breathes through
/// the mouth or the nose
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Landmark log to replay instead of a live camera
    #[arg(short, long, value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Camera index to use
    #[arg(long)]
    pub cam: Option<u32>,

    /// Expected frame rate of the source
    #[arg(long)]
    pub fps: Option<f64>,

    /// Smoothed MAR at or above which the mouth counts as open
    #[arg(long)]
    pub threshold_high: Option<f64>,

    /// Smoothed MAR at or below which breathing counts as nasal
    #[arg(long)]
    pub threshold_low: Option<f64>,

    /// Smoothing window length in seconds
    #[arg(short, long)]
    pub window_sec: Option<u32>,

    /// Stop after this many seconds of stream time
    #[arg(long, value_name = "SECONDS")]
    pub duration: Option<f64>,

    /// Disable mouth-breathing onset alerts
    #[arg(long)]
    pub no_alerts: bool,

    /// Replay as fast as possible instead of at the frame rate
    #[arg(long)]
    pub fast: bool,

    /// Print session statistics on exit
    #[arg(short, long)]
    pub summary: bool,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,
}

impl Args {
    /// Overlay the flags that were given onto `config`
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(cam) = self.cam {
            config.capture.device_index = cam;
        }
        if let Some(fps) = self.fps {
            config.capture.expected_fps = fps;
        }
        if let Some(high) = self.threshold_high {
            config.classifier.threshold_high = high;
        }
        if let Some(low) = self.threshold_low {
            config.classifier.threshold_low = low;
        }
        if let Some(window_sec) = self.window_sec {
            config.classifier.window_sec = window_sec;
        }
        if let Some(duration) = self.duration {
            config.session.duration_limit_sec = Some(duration);
        }
        if self.no_alerts {
            config.alert.enabled = false;
        }
        if self.fast {
            config.capture.realtime = false;
        }
    }

    /// Load the config file if one was given, apply overrides and validate
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or the resulting
    /// configuration is invalid
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading configuration from: {}", path.display());
                Config::from_file(path)?
            }
            None => Config::default(),
        };
        self.apply_to(&mut config);
        config.validate()?;
        Ok(config)
    }
}
