//! Mouth-breathing detection from lip landmarks.
//!
//! Each frame goes through a fixed signal path:
//! 1. Lip landmarks (upper and lower lip point) come from a landmark detector
//! 2. The mouth aspect ratio (MAR) is the vertical distance between them
//! 3. A moving average over the last couple of seconds smooths the MAR
//! 4. Two thresholds classify the smoothed value as `Nasal`, `Mouth` or `Unknown`
//!
//! A frame without a face counts as MAR 0.0 and still enters the average.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use mouth_breath_monitor::{
//!     classifier::{MouthState, MouthStateScorer},
//!     landmarks::{LandmarkPair, Point},
//!     pipeline::MarPipeline,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pipeline = MarPipeline::new(20, MouthStateScorer::default())?;
//!
//! let open = LandmarkPair::new(Point::new(50.0, 0.0), Point::new(50.0, 0.7));
//! let first = pipeline.process(Some(&open));
//! assert_eq!(first.state, MouthState::Mouth);
//!
//! // No face: MAR 0.0 pulls the average down to 0.35
//! let second = pipeline.process(None);
//! assert_eq!(second.state, MouthState::Nasal);
//! # Ok(())
//! # }
//! ```
//!
//! ## Replaying a Landmark Log
//!
//! ```no_run
//! use mouth_breath_monitor::{
//!     app::MonitorApp,
//!     config::Config,
//!     landmarks::AnnotationDetector,
//!     report::ConsoleSink,
//!     source::ReplaySource,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let mut source = ReplaySource::from_file("session.log", config.capture.expected_fps)?;
//! let mut app = MonitorApp::new(&config, Box::new(AnnotationDetector), ConsoleSink::stdout())?;
//!
//! app.run(&mut source)?;
//! println!("{}", app.stats());
//! # Ok(())
//! # }
//! ```

/// Lip landmarks, frames and the detector interface
pub mod landmarks;

/// Mouth aspect ratio computation
pub mod mar;

/// Signal filtering algorithms for smoothing the MAR
pub mod filters;

/// Breathing-mode classification
pub mod classifier;

/// Per-frame MAR → smoothing → classification path
pub mod pipeline;

/// Per-frame report records and sinks
pub mod report;

/// Mouth-breathing onset alerts
pub mod alert;

/// Session statistics
pub mod session;

/// Frame sources (replay logs, camera)
pub mod source;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Command line arguments
pub mod cli;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
