//! Constants used throughout the application

/// Smoothed MAR at or above which the mouth is considered open
pub const DEFAULT_THRESHOLD_HIGH: f64 = 0.62;

/// Smoothed MAR at or below which breathing is considered nasal
pub const DEFAULT_THRESHOLD_LOW: f64 = 0.45;

/// Length of the smoothing window in seconds
pub const DEFAULT_WINDOW_SEC: u32 = 2;

/// Frame rate the smoothing window is sized against
pub const DEFAULT_EXPECTED_FPS: f64 = 10.0;

/// Smoother capacity for the default window and frame rate (2 s at 10 fps)
pub const DEFAULT_WINDOW_SIZE: usize = 20;

/// Continuous mouth-open time before an alert fires
pub const DEFAULT_ALERT_MIN_DURATION_SEC: f64 = 1.0;

/// Minimum time between two alerts
pub const DEFAULT_ALERT_COOLDOWN_SEC: f64 = 300.0;

/// Number of frame records kept in the session history
pub const DEFAULT_HISTORY_CAPACITY: usize = 300;

/// MAR substituted for frames where no face was found
pub const NO_FACE_MAR: f64 = 0.0;

/// Upper bound on buffer space reserved up front; larger windows grow on demand
pub const MAX_PREALLOCATED_SAMPLES: usize = 1024;

/// Largest accepted session history
pub const MAX_HISTORY_CAPACITY: usize = 1_000_000;

/// How often the driver wakes up to check for shutdown while waiting on frames
pub const SHUTDOWN_POLL_MS: u64 = 100;

/// Numeric precision epsilon
pub const EPSILON: f64 = 1e-9;
