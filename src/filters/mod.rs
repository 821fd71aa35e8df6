//! Signal filtering for the per-frame MAR stream.
//!
//! Raw MAR values jitter from frame to frame with landmark noise. The
//! classifier works on a smoothed value instead.

/// Moving average over a fixed number of recent samples
pub mod moving_average;

pub use moving_average::MovingAverage;
