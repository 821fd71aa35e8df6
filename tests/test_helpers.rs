//! Helper functions and utilities for tests

#![allow(dead_code)]

use mouth_breath_monitor::landmarks::{LandmarkPair, Point};

/// Lip landmarks whose MAR is exactly `gap`
pub fn lips(gap: f64) -> LandmarkPair {
    LandmarkPair::new(Point::new(50.0, 0.0), Point::new(50.0, gap))
}

/// Assert two floats agree within `tolerance`
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}
