use std::collections::VecDeque;

use crate::{constants::MAX_PREALLOCATED_SAMPLES, Error, Result};

/// Moving average over the most recent `window_size` values.
///
/// The sum of the retained values is kept incrementally, so an update costs
/// O(1) regardless of the window size. Until the window fills, the mean is
/// taken over the values seen so far.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    window_size: usize,
    window: VecDeque<f64>,
    sum: f64,
}

impl MovingAverage {
    /// Create a moving average with the given capacity
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `window_size` is 0
    pub fn new(window_size: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(Error::ConfigError(
                "Window size must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            window_size,
            window: VecDeque::with_capacity(window_size.min(MAX_PREALLOCATED_SAMPLES) + 1),
            sum: 0.0,
        })
    }

    /// Push a value and return the mean of the retained values
    pub fn update(&mut self, value: f64) -> f64 {
        self.window.push_back(value);
        self.sum += value;

        // One push per call, so at most one eviction
        if self.window.len() > self.window_size {
            if let Some(oldest) = self.window.pop_front() {
                self.sum -= oldest;
            }
        }

        self.sum / self.window.len() as f64
    }

    /// Current mean, or `None` before the first update
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        if self.window.is_empty() {
            None
        } else {
            Some(self.sum / self.window.len() as f64)
        }
    }

    /// Running sum of the retained values
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Configured capacity
    #[must_use]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Number of retained values
    #[must_use]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Whether no value has been pushed yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Whether the window holds `window_size` values
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.window.len() == self.window_size
    }

    /// Retained values, oldest first
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.window.iter().copied()
    }

    /// Drop all retained values
    pub fn reset(&mut self) {
        self.window.clear();
        self.sum = 0.0;
    }
}
