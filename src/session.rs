//! Session statistics for a monitoring run.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use crate::{classifier::MouthState, constants::MAX_PREALLOCATED_SAMPLES, report::FrameRecord};

/// Running totals and a bounded record history
#[derive(Debug, Clone)]
pub struct SessionStats {
    frame_interval: Duration,
    history_capacity: usize,
    history: VecDeque<FrameRecord>,
    frames: u64,
    frames_without_face: u64,
    nasal: u64,
    mouth: u64,
    unknown: u64,
    mouth_time: Duration,
    alerts: u64,
}

impl SessionStats {
    /// Create statistics for a stream at `expected_fps`, keeping the latest
    /// `history_capacity` records
    #[must_use]
    pub fn new(expected_fps: f64, history_capacity: usize) -> Self {
        let frame_interval = if expected_fps.is_finite() && expected_fps > 0.0 {
            Duration::from_secs_f64(1.0 / expected_fps)
        } else {
            Duration::ZERO
        };
        Self {
            frame_interval,
            history_capacity,
            history: VecDeque::with_capacity(history_capacity.min(MAX_PREALLOCATED_SAMPLES)),
            frames: 0,
            frames_without_face: 0,
            nasal: 0,
            mouth: 0,
            unknown: 0,
            mouth_time: Duration::ZERO,
            alerts: 0,
        }
    }

    /// Account for a processed frame
    pub fn record(&mut self, record: &FrameRecord) {
        self.frames += 1;
        if !record.measurement.face_detected {
            self.frames_without_face += 1;
        }
        match record.state() {
            MouthState::Nasal => self.nasal += 1,
            MouthState::Mouth => {
                self.mouth += 1;
                self.mouth_time += self.frame_interval;
            }
            MouthState::Unknown => self.unknown += 1,
        }

        if self.history_capacity == 0 {
            return;
        }
        if self.history.len() >= self.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(*record);
    }

    /// Account for a fired alert
    pub fn record_alert(&mut self) {
        self.alerts += 1;
    }

    /// Frames processed
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames where no face was detected
    #[must_use]
    pub fn frames_without_face(&self) -> u64 {
        self.frames_without_face
    }

    /// Frames classified as `state`
    #[must_use]
    pub fn count(&self, state: MouthState) -> u64 {
        match state {
            MouthState::Nasal => self.nasal,
            MouthState::Mouth => self.mouth,
            MouthState::Unknown => self.unknown,
        }
    }

    /// Accumulated time spent in `Mouth`, one frame interval per frame
    #[must_use]
    pub fn mouth_time(&self) -> Duration {
        self.mouth_time
    }

    /// Alerts fired
    #[must_use]
    pub fn alerts(&self) -> u64 {
        self.alerts
    }

    /// Latest records, oldest first
    pub fn history(&self) -> impl Iterator<Item = &FrameRecord> {
        self.history.iter()
    }

    /// Number of records in the history
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Frames: {} (no face: {})", self.frames, self.frames_without_face)?;
        for state in MouthState::ALL {
            writeln!(f, "  {state}: {}", self.count(state))?;
        }
        writeln!(f, "Mouth time: {:.1}s", self.mouth_time.as_secs_f64())?;
        write!(f, "Alerts: {}", self.alerts)
    }
}
