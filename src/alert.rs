//! Mouth-breathing onset alerts.
//!
//! An alert fires once the classified state has stayed `Mouth` for a minimum
//! continuous time, and no earlier than a cooldown after the previous alert.
//! Time is taken from frame capture timestamps so replays behave the same
//! as live capture.

use std::time::Duration;

use log::debug;

use crate::classifier::MouthState;

/// A fired alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertEvent {
    /// Capture time of the frame that triggered the alert
    pub at: Duration,
    /// How long the mouth had been open at that point
    pub open_for: Duration,
}

/// Onset alert state machine
#[derive(Debug, Clone)]
pub struct OnsetAlert {
    min_duration: Duration,
    cooldown: Duration,
    run_started: Option<Duration>,
    alerted_this_run: bool,
    last_alert: Option<Duration>,
}

impl OnsetAlert {
    /// Create an alert with the given minimum continuous duration and cooldown
    #[must_use]
    pub fn new(min_duration: Duration, cooldown: Duration) -> Self {
        Self {
            min_duration,
            cooldown,
            run_started: None,
            alerted_this_run: false,
            last_alert: None,
        }
    }

    /// Feed the state of a frame captured at `now`
    pub fn update(&mut self, state: MouthState, now: Duration) -> Option<AlertEvent> {
        if state != MouthState::Mouth {
            self.run_started = None;
            self.alerted_this_run = false;
            return None;
        }

        let started = *self.run_started.get_or_insert(now);
        if self.alerted_this_run {
            return None;
        }

        let open_for = now.saturating_sub(started);
        if open_for < self.min_duration {
            return None;
        }

        let cooled_down = match self.last_alert {
            Some(last) => now.saturating_sub(last) >= self.cooldown,
            None => true,
        };
        if !cooled_down {
            return None;
        }

        self.alerted_this_run = true;
        self.last_alert = Some(now);
        debug!("Mouth run reached after {:.1}s", open_for.as_secs_f64());
        Some(AlertEvent { at: now, open_for })
    }

    /// Whether the mouth is currently in a continuous open run
    #[must_use]
    pub fn in_mouth_run(&self) -> bool {
        self.run_started.is_some()
    }

    /// Forget all history
    pub fn reset(&mut self) {
        self.run_started = None;
        self.alerted_this_run = false;
        self.last_alert = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_fires_after_min_duration() {
        let mut alert = OnsetAlert::new(ms(1000), ms(300_000));

        for t in (0..1000).step_by(100) {
            assert_eq!(alert.update(MouthState::Mouth, ms(t)), None);
        }
        let event = alert.update(MouthState::Mouth, ms(1000)).unwrap();
        assert_eq!(event.open_for, ms(1000));

        // Only once per run
        assert_eq!(alert.update(MouthState::Mouth, ms(1100)), None);
    }

    #[test]
    fn test_interrupted_run_restarts() {
        let mut alert = OnsetAlert::new(ms(1000), ms(0));
        alert.update(MouthState::Mouth, ms(0));
        alert.update(MouthState::Mouth, ms(900));
        alert.update(MouthState::Unknown, ms(1000));
        assert!(!alert.in_mouth_run());
        assert_eq!(alert.update(MouthState::Mouth, ms(1100)), None);
        assert!(alert.update(MouthState::Mouth, ms(2100)).is_some());
    }

    #[test]
    fn test_cooldown_suppresses_second_alert() {
        let mut alert = OnsetAlert::new(ms(0), ms(5000));
        assert!(alert.update(MouthState::Mouth, ms(0)).is_some());
        alert.update(MouthState::Nasal, ms(100));
        assert_eq!(alert.update(MouthState::Mouth, ms(200)), None);
        alert.update(MouthState::Nasal, ms(300));
        assert!(alert.update(MouthState::Mouth, ms(5000)).is_some());
    }
}
