//! Per-frame signal path: landmarks → MAR → moving average → state.

use crate::{
    classifier::{MouthState, MouthStateScorer},
    constants::NO_FACE_MAR,
    filters::MovingAverage,
    landmarks::LandmarkPair,
    mar::compute_mar,
    Result,
};
use log::debug;

/// Result of pushing one frame through the pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// MAR for this frame, 0.0 when no face was found
    pub raw_mar: f64,
    /// Moving average after this frame
    pub smoothed_mar: f64,
    /// Classification of the smoothed value
    pub state: MouthState,
    /// Whether the detector found landmarks
    pub face_detected: bool,
}

/// MAR smoothing and classification for a single monitoring session.
///
/// Owns its smoothing window; frames must be pushed from one thread in
/// capture order.
#[derive(Debug, Clone)]
pub struct MarPipeline {
    smoother: MovingAverage,
    scorer: MouthStateScorer,
}

impl MarPipeline {
    /// Create a pipeline with a smoothing window of `window_size` frames
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `window_size` is 0
    pub fn new(window_size: usize, scorer: MouthStateScorer) -> Result<Self> {
        Ok(Self {
            smoother: MovingAverage::new(window_size)?,
            scorer,
        })
    }

    /// Process one frame's landmarks.
    ///
    /// A frame without landmarks counts as MAR 0.0 and still updates the
    /// moving average, pulling it toward `Nasal`.
    pub fn process(&mut self, landmarks: Option<&LandmarkPair>) -> Measurement {
        let mar = compute_mar(landmarks);
        let raw_mar = mar.unwrap_or(NO_FACE_MAR);
        let smoothed_mar = self.smoother.update(raw_mar);
        let state = self.scorer.classify(raw_mar, smoothed_mar);

        debug!(
            "face={} raw={raw_mar:.4} smoothed={smoothed_mar:.4} state={state}",
            mar.is_some()
        );

        Measurement {
            raw_mar,
            smoothed_mar,
            state,
            face_detected: mar.is_some(),
        }
    }

    /// The moving average
    #[must_use]
    pub fn smoother(&self) -> &MovingAverage {
        &self.smoother
    }

    /// The classifier
    #[must_use]
    pub fn scorer(&self) -> &MouthStateScorer {
        &self.scorer
    }

    /// Mutable classifier access for runtime threshold changes
    pub fn scorer_mut(&mut self) -> &mut MouthStateScorer {
        &mut self.scorer
    }

    /// Clear the smoothing window
    pub fn reset(&mut self) {
        self.smoother.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constants::DEFAULT_WINDOW_SIZE, landmarks::Point};

    fn lips(gap: f64) -> LandmarkPair {
        LandmarkPair::new(Point::new(50.0, 0.0), Point::new(50.0, gap))
    }

    #[test]
    fn test_missing_face_substitutes_zero() {
        let mut pipeline = MarPipeline::new(DEFAULT_WINDOW_SIZE, MouthStateScorer::default()).unwrap();

        let first = pipeline.process(Some(&lips(0.7)));
        assert!(first.face_detected);
        assert_eq!(first.state, MouthState::Mouth);

        let second = pipeline.process(None);
        assert!(!second.face_detected);
        assert_eq!(second.raw_mar, 0.0);
        assert!((second.smoothed_mar - 0.35).abs() < 1e-12);
        assert_eq!(second.state, MouthState::Nasal);
        assert_eq!(pipeline.smoother().len(), 2);
    }

    #[test]
    fn test_zero_window_fails() {
        assert!(MarPipeline::new(0, MouthStateScorer::default()).is_err());
    }

    #[test]
    fn test_runtime_threshold_change() {
        let mut pipeline = MarPipeline::new(1, MouthStateScorer::default()).unwrap();
        assert_eq!(pipeline.process(Some(&lips(0.5))).state, MouthState::Unknown);

        pipeline.scorer_mut().set_thresholds(0.5, 0.2).unwrap();
        assert_eq!(pipeline.process(Some(&lips(0.5))).state, MouthState::Mouth);
    }
}
