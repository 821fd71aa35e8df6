//! Mouth aspect ratio (MAR) computation.
//!
//! The MAR used here is the absolute vertical distance between the lower and
//! upper lip landmarks, in image units. It is not normalized by face size; the
//! default classifier thresholds are tuned against this exact formula, so the
//! two must change together.

use crate::landmarks::LandmarkPair;

/// Compute the MAR for a frame's landmarks.
///
/// Absence propagates: `None` in, `None` out.
#[must_use]
pub fn compute_mar(landmarks: Option<&LandmarkPair>) -> Option<f64> {
    landmarks.map(vertical_lip_distance)
}

/// Absolute vertical distance between the lip landmarks
#[must_use]
pub fn vertical_lip_distance(landmarks: &LandmarkPair) -> f64 {
    (landmarks.lower_lip.y - landmarks.upper_lip.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::Point;

    #[test]
    fn test_absent_landmarks() {
        assert_eq!(compute_mar(None), None);
    }

    #[test]
    fn test_vertical_distance_ignores_x() {
        for x in [-50.0, 0.0, 3.5, 640.0] {
            let pair = LandmarkPair::new(Point::new(x, 10.0), Point::new(x + 7.0, 16.0));
            assert_eq!(compute_mar(Some(&pair)), Some(6.0));
        }
    }

    #[test]
    fn test_inverted_lips_are_non_negative() {
        let pair = LandmarkPair::new(Point::new(0.0, 16.0), Point::new(0.0, 10.0));
        assert_eq!(compute_mar(Some(&pair)), Some(6.0));
    }
}
