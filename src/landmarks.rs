//! Lip landmarks, frames and the landmark detector seam.
//!
//! Turning pixels into landmarks is left to an external vision backend. This
//! module only defines the shape that backend has to deliver: two lip points
//! per frame, or nothing when no face was found.

use std::time::Duration;

use crate::{Error, Result};

/// A 2D point in image coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Upper and lower lip landmarks detected in a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkPair {
    /// Center of the upper lip
    pub upper_lip: Point,
    /// Center of the lower lip
    pub lower_lip: Point,
}

impl LandmarkPair {
    /// Create a landmark pair
    #[must_use]
    pub const fn new(upper_lip: Point, lower_lip: Point) -> Self {
        Self { upper_lip, lower_lip }
    }

    /// Create a landmark pair, rejecting non-finite coordinates
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if any coordinate is NaN or infinite
    pub fn checked(upper_lip: Point, lower_lip: Point) -> Result<Self> {
        if !upper_lip.is_finite() || !lower_lip.is_finite() {
            return Err(Error::InvalidInput(format!(
                "Non-finite lip landmark: upper={upper_lip:?}, lower={lower_lip:?}"
            )));
        }
        Ok(Self::new(upper_lip, lower_lip))
    }
}

/// Payload carried by a frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameData {
    /// Raw image bytes from a capture device
    Image {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
        /// Packed pixel data
        pixels: Vec<u8>,
    },
    /// Landmarks detected ahead of time (replay logs)
    Annotated(Option<LandmarkPair>),
}

/// A frame delivered by a frame source
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Position of the frame in the stream, starting at 0
    pub sequence: u64,
    /// Capture time relative to the start of the stream
    pub captured_at: Duration,
    /// Frame payload
    pub data: FrameData,
}

impl Frame {
    /// Create a pre-annotated frame
    #[must_use]
    pub fn annotated(sequence: u64, captured_at: Duration, landmarks: Option<LandmarkPair>) -> Self {
        Self {
            sequence,
            captured_at,
            data: FrameData::Annotated(landmarks),
        }
    }
}

/// Maps a frame to lip landmarks.
///
/// `Ok(None)` means no face was found, which is not an error.
pub trait LandmarkDetector: Send {
    /// Detect lip landmarks in a frame
    ///
    /// # Errors
    ///
    /// Returns an error if the detection backend fails
    fn detect(&mut self, frame: &Frame) -> Result<Option<LandmarkPair>>;

    /// Get detector name
    fn name(&self) -> &str;
}

/// Detector that returns the landmarks a frame was annotated with.
///
/// Image frames carry no annotation and yield no detection.
#[derive(Debug, Default)]
pub struct AnnotationDetector;

impl LandmarkDetector for AnnotationDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Option<LandmarkPair>> {
        match &frame.data {
            FrameData::Annotated(landmarks) => Ok(*landmarks),
            FrameData::Image { .. } => Ok(None),
        }
    }

    fn name(&self) -> &str {
        "AnnotationDetector"
    }
}

/// Placeholder for a vision backend: never finds a face
#[derive(Debug, Default)]
pub struct NullDetector;

impl LandmarkDetector for NullDetector {
    fn detect(&mut self, _frame: &Frame) -> Result<Option<LandmarkPair>> {
        Ok(None)
    }

    fn name(&self) -> &str {
        "NullDetector"
    }
}
