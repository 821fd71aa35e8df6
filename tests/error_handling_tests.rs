//! Error handling tests for all modules

use mouth_breath_monitor::{
    app::MonitorApp,
    classifier::{MouthStateScorer, Thresholds},
    config::Config,
    error::{Error, Result},
    landmarks::{AnnotationDetector, Frame, LandmarkDetector, LandmarkPair, Point},
    pipeline::MarPipeline,
    report::{FrameRecord, MemorySink, ReportSink},
    source::{parse_replay, ReplaySource},
};
use std::time::Duration;

struct FailingDetector;

impl LandmarkDetector for FailingDetector {
    fn detect(&mut self, _frame: &Frame) -> Result<Option<LandmarkPair>> {
        Err(Error::InvalidInput("backend crashed".to_string()))
    }

    fn name(&self) -> &str {
        "FailingDetector"
    }
}

struct BrokenSink;

impl ReportSink for BrokenSink {
    fn emit(&mut self, _record: &FrameRecord) -> Result<()> {
        Err(Error::IoError("pipe closed".to_string()))
    }
}

#[test]
fn test_configuration_errors_fail_fast() {
    assert!(matches!(
        MarPipeline::new(0, MouthStateScorer::default()),
        Err(Error::ConfigError(_))
    ));
    assert!(matches!(Thresholds::new(0.4, 0.6), Err(Error::ConfigError(_))));
}

#[test]
fn test_non_finite_landmarks() {
    let result = LandmarkPair::checked(Point::new(0.0, f64::NAN), Point::new(0.0, 1.0));
    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert!(parse_replay("0,0,0,-inf").is_err());
}

#[test]
fn test_detector_error_propagates() {
    let mut app = MonitorApp::new(&Config::default(), Box::new(FailingDetector), MemorySink::default()).unwrap();
    let mut source = ReplaySource::from_records(vec![None; 3], 10.0).unwrap().realtime(false);

    match app.run(&mut source) {
        Err(Error::InvalidInput(msg)) => assert!(msg.contains("backend crashed")),
        other => panic!("expected detector error, got {other:?}"),
    }
    assert_eq!(app.stats().frames(), 0);
}

#[test]
fn test_sink_error_propagates() {
    let mut app = MonitorApp::new(&Config::default(), Box::new(AnnotationDetector), BrokenSink).unwrap();
    let frame = Frame::annotated(0, Duration::ZERO, None);
    assert!(matches!(app.process_frame(&frame), Err(Error::IoError(_))));
}

#[test]
fn test_error_messages() {
    assert_eq!(
        Error::ConfigError("bad".to_string()).to_string(),
        "Configuration error: bad"
    );
    assert_eq!(
        Error::AlreadySubscribed.to_string(),
        "Frame source already has a subscriber"
    );
    let io: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(io.to_string().contains("gone"));
}
