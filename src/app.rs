//! Monitoring driver: frame source → detector → pipeline → report.

use crate::{
    alert::{AlertEvent, OnsetAlert},
    config::Config,
    constants::SHUTDOWN_POLL_MS,
    error::Result,
    landmarks::{Frame, LandmarkDetector},
    pipeline::MarPipeline,
    report::{FrameRecord, ReportSink},
    session::SessionStats,
    source::FrameSource,
};
use log::{debug, info, warn};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::RecvTimeoutError,
    Arc,
};
use std::time::Duration;

/// Shared stop flag, set from outside the driver thread
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandle {
    /// Create an untriggered handle
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether shutdown was requested
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The source delivered its last frame
    SourceFinished,
    /// Shutdown was requested
    Shutdown,
    /// The configured duration limit was reached
    DurationLimit,
}

/// Main application driving one monitoring session
pub struct MonitorApp<S: ReportSink> {
    detector: Box<dyn LandmarkDetector>,
    pipeline: MarPipeline,
    sink: S,
    alert: Option<OnsetAlert>,
    alerts: Vec<AlertEvent>,
    stats: SessionStats,
    duration_limit: Option<Duration>,
    shutdown: ShutdownHandle,
}

impl<S: ReportSink> MonitorApp<S> {
    /// Create a new application instance
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid
    pub fn new(config: &Config, detector: Box<dyn LandmarkDetector>, sink: S) -> Result<Self> {
        config.validate()?;

        let window_size = config.window_size();
        let pipeline = MarPipeline::new(window_size, config.scorer()?)?;
        info!(
            "Smoothing over {} frames ({}s at {} fps), thresholds {:.3}/{:.3}",
            window_size,
            config.classifier.window_sec,
            config.capture.expected_fps,
            config.classifier.threshold_high,
            config.classifier.threshold_low
        );

        let alert = if config.alert.enabled {
            let (min_duration, cooldown) = config.alert_timing()?;
            info!(
                "Onset alerts after {:.1}s, cooldown {:.0}s",
                min_duration.as_secs_f64(),
                cooldown.as_secs_f64()
            );
            Some(OnsetAlert::new(min_duration, cooldown))
        } else {
            None
        };

        info!("Using landmark detector: {}", detector.name());

        Ok(Self {
            detector,
            pipeline,
            sink,
            alert,
            alerts: Vec::new(),
            stats: SessionStats::new(config.capture.expected_fps, config.session.history_capacity),
            duration_limit: config.duration_limit()?,
            shutdown: ShutdownHandle::new(),
        })
    }

    /// Handle that stops `run` from another thread
    #[must_use]
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Process one frame and report it
    ///
    /// # Errors
    ///
    /// Returns an error if the detector or the sink fails
    pub fn process_frame(&mut self, frame: &Frame) -> Result<FrameRecord> {
        let landmarks = self.detector.detect(frame)?;
        let record = FrameRecord {
            sequence: frame.sequence,
            captured_at: frame.captured_at,
            measurement: self.pipeline.process(landmarks.as_ref()),
        };

        self.sink.emit(&record)?;
        self.stats.record(&record);

        if let Some(event) = self
            .alert
            .as_mut()
            .and_then(|alert| alert.update(record.state(), record.captured_at))
        {
            warn!(
                "Mouth breathing for {:.1}s at {:.1}s",
                event.open_for.as_secs_f64(),
                event.at.as_secs_f64()
            );
            self.stats.record_alert();
            self.alerts.push(event);
        }

        Ok(record)
    }

    /// Run until the source finishes, shutdown is requested or the duration
    /// limit is reached. The source is stopped on every exit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be subscribed to or started,
    /// or if processing a frame fails
    pub fn run(&mut self, source: &mut dyn FrameSource) -> Result<RunOutcome> {
        info!("Starting monitoring on {}", source.describe());
        let frames = source.subscribe()?;
        if let Err(e) = source.start() {
            source.stop();
            return Err(e);
        }

        let poll = Duration::from_millis(SHUTDOWN_POLL_MS);
        let result = loop {
            if self.shutdown.is_triggered() {
                info!("Exit requested by user");
                break Ok(RunOutcome::Shutdown);
            }

            match frames.recv_timeout(poll) {
                Ok(frame) => {
                    if self.duration_limit.is_some_and(|limit| frame.captured_at >= limit) {
                        info!("Duration limit reached at frame {}", frame.sequence);
                        break Ok(RunOutcome::DurationLimit);
                    }
                    if let Err(e) = self.process_frame(&frame) {
                        break Err(e);
                    }
                }
                Err(RecvTimeoutError::Timeout) => debug!("No frame within {SHUTDOWN_POLL_MS} ms"),
                Err(RecvTimeoutError::Disconnected) => {
                    info!("End of frame stream reached");
                    break Ok(RunOutcome::SourceFinished);
                }
            }
        };

        source.stop();
        info!("Monitoring stopped after {} frames", self.stats.frames());
        result
    }

    /// Session statistics so far
    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Alerts fired so far
    #[must_use]
    pub fn alerts(&self) -> &[AlertEvent] {
        &self.alerts
    }

    /// The signal pipeline
    #[must_use]
    pub fn pipeline(&self) -> &MarPipeline {
        &self.pipeline
    }

    /// Mutable pipeline access for runtime threshold changes
    pub fn pipeline_mut(&mut self) -> &mut MarPipeline {
        &mut self.pipeline
    }

    /// The report sink
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the app, returning the sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}
