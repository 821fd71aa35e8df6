//! Frame sources.
//!
//! A source runs on its own thread and pushes frames into a channel with a
//! single receiver. Everything downstream of the receiver (the smoother in
//! particular) lives on the consuming thread only.

use std::path::Path;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::{self, Receiver, Sender},
    Arc,
};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info, warn};

use crate::{
    landmarks::{Frame, LandmarkPair, Point},
    Error, Result,
};

/// Something that delivers frames to exactly one subscriber
pub trait FrameSource {
    /// Obtain the receiving end of the frame stream.
    ///
    /// The stream closes when the source finishes or is stopped.
    ///
    /// # Errors
    ///
    /// Returns `AlreadySubscribed` on every call after the first
    fn subscribe(&mut self) -> Result<Receiver<Frame>>;

    /// Begin delivering frames
    ///
    /// # Errors
    ///
    /// Returns `SourceUnavailable` if the source cannot produce frames
    fn start(&mut self) -> Result<()>;

    /// Stop delivering frames and release the producer thread
    fn stop(&mut self);

    /// Human readable description used in logs
    fn describe(&self) -> String;
}

/// Single-subscriber bookkeeping shared by the sources
#[derive(Debug, Default)]
struct Outlet {
    sender: Option<Sender<Frame>>,
    subscribed: bool,
}

impl Outlet {
    fn subscribe(&mut self) -> Result<Receiver<Frame>> {
        if self.subscribed {
            return Err(Error::AlreadySubscribed);
        }
        let (tx, rx) = mpsc::channel();
        self.sender = Some(tx);
        self.subscribed = true;
        Ok(rx)
    }

    fn take(&mut self) -> Option<Sender<Frame>> {
        self.sender.take()
    }
}

fn frame_interval(fps: f64) -> Result<Duration> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(Error::ConfigError(format!(
            "Frame rate must be positive and finite, got {fps}"
        )));
    }
    Duration::try_from_secs_f64(1.0 / fps)
        .map_err(|e| Error::ConfigError(format!("Frame rate {fps} gives no usable frame interval: {e}")))
}

/// Parse a landmark replay log.
///
/// One frame per line, either `ux,uy,lx,ly` (upper lip then lower lip) or
/// `none` / `-` for a frame without a face. Blank lines and lines starting
/// with `#` are skipped.
///
/// # Errors
///
/// Returns `InvalidInput` naming the offending line for malformed numbers,
/// a wrong field count or non-finite coordinates
pub fn parse_replay(text: &str) -> Result<Vec<Option<LandmarkPair>>> {
    let mut frames = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line == "-" || line.eq_ignore_ascii_case("none") {
            frames.push(None);
            continue;
        }

        let values = line
            .split(',')
            .map(|field| field.trim().parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::InvalidInput(format!("line {}: {e}: {line:?}", index + 1)))?;

        let &[ux, uy, lx, ly] = values.as_slice() else {
            return Err(Error::InvalidInput(format!(
                "line {}: expected 4 values, found {}",
                index + 1,
                values.len()
            )));
        };

        let pair = LandmarkPair::checked(Point::new(ux, uy), Point::new(lx, ly))
            .map_err(|e| Error::InvalidInput(format!("line {}: {e}", index + 1)))?;
        frames.push(Some(pair));
    }

    Ok(frames)
}

/// Replays pre-detected landmarks as a frame stream
pub struct ReplaySource {
    label: String,
    records: Vec<Option<LandmarkPair>>,
    interval: Duration,
    realtime: bool,
    outlet: Outlet,
    stop_flag: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl ReplaySource {
    /// Replay in-memory landmark records at `fps`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `fps` is not positive and finite
    pub fn from_records(records: Vec<Option<LandmarkPair>>, fps: f64) -> Result<Self> {
        Ok(Self {
            label: format!("replay of {} frames", records.len()),
            records,
            interval: frame_interval(fps)?,
            realtime: true,
            outlet: Outlet::default(),
            stop_flag: Arc::new(AtomicBool::new(false)),
            worker: None,
        })
    }

    /// Load a replay log from disk
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `InvalidInput` if it does not
    /// parse, or `ConfigError` for a bad frame rate
    pub fn from_file<P: AsRef<Path>>(path: P, fps: f64) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let records = parse_replay(&text)?;
        info!("Loaded {} frames from {}", records.len(), path.display());

        let mut source = Self::from_records(records, fps)?;
        source.label = format!("replay {}", path.display());
        Ok(source)
    }

    /// Deliver frames back to back instead of at the frame rate.
    ///
    /// Capture timestamps still advance by one frame interval per frame.
    #[must_use]
    pub fn realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    /// Number of frames left to deliver (0 once started)
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there is nothing to deliver
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FrameSource for ReplaySource {
    fn subscribe(&mut self) -> Result<Receiver<Frame>> {
        self.outlet.subscribe()
    }

    fn start(&mut self) -> Result<()> {
        if self.worker.is_some() {
            return Ok(());
        }
        let Some(tx) = self.outlet.take() else {
            warn!("Starting {} without a subscriber, frames are dropped", self.label);
            return Ok(());
        };

        let records = std::mem::take(&mut self.records);
        let interval = self.interval;
        let realtime = self.realtime;
        let stop_flag = Arc::clone(&self.stop_flag);

        info!("Starting {}", self.label);
        let handle = thread::Builder::new()
            .name("replay-source".to_string())
            .spawn(move || {
                let mut captured_at = Duration::ZERO;
                for (sequence, landmarks) in (0u64..).zip(records) {
                    if stop_flag.load(Ordering::Relaxed) {
                        debug!("Replay stopped at frame {sequence}");
                        break;
                    }
                    if tx.send(Frame::annotated(sequence, captured_at, landmarks)).is_err() {
                        debug!("Replay receiver dropped at frame {sequence}");
                        break;
                    }
                    captured_at += interval;
                    if realtime {
                        thread::sleep(interval);
                    }
                }
            })?;

        self.worker = Some(handle);
        Ok(())
    }

    fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        // Drops the sender if start() was never called so the receiver closes
        self.outlet.take();
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                warn!("Replay thread panicked");
            }
            info!("Stopped {}", self.label);
        }
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

impl Drop for ReplaySource {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Live camera input.
///
/// No capture backend is bundled, so starting always fails; the type exists
/// so the binary can report that cleanly and so a backend has a place to go.
pub struct CameraSource {
    device_index: u32,
    interval: Duration,
    outlet: Outlet,
}

impl CameraSource {
    /// Camera `device_index` at `fps`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `fps` is not positive and finite
    pub fn new(device_index: u32, fps: f64) -> Result<Self> {
        Ok(Self {
            device_index,
            interval: frame_interval(fps)?,
            outlet: Outlet::default(),
        })
    }

    /// Configured device index
    #[must_use]
    pub fn device_index(&self) -> u32 {
        self.device_index
    }
}

impl FrameSource for CameraSource {
    fn subscribe(&mut self) -> Result<Receiver<Frame>> {
        self.outlet.subscribe()
    }

    fn start(&mut self) -> Result<()> {
        info!(
            "Opening camera {} at {:.1} ms per frame",
            self.device_index,
            self.interval.as_secs_f64() * 1000.0
        );
        Err(Error::SourceUnavailable(format!(
            "camera {}: no capture backend available in this build",
            self.device_index
        )))
    }

    fn stop(&mut self) {
        self.outlet.take();
    }

    fn describe(&self) -> String {
        format!("camera {}", self.device_index)
    }
}
