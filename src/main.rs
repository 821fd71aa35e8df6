//! Mouth-breathing monitor: classifies breathing mode from lip landmarks.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use mouth_breath_monitor::{
    app::{MonitorApp, ShutdownHandle},
    cli::Args,
    landmarks::{AnnotationDetector, LandmarkDetector, NullDetector},
    report::ConsoleSink,
    source::{CameraSource, FrameSource, ReplaySource},
};
use std::io::BufRead;

/// Trigger shutdown when the user presses Enter
fn spawn_stdin_watcher(shutdown: ShutdownHandle) {
    let spawned = std::thread::Builder::new()
        .name("stdin-watcher".to_string())
        .spawn(move || {
            let mut line = String::new();
            // EOF means stdin is not interactive; keep running until the source ends
            if matches!(std::io::stdin().lock().read_line(&mut line), Ok(n) if n > 0) {
                shutdown.trigger();
            }
        });
    if let Err(e) = spawned {
        warn!("Could not watch stdin for shutdown: {e}");
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Mouth Breathing Monitor");

    let config = args.resolve_config().context("Invalid configuration")?;

    let (mut source, detector): (Box<dyn FrameSource>, Box<dyn LandmarkDetector>) = match &args.replay {
        Some(path) => {
            let source = ReplaySource::from_file(path, config.capture.expected_fps)
                .with_context(|| format!("Failed to load replay {}", path.display()))?
                .realtime(config.capture.realtime);
            (Box::new(source), Box::new(AnnotationDetector))
        }
        None => (
            Box::new(CameraSource::new(config.capture.device_index, config.capture.expected_fps)?),
            Box::new(NullDetector),
        ),
    };

    let mut app = MonitorApp::new(&config, detector, ConsoleSink::stdout())?;
    spawn_stdin_watcher(app.shutdown_handle());
    info!("Press Enter to stop");

    let outcome = app.run(source.as_mut())?;
    info!("Finished: {outcome:?}");

    if args.summary {
        println!("{}", app.stats());
    }

    Ok(())
}
