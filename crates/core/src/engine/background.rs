//! Wall-clock driver for the update cycle
//!
//! Spawns one thread that wakes every poll interval, measures the elapsed
//! time and feeds it to [`PulseNetEngine::advance`]. Stopping closes the
//! channel the thread waits on, then joins it.

use super::PulseNetEngine;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Engine shared between the caller and the background cycle
pub type SharedEngine = Arc<Mutex<PulseNetEngine>>;

/// Background thread advancing a shared engine in real time
pub struct BackgroundCycle {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl BackgroundCycle {
    /// Start driving `engine`, checking for due ticks every `poll_interval`
    ///
    /// # Errors
    /// Returns the OS error if the thread cannot be spawned.
    pub fn spawn(engine: SharedEngine, poll_interval: Duration) -> std::io::Result<Self> {
        let (stop, stopped) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name("pulsenet-cycle".to_string())
            .spawn(move || {
                info!("Background cycle started (poll every {:?})", poll_interval);
                let mut last = Instant::now();

                loop {
                    match stopped.recv_timeout(poll_interval) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }

                    let now = Instant::now();
                    let elapsed = now - last;
                    last = now;

                    let Ok(mut engine) = engine.lock() else {
                        warn!("Engine lock poisoned, stopping background cycle");
                        break;
                    };
                    engine.advance(elapsed);
                }

                info!("Background cycle stopped");
            })?;

        Ok(Self {
            stop: Some(stop),
            handle: Some(handle),
        })
    }

    /// Whether the thread is still running
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stop the thread and wait for it to exit
    pub fn stop(&mut self) {
        // Dropping the sender disconnects the channel
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Background cycle thread panicked");
            }
        }
    }
}

impl Drop for BackgroundCycle {
    fn drop(&mut self) {
        self.stop();
    }
}
