//! Simulated rotation sensor
//!
//! Stands in for a device rotation vector: a background thread produces
//! slowly drifting three-axis readings far faster than the UI draws, and
//! pushes them through a lock-free ring buffer.

use rtrb::Producer;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Time between two readings
const SENSOR_PERIOD: Duration = Duration::from_millis(4);

/// Handle to the running sensor thread
pub struct SensorThread {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SensorThread {
    /// Start producing readings into `tx`.
    pub fn spawn(mut tx: Producer<[f32; 3]>) -> io::Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = thread::Builder::new()
            .name("sparkle-sensor".into())
            .spawn(move || {
                let start = Instant::now();
                let mut dropped = 0u64;
                while flag.load(Ordering::Relaxed) {
                    let t = start.elapsed().as_secs_f32();
                    // Queue full means the UI is behind; it only wants the latest anyway
                    if tx.push(reading_at(t)).is_err() {
                        dropped += 1;
                    }
                    thread::sleep(SENSOR_PERIOD);
                }
                tracing::debug!(dropped, "sensor thread stopped");
            })?;

        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    /// Stop the thread and wait for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("sensor thread panicked");
            }
        }
    }
}

impl Drop for SensorThread {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// A lazy hand-held wobble: three incommensurate slow oscillations.
fn reading_at(t: f32) -> [f32; 3] {
    [
        0.25 * (t * 0.31).sin(),
        0.15 * (t * 0.53 + 1.0).sin(),
        0.10 * (t * 0.17).cos(),
    ]
}
