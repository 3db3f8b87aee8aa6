//! Frame timing utilities

use std::time::{Duration, Instant};

/// Frame clock used by the engine loop
///
/// Tracks delta time, total time and frame count, and can pace the loop to a
/// target frame rate.
pub struct FrameClock {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
    target_frame_time: Option<Duration>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(None)
    }
}

impl FrameClock {
    /// Create a new clock, optionally pacing to `target_fps`
    pub fn new(target_fps: Option<u32>) -> Self {
        let target_frame_time = target_fps
            .filter(|fps| *fps > 0)
            .map(|fps| Duration::from_secs_f64(1.0 / f64::from(fps)));

        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
            target_frame_time,
        }
    }

    /// Advance the clock (should be called once per frame, before the update)
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Sleep for whatever is left of the current frame's budget
    pub fn pace(&self) {
        if let Some(target) = self.target_frame_time {
            let elapsed = self.last_frame.elapsed();
            if elapsed < target {
                std::thread::sleep(target - elapsed);
            }
        }
    }

    /// Time since the previous tick in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Total time accumulated over all ticks
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per second since creation
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}
