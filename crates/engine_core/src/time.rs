//! Time management for the render loop.

use std::time::{Duration, Instant};

/// How often the frame-rate summary is reported.
const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Manages frame timing and delta time calculation.
#[derive(Debug)]
pub struct Time {
    /// Time when the loop started.
    start_time: Instant,
    /// Time of the last frame.
    last_frame: Instant,
    /// Duration of the last frame.
    delta: Duration,
    /// Total elapsed time since start.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
    /// Frames counted since the last report.
    frames_since_report: u32,
    /// Time accumulated since the last report.
    since_report: Duration,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_frame: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            frames_since_report: 0,
            since_report: Duration::ZERO,
        }
    }

    /// Update timing at the start of a new frame.
    pub fn update(&mut self) {
        self.advance(Instant::now());
    }

    fn advance(&mut self, now: Instant) {
        self.delta = now - self.last_frame;
        self.last_frame = now;
        self.elapsed = now - self.start_time;
        self.frame_count += 1;
        self.frames_since_report += 1;
        self.since_report += self.delta;
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per second over the last report window, once per window.
    ///
    /// Returns `None` until a full window has elapsed, then resets the window.
    pub fn take_report(&mut self) -> Option<f32> {
        if self.since_report < REPORT_INTERVAL {
            return None;
        }
        let fps = self.frames_since_report as f32 / self.since_report.as_secs_f32();
        self.frames_since_report = 0;
        self.since_report = Duration::ZERO;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_tracks_frame_spacing() {
        let mut time = Time::new();
        let start = time.last_frame;
        time.advance(start + Duration::from_millis(16));
        time.advance(start + Duration::from_millis(48));
        assert_eq!(time.frame_count(), 2);
        assert!((time.delta_seconds() - 0.032).abs() < 1e-6);
        assert!((time.elapsed_seconds() - 0.048).abs() < 1e-6);
    }

    #[test]
    fn report_waits_for_full_window() {
        let mut time = Time::new();
        let start = time.last_frame;
        for i in 1..=30 {
            time.advance(start + Duration::from_millis(i * 20));
        }
        assert!(time.take_report().is_none());
        for i in 31..=50 {
            time.advance(start + Duration::from_millis(i * 20));
        }
        let fps = time.take_report().expect("a full second has elapsed");
        assert!((fps - 50.0).abs() < 0.5);
        assert!(time.take_report().is_none());
    }
}
