//! Frame timing utilities.
//!
//! `Time` is produced once per frame by the runner and handed to every
//! callback through the app context.  All fields are read-only from
//! application code; the runner owns the `TimeClock` that produces snapshots.
//!
//! # Example
//! ```rust,ignore
//! fn update(&mut self, ctx: &mut AppContext) {
//!     self.player.update(ctx.camera, ctx.time.delta);
//! }
//! ```

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// Largest frame delta handed out by default, in seconds.
pub const DEFAULT_MAX_DELTA: f32 = 0.1;

/// A snapshot of timing information for the current frame.
///
/// Since it is `Copy` you can store a copy locally if needed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Time {
    /// Seconds elapsed since the previous frame.  Typical values are in the
    /// range 0.008 – 0.033.  Clamped to the clock's `max_delta`.
    pub delta: f32,

    /// Total seconds elapsed since the clock started.
    pub elapsed: f64,

    /// Number of frames ticked so far (starts at 0 for the first frame).
    pub frame_count: u64,

    /// Instantaneous frames-per-second derived from `delta`.
    pub fps: f32,
}

impl Time {
    /// Returns the delta time clamped to `[0, max_dt]`.
    #[inline]
    pub fn clamped_delta(&self, max_dt: f32) -> f32 {
        self.delta.clamp(0.0, max_dt)
    }
}

// ─── Clock (lives in the runner) ────────────────────────────────────────────

/// Stateful timer that accumulates time and produces [`Time`] snapshots.
///
/// The runner creates one of these at startup and calls `tick()` at the
/// beginning of every frame.
#[derive(Debug, Clone)]
pub struct TimeClock {
    start: Instant,
    last_tick: Instant,
    frame_count: u64,
    max_delta: f32,
}

impl TimeClock {
    /// Create a new clock, starting the epoch now.
    pub fn new() -> Self {
        Self::with_max_delta(DEFAULT_MAX_DELTA)
    }

    /// Like [`new`](Self::new) but with a custom upper bound for `delta`.
    /// A stall longer than this (window drag, breakpoint) is reported as
    /// `max_delta` so the walkthrough does not jump.
    pub fn with_max_delta(max_delta: f32) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            frame_count: 0,
            max_delta: max_delta.max(0.0),
        }
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    /// Return the current [`Time`] snapshot without advancing the clock.
    ///
    /// Used by callbacks (like `setup` or `on_resize`) that are not on the
    /// frame path and must not advance the frame counter.
    pub fn peek(&self) -> Time {
        self.snapshot(Instant::now())
    }

    /// Advance by one frame.  Returns the [`Time`] snapshot for this frame.
    pub fn tick(&mut self) -> Time {
        let now = Instant::now();
        let time = self.snapshot(now);
        self.last_tick = now;
        self.frame_count += 1;
        time
    }

    fn snapshot(&self, now: Instant) -> Time {
        let raw_dt = (now - self.last_tick).as_secs_f32();
        let delta = raw_dt.min(self.max_delta);
        let elapsed = (now - self.start).as_secs_f64();
        let fps = if delta > 0.0 { 1.0 / delta } else { 0.0 };
        Time {
            delta,
            elapsed,
            frame_count: self.frame_count,
            fps,
        }
    }
}

impl Default for TimeClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn tick_counts_frames() {
        let mut clock = TimeClock::new();
        assert_eq!(clock.tick().frame_count, 0);
        assert_eq!(clock.tick().frame_count, 1);
        // peek does not advance
        assert_eq!(clock.peek().frame_count, 2);
        assert_eq!(clock.peek().frame_count, 2);
    }

    #[test]
    fn delta_is_clamped() {
        let mut clock = TimeClock::with_max_delta(0.005);
        std::thread::sleep(Duration::from_millis(20));
        let time = clock.tick();
        assert_eq!(time.delta, 0.005);
        assert!(time.elapsed >= 0.02);
    }

    #[test]
    fn clamped_delta_bounds() {
        let time = Time { delta: 0.5, ..Default::default() };
        assert_eq!(time.clamped_delta(0.1), 0.1);
        assert_eq!(time.clamped_delta(1.0), 0.5);
    }
}
