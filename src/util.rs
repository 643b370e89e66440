//! Shared utilities: scalar math, wave shapes, easing, a seeded RNG and frame timing

use std::collections::VecDeque;
use std::f32::consts::{FRAC_PI_2, PI};
use std::time::Instant;

// ============================================================================
// Scalar math
// ============================================================================

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite step between two edges, clamped to [0, 1]
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Quintic step: zero first and second derivatives at both edges
#[inline]
pub fn smootherstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Map `value` from [old_min, old_max] onto [new_min, new_max] (unclamped)
#[inline]
pub fn remap(value: f32, old_min: f32, old_max: f32, new_min: f32, new_max: f32) -> f32 {
    let t = (value - old_min) / (old_max - old_min);
    new_min + t * (new_max - new_min)
}

// ============================================================================
// Waves, all in [0, 1]
// ============================================================================

#[inline]
pub fn sin01(x: f32) -> f32 {
    x.sin() * 0.5 + 0.5
}

#[inline]
pub fn cos01(x: f32) -> f32 {
    x.cos() * 0.5 + 0.5
}

/// Period 2, peaks at even x
#[inline]
pub fn triangle(x: f32) -> f32 {
    (x.rem_euclid(2.0) - 1.0).abs()
}

/// Period 1 ramp
#[inline]
pub fn sawtooth(x: f32) -> f32 {
    x.rem_euclid(1.0)
}

/// Period 1, high for the first `duty` of each period
#[inline]
pub fn square(x: f32, duty: f32) -> f32 {
    if x.rem_euclid(1.0) < duty {
        1.0
    } else {
        0.0
    }
}

// ============================================================================
// Easing, t in [0, 1]
// ============================================================================

pub fn ease_in_quad(t: f32) -> f32 {
    t * t
}

pub fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - 2.0 * (1.0 - t) * (1.0 - t)
    }
}

pub fn ease_in_cubic(t: f32) -> f32 {
    t * t * t
}

pub fn ease_out_cubic(t: f32) -> f32 {
    let f = 1.0 - t;
    1.0 - f * f * f
}

pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let f = 1.0 - t;
        1.0 - 4.0 * f * f * f
    }
}

pub fn ease_in_sine(t: f32) -> f32 {
    1.0 - (t * FRAC_PI_2).cos()
}

pub fn ease_out_sine(t: f32) -> f32 {
    (t * FRAC_PI_2).sin()
}

pub fn ease_in_out_sine(t: f32) -> f32 {
    -((PI * t).cos() - 1.0) * 0.5
}

// ============================================================================
// Polar helpers
// ============================================================================

#[inline]
pub fn polar_to_cartesian(radius: f32, angle: f32) -> (f32, f32) {
    (radius * angle.cos(), radius * angle.sin())
}

/// Returns (radius, angle)
#[inline]
pub fn cartesian_to_polar(x: f32, y: f32) -> (f32, f32) {
    (x.hypot(y), y.atan2(x))
}

// ============================================================================
// Rng
// ============================================================================

/// Deterministic xorshift64 generator. Seeded effects (noise injection,
/// demo setup) stay reproducible across runs.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) } // xorshift is stuck at zero
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Uniform in [0, 1)
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() & 0xFFFFFF) as f32 / 0x1000000 as f32
    }

    /// Uniform in [min, max)
    #[inline]
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Uniform in [min, max]; returns `min` when the range is empty
    #[inline]
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = (max as i64 - min as i64 + 1) as u64;
        (min as i64 + (self.next_u64() % span) as i64) as i32
    }
}

// ============================================================================
// FrameTimer
// ============================================================================

/// Per-frame delta time with a rolling window of frame durations
pub struct FrameTimer {
    frame_times: VecDeque<f32>,
    last_frame: Instant,
    window: usize,
    frames: u64,
}

impl FrameTimer {
    pub fn new(window: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(window),
            last_frame: Instant::now(),
            window: window.max(1),
            frames: 0,
        }
    }

    /// Mark the start of a frame; returns seconds since the previous call
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.record(dt);
        dt
    }

    /// Push an externally measured duration (seconds)
    pub fn record(&mut self, dt: f32) {
        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.window {
            self.frame_times.pop_front();
        }
        self.frames += 1;
    }

    /// Frames recorded since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn avg_frame_time_ms(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32 * 1000.0
    }

    /// (fastest, slowest) frame in the window, milliseconds
    pub fn min_max_ms(&self) -> (f32, f32) {
        if self.frame_times.is_empty() {
            return (0.0, 0.0);
        }
        let min = self.frame_times.iter().copied().fold(f32::INFINITY, f32::min);
        let max = self.frame_times.iter().copied().fold(0.0, f32::max);
        (min * 1000.0, max * 1000.0)
    }

    pub fn avg_fps(&self) -> f32 {
        let ms = self.avg_frame_time_ms();
        if ms > 0.0 {
            1000.0 / ms
        } else {
            0.0
        }
    }
}
