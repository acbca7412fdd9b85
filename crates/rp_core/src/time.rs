//! Fixed-timestep clock.
//!
//! Physics in this game is expressed per tick (units/tick, units/tick²), so the
//! simulation must advance in whole ticks at a fixed rate no matter how fast
//! frames are presented. Wall-clock time feeds an accumulator; `should_step()`
//! drains it one tick at a time.

use std::time::Instant;

const FPS_SAMPLE_COUNT: usize = 60;

pub const DEFAULT_TICK_RATE: f64 = 60.0;

pub struct TimeState {
    pub fixed_dt: f64,
    pub max_accumulator: f64,
    accumulator: f64,
    pub tick_count: u64,
    pub frame_count: u64,
    pub steps_this_frame: u32,
    pub real_dt: f64,
    last_instant: Instant,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl TimeState {
    pub fn new() -> Self {
        Self::with_tick_rate(DEFAULT_TICK_RATE)
    }

    pub fn with_tick_rate(ticks_per_second: f64) -> Self {
        let fixed_dt = 1.0 / ticks_per_second.max(1.0);
        Self {
            fixed_dt,
            max_accumulator: 0.25,
            accumulator: 0.0,
            tick_count: 0,
            frame_count: 0,
            steps_this_frame: 0,
            real_dt: 0.0,
            last_instant: Instant::now(),
            fps_samples: [fixed_dt; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 1.0 / fixed_dt,
            smoothed_frame_time_ms: fixed_dt * 1000.0,
        }
    }

    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed);
    }

    /// Feed `elapsed` seconds of wall time into the accumulator.
    pub fn advance(&mut self, elapsed: f64) {
        self.real_dt = elapsed.max(0.0);

        // Spiral-of-death cap: a long stall (window drag, breakpoint) must not
        // turn into hundreds of catch-up ticks.
        if self.real_dt > self.max_accumulator {
            log::warn!(
                "Frame took {:.1}ms, capping accumulator to {}ms",
                self.real_dt * 1000.0,
                self.max_accumulator * 1000.0
            );
            self.real_dt = self.max_accumulator;
        }

        self.accumulator += self.real_dt;
        self.steps_this_frame = 0;
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = self.real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            self.tick_count += 1;
            self.steps_this_frame += 1;
            true
        } else {
            false
        }
    }

    /// Drop every whole tick waiting in the accumulator without counting it.
    /// Used while the simulation is paused so unpausing starts fresh.
    /// Returns how many ticks were dropped.
    pub fn discard_pending(&mut self) -> u32 {
        let pending = (self.accumulator / self.fixed_dt).floor();
        self.accumulator -= pending * self.fixed_dt;
        pending as u32
    }
}

impl Default for TimeState {
    fn default() -> Self {
        Self::new()
    }
}
