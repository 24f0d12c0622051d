use std::{
    thread::sleep,
    time::{Duration, Instant},
};

/// Paces the external driver loop and supplies the delta time handed to systems. Ticks are
/// scheduled relative to the previous target rather than to the measured wake time, so the loop
/// does not drift while it keeps up.
pub struct Metronome {
    prev_tick_start: Instant,
    /// Seconds each tick should take in total
    target_tick: f64,
}

impl Metronome {
    pub fn new(target_tick: f64) -> Self {
        Self {
            prev_tick_start: Instant::now(),
            target_tick: target_tick.max(0.0),
        }
    }

    pub fn target_tick(&self) -> f64 {
        self.target_tick
    }

    /// Sleeps for whatever is left of the current tick and returns the delta time for the next
    /// one. When the tick ran over budget it does not sleep, resynchronizes to now and returns
    /// the time that actually passed.
    pub fn wait_for_next_tick(&mut self) -> f64 {
        let elapsed = self.prev_tick_start.elapsed().as_secs_f64();
        let remaining = self.target_tick - elapsed;
        if remaining >= 0.0 {
            sleep(Duration::from_secs_f64(remaining));
            self.prev_tick_start += Duration::from_secs_f64(self.target_tick);
            self.target_tick
        } else {
            trace!(
                "tick took {:?}, {:?} over budget",
                Duration::from_secs_f64(elapsed),
                Duration::from_secs_f64(-remaining)
            );
            self.prev_tick_start = Instant::now();
            elapsed
        }
    }
}
