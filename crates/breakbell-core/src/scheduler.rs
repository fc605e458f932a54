//! Break scheduler.
//!
//! Draws the randomized number of work seconds between two breaks. Every
//! break threshold in the timer comes from an [`IntervalSource`]; nothing
//! else computes break spacing.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// Shortest gap between breaks, in seconds.
pub const MIN_INTERVAL_SECS: u64 = 180;
/// Longest gap between breaks, in seconds.
pub const MAX_INTERVAL_SECS: u64 = 300;

/// Draw a break interval uniformly from `[MIN_INTERVAL_SECS, MAX_INTERVAL_SECS]`.
pub fn draw_interval() -> u64 {
    rand::thread_rng().gen_range(MIN_INTERVAL_SECS..=MAX_INTERVAL_SECS)
}

/// Something that can be asked for the next break interval, indefinitely.
pub trait IntervalSource {
    fn draw_interval(&mut self) -> u64;
}

impl<T: IntervalSource + ?Sized> IntervalSource for Box<T> {
    fn draw_interval(&mut self) -> u64 {
        (**self).draw_interval()
    }
}

/// Thread-local RNG; the default for real runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIntervals;

impl IntervalSource for RandomIntervals {
    fn draw_interval(&mut self) -> u64 {
        draw_interval()
    }
}

/// Reproducible intervals from a seeded PCG generator.
#[derive(Debug, Clone)]
pub struct SeededIntervals {
    rng: Pcg64,
}

impl SeededIntervals {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
        }
    }
}

impl IntervalSource for SeededIntervals {
    fn draw_interval(&mut self) -> u64 {
        self.rng.gen_range(MIN_INTERVAL_SECS..=MAX_INTERVAL_SECS)
    }
}

/// Hands out a fixed list of intervals in order, then repeats the last one.
///
/// Values are used as given, which lets callers drive short breaks in
/// demos and tests.
#[derive(Debug, Clone)]
pub struct FixedIntervals {
    queue: VecDeque<u64>,
    last: u64,
}

impl FixedIntervals {
    pub fn new(values: impl IntoIterator<Item = u64>) -> Self {
        let queue: VecDeque<u64> = values.into_iter().collect();
        let last = queue.back().copied().unwrap_or(MIN_INTERVAL_SECS);
        Self { queue, last }
    }
}

impl IntervalSource for FixedIntervals {
    fn draw_interval(&mut self) -> u64 {
        self.queue.pop_front().unwrap_or(self.last)
    }
}
