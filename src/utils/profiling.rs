use std::time::{Duration, Instant};

use crate::collision::DetectionStats;

/// Timing and counters for the most recent world tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetectionProfiler {
    pub movement_time: Duration,
    pub detection_time: Duration,
    pub total_frame_time: Duration,

    pub object_count: usize,
    pub candidate_checks: usize,
    pub pair_count: usize,
}

impl DetectionProfiler {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn record_stats(&mut self, stats: &DetectionStats) {
        self.object_count = stats.objects;
        self.candidate_checks = stats.candidate_checks;
        self.pair_count = stats.pairs;
    }

    /// Predicate evaluations relative to the `n * (n - 1) / 2` unordered pairs. Exhaustive
    /// detection walks ordered pairs, so it lands just under 2.
    pub fn check_ratio(&self) -> f64 {
        let n = self.object_count;
        if n < 2 {
            return 0.0;
        }
        let possible = n * (n - 1) / 2;
        self.candidate_checks as f64 / possible as f64
    }

    pub fn report(&self) {
        let total_us = self.total_frame_time.as_micros() as f32;
        if total_us < 1.0 {
            return;
        }

        log::info!(
            "Objects: {}, Checks: {} ({:.1}% of all pairs), Pairs: {}",
            self.object_count,
            self.candidate_checks,
            self.check_ratio() * 100.0,
            self.pair_count
        );
        log::info!(
            "Total Frame: {:.2} ms | Movement: {:.2} ms ({:.1}%) | Detection: {:.2} ms ({:.1}%)",
            self.total_frame_time.as_secs_f32() * 1000.0,
            self.movement_time.as_secs_f32() * 1000.0,
            (self.movement_time.as_micros() as f32 / total_us) * 100.0,
            self.detection_time.as_secs_f32() * 1000.0,
            (self.detection_time.as_micros() as f32 / total_us) * 100.0
        );
    }
}

/// Adds the lifetime of the guard to a duration slot.
pub struct ScopedTimer<'a> {
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(output: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            output,
        }
    }
}

impl<'a> Drop for ScopedTimer<'a> {
    fn drop(&mut self) {
        *self.output += self.start.elapsed();
    }
}
