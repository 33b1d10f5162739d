use core::sync::atomic::{AtomicUsize, Ordering};

use sweepbot::tracking::SearchStatistics;

#[derive(Debug, Default)]
pub struct AtomicSearchStats {
    total_visit: AtomicUsize,
    unique_visit: AtomicUsize,
    stale_visit: AtomicUsize,
    generated: AtomicUsize,
    queued: AtomicUsize,
    max_depth: AtomicUsize,
}

impl AtomicSearchStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn total_visit(&self) -> usize {
        self.total_visit.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn unique_visit(&self) -> usize {
        self.unique_visit.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn stale_visit(&self) -> usize {
        self.stale_visit.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn generated(&self) -> usize {
        self.generated.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn queued(&self) -> usize {
        self.queued.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth.load(Ordering::Relaxed)
    }
}

impl SearchStatistics for AtomicSearchStats {
    fn hit_a_state(&self, depth: usize) {
        self.max_depth.fetch_max(depth, Ordering::Relaxed);
        self.total_visit.fetch_add(1, Ordering::Relaxed);
    }

    fn hit_unique_state(&self, _: usize, n_moves: usize, n_new: usize) {
        self.unique_visit.fetch_add(1, Ordering::Relaxed);
        self.generated.fetch_add(n_moves, Ordering::Relaxed);
        self.queued.fetch_add(n_new, Ordering::Relaxed);
    }

    fn hit_stale_state(&self) {
        self.stale_visit.fetch_add(1, Ordering::Relaxed);
    }
}

impl core::fmt::Display for AtomicSearchStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let (total, unique, depth) = (self.total_visit(), self.unique_visit(), self.max_depth());
        let (generated, queued) = (self.generated(), self.queued());
        let hit = generated - queued;
        write!(
            f,
            "Popped: {}\nExpanded: {}\nStale: {}\nGenerated: {}\nTransposition hit: {} (rate {:.4})\nFrontier: {}\nMax depth search: {}",
            total,
            unique,
            self.stale_visit(),
            generated,
            hit,
            if generated == 0 { 0.0 } else { hit as f64 / generated as f64 },
            (queued + 1).saturating_sub(total),
            depth,
        )
    }
}
