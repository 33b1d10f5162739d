pub trait SearchStatistics {
    // a state came off the frontier, `depth` moves away from the start
    fn hit_a_state(&self, depth: usize);
    // the state was expanded into `n_new` unseen successors
    fn hit_unique_state(&self, depth: usize, n_moves: usize, n_new: usize);
    // the state had already been expanded through another path
    fn hit_stale_state(&self);
}

pub struct EmptySearchStats;

impl SearchStatistics for EmptySearchStats {
    fn hit_a_state(&self, _: usize) {}
    fn hit_unique_state(&self, _: usize, _: usize, _: usize) {}
    fn hit_stale_state(&self) {}
}

pub trait TerminateSignal {
    fn terminate(&self);
    fn is_terminated(&self) -> bool;
}

pub struct DefaultTerminateSignal;

impl TerminateSignal for DefaultTerminateSignal {
    fn terminate(&self) {}

    fn is_terminated(&self) -> bool {
        false
    }
}
