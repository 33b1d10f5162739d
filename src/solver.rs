use core::cmp::Ordering;
use core::num::NonZeroUsize;
use core::ops::ControlFlow;

use alloc::collections::BinaryHeap;
use hashbrown::HashMap;

use crate::layout::Layout;
use crate::state::{Encode, State};
use crate::tracking::{
    DefaultTerminateSignal, EmptySearchStats, SearchStatistics, TerminateSignal,
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SearchResult {
    Solved,
    Unsolvable,
    Terminated,
}

/// Progress of an encoding in the visited table. Only ever moves forward.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum Status {
    Enqueued = 0,
    Finalized = 1,
}

pub type VisitTable = HashMap<Encode, Status>;

struct Queued {
    state: State,
    serial: u64,
    depth: usize,
}

// higher priority first, then whichever was pushed earlier
impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        self.state
            .priority_cmp(&other.state)
            .then_with(|| other.serial.cmp(&self.serial))
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

/// Greedy best-first search over the arrangements reachable from one layout.
/// Every encoding is expanded at most once, so the search always ends.
pub struct Solver {
    frontier: BinaryHeap<Queued>,
    visited: VisitTable,
    serial: u64,
    limit: Option<NonZeroUsize>,
}

impl Solver {
    #[must_use]
    pub fn new(initial: State) -> Self {
        let mut solver = Self {
            frontier: BinaryHeap::new(),
            visited: VisitTable::default(),
            serial: 0,
            limit: None,
        };
        solver.visited.insert(initial.encode().clone(), Status::Enqueued);
        solver.push(initial, 0);
        solver
    }

    /// Stop with [`SearchResult::Terminated`] once more than `limit`
    /// encodings have been seen.
    #[must_use]
    pub fn with_limit(mut self, limit: NonZeroUsize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    #[must_use]
    pub const fn visited(&self) -> &VisitTable {
        &self.visited
    }

    #[must_use]
    pub fn status(&self, encode: &str) -> Option<Status> {
        self.visited.get(encode).copied()
    }

    fn push(&mut self, state: State, depth: usize) {
        self.frontier.push(Queued {
            state,
            serial: self.serial,
            depth,
        });
        self.serial += 1;
    }

    pub fn step(&mut self) -> ControlFlow<SearchResult> {
        self.step_with_tracking(&EmptySearchStats {})
    }

    pub fn step_with_tracking<S: SearchStatistics>(
        &mut self,
        stats: &S,
    ) -> ControlFlow<SearchResult> {
        let Some(Queued { state, depth, .. }) = self.frontier.pop() else {
            log::debug!("frontier exhausted after {} states", self.visited.len());
            return ControlFlow::Break(SearchResult::Unsolvable);
        };
        stats.hit_a_state(depth);

        if state.is_final() {
            log::debug!("cleared the table at depth {depth}");
            return ControlFlow::Break(SearchResult::Solved);
        }

        match self.visited.get_mut(state.encode()) {
            Some(Status::Finalized) => {
                log::trace!("skipping expanded state {}", state.encode());
                stats.hit_stale_state();
                return ControlFlow::Continue(());
            }
            Some(status) => *status = Status::Finalized,
            None => {
                self.visited.insert(state.encode().clone(), Status::Finalized);
            }
        }

        let moves = state.gen_moves();
        let mut n_new = 0;
        for m in &moves {
            let next = state.successor(*m);
            if self.visited.contains_key(next.encode()) {
                continue;
            }
            self.visited.insert(next.encode().clone(), Status::Enqueued);
            self.push(next, depth + 1);
            n_new += 1;
        }
        stats.hit_unique_state(depth, moves.len(), n_new);

        ControlFlow::Continue(())
    }

    pub fn solve(&mut self) -> SearchResult {
        self.solve_with_tracking(&EmptySearchStats {}, &DefaultTerminateSignal {})
    }

    pub fn solve_with_tracking<S: SearchStatistics, T: TerminateSignal>(
        &mut self,
        stats: &S,
        sign: &T,
    ) -> SearchResult {
        loop {
            if sign.is_terminated() {
                log::debug!("search interrupted");
                return SearchResult::Terminated;
            }
            if self.limit.is_some_and(|l| self.visited.len() > l.get()) {
                log::debug!("state limit reached with {} queued", self.frontier.len());
                return SearchResult::Terminated;
            }
            if let ControlFlow::Break(res) = self.step_with_tracking(stats) {
                return res;
            }
        }
    }
}

pub fn solve_with_tracking<S: SearchStatistics, T: TerminateSignal>(
    layout: Layout,
    limit: Option<NonZeroUsize>,
    stats: &S,
    sign: &T,
) -> SearchResult {
    let mut solver = Solver::new(State::from(layout));
    solver.limit = limit;
    solver.solve_with_tracking(stats, sign)
}

#[must_use]
pub fn solve_game(layout: Layout) -> SearchResult {
    solve_with_tracking(
        layout,
        None,
        &EmptySearchStats {},
        &DefaultTerminateSignal {},
    )
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::cell::Cell;

    use crate::deck::Deck;
    use crate::moves::Move;
    use crate::rules::Rules;
    use crate::shuffler::default_shuffle;

    use super::*;

    fn layout(decks: &[&[u8]], rules: Rules) -> Layout {
        Layout::new(decks.iter().map(|d| Deck::from(*d)).collect(), rules).unwrap()
    }

    fn tiny() -> Rules {
        Rules::new(2, 2, 7).unwrap()
    }

    #[derive(Default)]
    struct CountStats {
        popped: Cell<usize>,
        expanded: Cell<usize>,
        stale: Cell<usize>,
    }

    impl SearchStatistics for CountStats {
        fn hit_a_state(&self, _: usize) {
            self.popped.set(self.popped.get() + 1);
        }
        fn hit_unique_state(&self, _: usize, _: usize, _: usize) {
            self.expanded.set(self.expanded.get() + 1);
        }
        fn hit_stale_state(&self) {
            self.stale.set(self.stale.get() + 1);
        }
    }

    #[test]
    fn test_ascending_deck_is_solvable() {
        // 7 goes to the empty deck, then 6 lands on it and the run collapses
        let l = layout(&[&[6, 7], &[]], tiny());
        assert_eq!(solve_game(l), SearchResult::Solved);
    }

    #[test]
    fn test_empty_table() {
        let mut solver = Solver::new(State::from(Layout::empty(Rules::STANDARD)));
        assert_eq!(solver.step(), ControlFlow::Break(SearchResult::Solved));
    }

    #[test]
    fn test_single_productive_move() {
        let l = layout(&[&[7], &[8]], Rules::new(2, 2, 8).unwrap());
        let stats = CountStats::default();
        let mut solver = Solver::new(State::from(l));
        let res = solver.solve_with_tracking(&stats, &DefaultTerminateSignal {});
        assert_eq!(res, SearchResult::Solved);
        assert_eq!(stats.expanded.get(), 1);
        assert_eq!(stats.popped.get(), 2);
    }

    #[test]
    fn test_two_way_cycle_terminates() {
        // the lone card can only bounce between the two decks
        let l = layout(&[&[6], &[]], tiny());
        let stats = CountStats::default();
        let mut solver = Solver::new(State::from(l));
        let res = solver.solve_with_tracking(&stats, &DefaultTerminateSignal {});
        assert_eq!(res, SearchResult::Unsolvable);
        assert_eq!(stats.expanded.get(), 2);
        assert_eq!(stats.stale.get(), 0);
        assert_eq!(solver.visited().len(), 2);
        assert!(solver
            .visited()
            .values()
            .all(|&s| s == Status::Finalized));
    }

    #[test]
    fn test_stuck_layout() {
        let l = layout(&[&[6, 6], &[6, 6]], tiny());
        let mut solver = Solver::new(State::from(l));
        assert_eq!(solver.step(), ControlFlow::Continue(()));
        assert_eq!(solver.frontier_len(), 0);
        assert_eq!(solver.step(), ControlFlow::Break(SearchResult::Unsolvable));
    }

    #[test]
    fn test_all_tiny_layouts_terminate() {
        // every 2x2 layout over ranks 6 and 7, with optional empty slots
        let rules = tiny();
        let options: [&[u8]; 7] = [&[], &[6], &[7], &[6, 6], &[6, 7], &[7, 6], &[7, 7]];
        for a in options {
            for b in options {
                let res = solve_game(layout(&[a, b], rules));
                assert_ne!(res, SearchResult::Terminated);
            }
        }
        assert_eq!(solve_game(layout(&[&[6, 7], &[6, 7]], rules)), SearchResult::Unsolvable);
        assert_eq!(solve_game(layout(&[&[7], &[6]], rules)), SearchResult::Solved);
        assert_eq!(solve_game(layout(&[&[7, 7], &[6, 6]], rules)), SearchResult::Unsolvable);
    }

    #[test]
    fn test_priority_order() {
        let rules = Rules::new(3, 2, 7).unwrap();
        let start = State::from(layout(&[&[6], &[7], &[]], rules));
        let mut solver = Solver::new(start.clone());
        assert_eq!(solver.step(), ControlFlow::Continue(()));

        let mut queued: Vec<State> = solver
            .frontier
            .iter()
            .map(|q| q.state.clone())
            .collect();
        queued.sort_by(|a, b| b.priority_cmp(a));

        // the best queued successor is popped next
        let top = solver.frontier.peek().unwrap();
        assert_eq!(top.state.encode(), queued[0].encode());
        assert_eq!(top.state, start.do_move(Move::new(0, 1)).unwrap());
        assert!(top.state.is_final());
        assert_eq!(solver.step(), ControlFlow::Break(SearchResult::Solved));
    }

    #[test]
    fn test_ties_pop_in_insertion_order() {
        let a = State::from(layout(&[&[6], &[7]], tiny()));
        let b = State::from(layout(&[&[7], &[6]], tiny()));
        assert_eq!(a.priority_cmp(&b), Ordering::Equal);

        let first = Queued {
            state: a.clone(),
            serial: 0,
            depth: 0,
        };
        let second = Queued {
            state: b,
            serial: 1,
            depth: 0,
        };
        assert!(first > second);

        let mut heap = BinaryHeap::new();
        heap.push(second);
        heap.push(first);
        assert_eq!(heap.pop().unwrap().state, a);
    }

    #[test]
    fn test_limit() {
        let layout = default_shuffle(Rules::STANDARD, 7);
        let mut solver =
            Solver::new(State::from(layout)).with_limit(NonZeroUsize::new(1).unwrap());
        let res = solver.solve();
        // either the first expansion already wins or the limit trips
        assert!(matches!(
            res,
            SearchResult::Terminated | SearchResult::Solved
        ));
        if res == SearchResult::Terminated {
            assert!(solver.visited().len() > 1);
        }
    }

    #[derive(Default)]
    struct Flag(Cell<bool>);

    impl TerminateSignal for Flag {
        fn terminate(&self) {
            self.0.set(true);
        }

        fn is_terminated(&self) -> bool {
            self.0.get()
        }
    }

    #[test]
    fn test_limit_leaves_signal_alone() {
        let flag = Flag::default();
        let res = solve_with_tracking(
            default_shuffle(Rules::STANDARD, 7),
            NonZeroUsize::new(5),
            &EmptySearchStats {},
            &flag,
        );
        assert_eq!(res, SearchResult::Terminated);
        assert!(!flag.is_terminated());
    }

    struct Stopped;

    impl TerminateSignal for Stopped {
        fn terminate(&self) {}

        fn is_terminated(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_terminate_signal() {
        let layout = default_shuffle(Rules::STANDARD, 7);
        let res = solve_with_tracking(layout, None, &EmptySearchStats {}, &Stopped);
        assert_eq!(res, SearchResult::Terminated);
    }

    #[test]
    fn test_independent_solvers() {
        let rules = tiny();
        let mut first = Solver::new(State::from(layout(&[&[6], &[]], rules)));
        let mut second = Solver::new(State::from(layout(&[&[6, 7], &[]], rules)));
        assert_eq!(second.solve(), SearchResult::Solved);
        assert_eq!(first.solve(), SearchResult::Unsolvable);
        assert_eq!(first.visited().len(), 2);
    }
}
