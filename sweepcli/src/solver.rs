use core::num::NonZeroUsize;
use core::time::Duration;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{channel, RecvTimeoutError},
        Arc,
    },
    thread,
};

use anyhow::anyhow;
use sweepbot::{layout::Layout, solver::SearchResult, tracking::TerminateSignal};

use crate::tracking::AtomicSearchStats;

struct TermSignal<'a> {
    term_signal: &'a AtomicBool,
}

impl TerminateSignal for TermSignal<'_> {
    fn terminate(&self) {
        self.term_signal.store(true, Ordering::Relaxed);
    }

    fn is_terminated(&self) -> bool {
        self.term_signal.load(Ordering::Relaxed)
    }
}

/// Runs the search on a worker thread, printing statistics every second when
/// `verbose` is set.
pub(crate) fn run_solve(
    layout: Layout,
    limit: Option<NonZeroUsize>,
    verbose: bool,
    term_signal: &Arc<AtomicBool>,
) -> anyhow::Result<(SearchResult, AtomicSearchStats)> {
    let ss = Arc::new(AtomicSearchStats::new());

    let (send, recv) = channel::<()>();

    let child = {
        let ss_clone = ss.clone();
        let term = term_signal.clone();
        thread::Builder::new().spawn(move || {
            let res = sweepbot::solver::solve_with_tracking(
                layout,
                limit,
                ss_clone.as_ref(),
                &TermSignal {
                    term_signal: term.as_ref(),
                },
            );
            send.send(()).ok();
            res
        })?
    };

    if verbose {
        loop {
            match recv.recv_timeout(Duration::from_millis(1000)) {
                Err(RecvTimeoutError::Disconnected) | Ok(()) => break,
                Err(RecvTimeoutError::Timeout) => println!("{ss}"),
            }
        }
    }

    let res = child
        .join()
        .map_err(|_| anyhow!("search thread panicked"))?;
    let stats = Arc::try_unwrap(ss).map_err(|_| anyhow!("search statistics still shared"))?;
    Ok((res, stats))
}
