//! Result reporting and cancellation plumbing for parallel search workers.

use crate::domain::Word;
use crate::eval::EvalStats;
use crate::search::partition::SearchRange;
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Message sent from workers to the coordinator.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    /// Worker found a qualifying `r7`.
    Found { worker_id: usize, r7: Word },
    /// Worker has stopped scanning, either exhausted or cancelled.
    Finished(WorkerReport),
}

/// What a worker did before it stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    pub worker_id: usize,
    pub range: SearchRange,
    /// Trials run to completion.
    pub candidates_evaluated: u64,
    /// Evaluator counters summed over all trials.
    pub eval: EvalStats,
    /// True if the worker saw the cancellation signal before finishing its range.
    pub cancelled: bool,
    /// The solution this worker reported, if any.
    pub found: Option<Word>,
}

impl WorkerReport {
    pub fn new(worker_id: usize, range: SearchRange) -> Self {
        Self {
            worker_id,
            range,
            candidates_evaluated: 0,
            eval: EvalStats::default(),
            cancelled: false,
            found: None,
        }
    }
}

/// Write-once stop flag shared by the coordinator and every worker.
///
/// Cloning shares the same flag. Workers poll it between trials; raising
/// it never interrupts a trial already in progress.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    raised: Arc<AtomicBool>,
}

impl CancelSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the signal. Returns true for the call that actually raised it.
    pub fn raise(&self) -> bool {
        !self.raised.swap(true, Ordering::SeqCst)
    }

    /// Check if workers should stop.
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }
}

/// Channel endpoints for a worker.
#[derive(Debug, Clone)]
pub struct WorkerChannels {
    /// Send messages to coordinator.
    pub to_coordinator: Sender<WorkerMessage>,
    /// Shared stop flag.
    pub cancel: CancelSignal,
}

/// Channel endpoints for the coordinator.
#[derive(Debug)]
pub struct CoordinatorChannels {
    /// Receive messages from workers.
    pub from_workers: Receiver<WorkerMessage>,
    /// Shared stop flag.
    pub cancel: CancelSignal,
}

/// Create channels for a search with the given number of workers.
///
/// The coordinator keeps no sender, so the receiver disconnects once every
/// worker has dropped its endpoints.
pub fn create_channels(
    num_workers: usize,
    cancel: CancelSignal,
) -> (CoordinatorChannels, Vec<WorkerChannels>) {
    // Unbounded so a worker reporting after the coordinator stopped listening never blocks
    let (worker_tx, coordinator_rx) = unbounded();

    let worker_channels = (0..num_workers)
        .map(|_| WorkerChannels {
            to_coordinator: worker_tx.clone(),
            cancel: cancel.clone(),
        })
        .collect();

    let coordinator = CoordinatorChannels {
        from_workers: coordinator_rx,
        cancel,
    };

    (coordinator, worker_channels)
}
