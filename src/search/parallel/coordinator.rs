//! Parallel search coordinator that manages worker threads.

use crate::domain::Word;
use crate::error::{CalibrationError, Result};
use crate::eval::MemoTable;
use crate::search::config::SearchConfig;
use crate::search::parallel::channel::{
    CancelSignal, CoordinatorChannels, WorkerChannels, WorkerMessage, WorkerReport,
    create_channels,
};
use crate::search::partition::{SearchRange, partition};
use crate::search::result::{ParallelResult, SearchOutcome, SearchStatistics};
use crate::search::trial::Problem;
use crossbeam_channel::RecvTimeoutError;
use log::{debug, info, warn};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How often the coordinator wakes up to check its deadline.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run a parallel search with the given configuration.
pub fn run_parallel_search(config: &SearchConfig) -> Result<ParallelResult> {
    run_parallel_search_with_signal(config, CancelSignal::new())
}

/// Run a parallel search that can also be stopped through `cancel`.
///
/// Raising `cancel` from another thread stops every worker after its current
/// trial. If no solution was reported by then, the outcome is
/// [`SearchOutcome::Cancelled`].
pub fn run_parallel_search_with_signal(
    config: &SearchConfig,
    cancel: CancelSignal,
) -> Result<ParallelResult> {
    let problem = config.validate()?;
    let ranges = partition(problem.modulus, config.num_workers)?;
    let start_time = Instant::now();

    info!("Searching {}", config);
    for (worker_id, range) in ranges.iter().enumerate() {
        debug!("worker {} assigned {}", worker_id, range);
    }

    // Create communication channels
    let (coordinator_channels, worker_channels) = create_channels(ranges.len(), cancel);
    let handles = spawn_workers(
        problem,
        &ranges,
        config.progress_interval,
        worker_channels,
        &coordinator_channels.cancel,
    )?;

    let deadline = config.timeout.map(|t| start_time + t);
    let (outcome, mut reports) = run_coordinator(coordinator_channels, ranges.len(), deadline);

    // Wait for all workers to finish
    join_workers(handles)?;

    reports.sort_by_key(|r| r.worker_id);
    let total_statistics = SearchStatistics::from_reports(&reports, start_time.elapsed());
    info!(
        "{} after {} candidates in {:.2?}",
        outcome, total_statistics.candidates_evaluated, total_statistics.elapsed_time
    );

    Ok(ParallelResult {
        outcome,
        total_statistics,
        workers: reports,
    })
}

/// Spawn one named thread per range. On failure, stop and reap the threads
/// already running before returning the error.
fn spawn_workers(
    problem: Problem,
    ranges: &[SearchRange],
    progress_interval: Option<u32>,
    channels: Vec<WorkerChannels>,
    cancel: &CancelSignal,
) -> Result<Vec<JoinHandle<()>>> {
    let mut handles = Vec::with_capacity(ranges.len());

    for (worker_id, (&range, channels)) in ranges.iter().zip(channels).enumerate() {
        let spawned = thread::Builder::new()
            .name(format!("r7-worker-{}", worker_id))
            .spawn(move || run_worker(worker_id, problem, range, progress_interval, channels));

        match spawned {
            Ok(handle) => handles.push(handle),
            Err(e) => {
                cancel.raise();
                for handle in handles {
                    let _ = handle.join();
                }
                return Err(CalibrationError::WorkerSpawn(e));
            }
        }
    }

    Ok(handles)
}

/// Join every worker, then report the lowest id that panicked.
///
/// Only reachable in unwinding builds; the release profile keeps the
/// default `panic = "unwind"` for this reason.
fn join_workers(handles: Vec<JoinHandle<()>>) -> Result<()> {
    let mut panicked = None;
    for (worker_id, handle) in handles.into_iter().enumerate() {
        if handle.join().is_err() {
            warn!("worker {} panicked", worker_id);
            if panicked.is_none() {
                panicked = Some(worker_id);
            }
        }
    }
    match panicked {
        Some(worker_id) => Err(CalibrationError::WorkerPanicked(worker_id)),
        None => Ok(()),
    }
}

/// Coordinator loop: accept the first solution, broadcast cancellation,
/// and collect a report from every worker.
fn run_coordinator(
    channels: CoordinatorChannels,
    total_workers: usize,
    deadline: Option<Instant>,
) -> (SearchOutcome, Vec<WorkerReport>) {
    let mut found: Option<SearchOutcome> = None;
    let mut reports = Vec::with_capacity(total_workers);

    loop {
        if deadline.is_some_and(|d| Instant::now() >= d) && channels.cancel.raise() {
            warn!("Timeout reached, cancelling workers");
        }

        match channels.from_workers.recv_timeout(POLL_INTERVAL) {
            Ok(WorkerMessage::Found { worker_id, r7 }) => {
                if found.is_none() {
                    channels.cancel.raise();
                    info!("worker {} found r7 = {}, cancelling the rest", worker_id, r7);
                    found = Some(SearchOutcome::Found { r7, worker_id });
                } else {
                    debug!("worker {} also found r7 = {} (ignored)", worker_id, r7);
                }
            }
            Ok(WorkerMessage::Finished(report)) => {
                debug!(
                    "worker {} finished after {} candidates{}",
                    report.worker_id,
                    report.candidates_evaluated,
                    if report.cancelled { " (cancelled)" } else { "" }
                );
                reports.push(report);
                if reports.len() >= total_workers {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                // All senders dropped; a worker died without reporting
                break;
            }
        }
    }

    let outcome = found.unwrap_or_else(|| {
        if reports.iter().any(|r| r.cancelled) {
            SearchOutcome::Cancelled
        } else {
            info!("Domain exhausted without a solution");
            SearchOutcome::NotFound
        }
    });

    (outcome, reports)
}

/// Scan `range` in increasing order. One memo allocation is reused for the
/// whole range and cleared before every trial.
fn run_worker(
    worker_id: usize,
    problem: Problem,
    range: SearchRange,
    progress_interval: Option<u32>,
    channels: WorkerChannels,
) {
    let mut report = WorkerReport::new(worker_id, range);
    let mut memo = MemoTable::new(problem.modulus);

    for r7 in range.iter() {
        if channels.cancel.is_raised() {
            report.cancelled = true;
            break;
        }

        if progress_interval.is_some_and(|every| u32::from(r7) % every == 0) {
            info!("worker {} testing r7 = {}", worker_id, r7);
        }

        let trial = problem.run_trial_in(&mut memo, r7);
        report.candidates_evaluated += 1;
        report.eval.merge(&trial.stats);

        if trial.matched {
            report_solution(worker_id, r7, &channels);
            report.found = Some(r7);
            break;
        }
    }

    let _ = channels.to_coordinator.send(WorkerMessage::Finished(report));
}

fn report_solution(worker_id: usize, r7: Word, channels: &WorkerChannels) {
    info!("worker {} found a solution: r7 = {}", worker_id, r7);
    let _ = channels
        .to_coordinator
        .send(WorkerMessage::Found { worker_id, r7 });
}
