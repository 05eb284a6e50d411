//! Search result types and statistics

use crate::domain::Word;
use crate::search::parallel::channel::WorkerReport;
use std::time::Duration;

/// How a calibration search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A worker reported a qualifying `r7`.
    ///
    /// If the domain holds several solutions this is whichever was reported
    /// first, which depends on thread scheduling.
    Found { r7: Word, worker_id: usize },
    /// Every worker exhausted its range without a match.
    NotFound,
    /// The search was stopped by a timeout or an external signal before
    /// any solution was reported.
    Cancelled,
}

impl SearchOutcome {
    pub fn r7(&self) -> Option<Word> {
        match self {
            SearchOutcome::Found { r7, .. } => Some(*r7),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }
}

impl std::fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchOutcome::Found { r7, worker_id } => {
                write!(f, "found r7 = {} (worker {})", r7, worker_id)
            }
            SearchOutcome::NotFound => write!(f, "no solution found"),
            SearchOutcome::Cancelled => write!(f, "search cancelled"),
        }
    }
}

/// Statistics aggregated over all workers
#[derive(Debug, Clone, Default)]
pub struct SearchStatistics {
    /// Wall-clock time from launch until every worker stopped
    pub elapsed_time: Duration,
    /// Trials run to completion
    pub candidates_evaluated: u64,
    /// Pairs computed from scratch across all trials
    pub pairs_computed: u64,
    /// Memo table hits across all trials
    pub memo_hits: u64,
    /// Deepest evaluation stack seen by any worker
    pub max_depth: usize,
    /// Workers that stopped because of the cancellation signal
    pub workers_cancelled: usize,
}

impl SearchStatistics {
    pub fn from_reports(reports: &[WorkerReport], elapsed_time: Duration) -> Self {
        let mut stats = Self {
            elapsed_time,
            ..Default::default()
        };
        for report in reports {
            stats.candidates_evaluated += report.candidates_evaluated;
            stats.pairs_computed += report.eval.pairs_computed;
            stats.memo_hits += report.eval.memo_hits;
            stats.max_depth = stats.max_depth.max(report.eval.max_depth);
            stats.workers_cancelled += usize::from(report.cancelled);
        }
        stats
    }

    /// Get candidates evaluated per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.candidates_evaluated as f64 / secs
        }
    }

    /// Fraction of `(r0, r1)` visits answered by the memo table (0.0 to 1.0)
    pub fn memo_hit_rate(&self) -> f64 {
        let calls = self.pairs_computed + self.memo_hits;
        if calls == 0 {
            0.0
        } else {
            self.memo_hits as f64 / calls as f64
        }
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Time: {:.2?}", self.elapsed_time)?;
        writeln!(f, "Candidates evaluated: {}", self.candidates_evaluated)?;
        writeln!(f, "Throughput: {:.0} candidates/sec", self.throughput())?;
        writeln!(f, "Pairs computed: {}", self.pairs_computed)?;
        writeln!(f, "Memo hit rate: {:.2}%", self.memo_hit_rate() * 100.0)?;
        writeln!(f, "Max stack depth: {}", self.max_depth)?;
        write!(f, "Workers cancelled: {}", self.workers_cancelled)
    }
}

/// Result from parallel search execution.
#[derive(Debug, Clone)]
pub struct ParallelResult {
    pub outcome: SearchOutcome,
    /// Statistics aggregated from all workers.
    pub total_statistics: SearchStatistics,
    /// Per-worker reports, ordered by worker id.
    pub workers: Vec<WorkerReport>,
}
