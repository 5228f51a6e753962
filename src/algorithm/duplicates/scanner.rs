//! Parallel duplicate scan
//!
//! Surname groups are disjoint, so each one is scored on its own in a
//! dedicated rayon pool and the per-group results are merged at the end.
//! A scoped polling thread turns the shared comparison counter into
//! progress reports. Cancellation is checked after every comparison and
//! discards the whole run; a panic inside one group only loses that group.

use crate::algorithm::duplicates::grouping::{CandidateIndex, SurnameGroup};
use crate::algorithm::duplicates::phonetic::{
    DoubleMetaphoneEncoder, NameStandardiser, PhoneticEncoder, StandardisedNames,
};
use crate::algorithm::duplicates::scoring::PairScorer;
use crate::config::DuplicateConfig;
use crate::error::{KinshipError, Result};
use crate::graph::FamilyTree;
use crate::models::duplicate::{DuplicateIndividual, DuplicateRecord};
use crate::models::ids::IndividualId;
use crate::utils::logging::progress;
use indicatif::ProgressBar;
use itertools::Itertools;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Cooperative cancellation signal shared between a caller and a scan
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; every clone observes it
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Snapshot of scan progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanProgress {
    /// Comparisons finished so far
    pub completed: u64,
    /// Comparisons in the whole scan
    pub total: u64,
    /// Whole percent complete, 0 to 100
    pub percent: u8,
}

impl ScanProgress {
    fn new(completed: u64, total: u64) -> Self {
        let percent = if total == 0 {
            100
        } else {
            (completed.min(total) * 100 / total) as u8
        };
        Self {
            completed,
            total,
            percent,
        }
    }
}

/// Result of a completed scan
#[derive(Debug, Clone, Default)]
pub struct DuplicateReport {
    /// Pairs scoring above zero, best first
    pub candidates: Vec<DuplicateIndividual>,
    /// Keys of surname groups whose scoring failed
    pub failed_groups: Vec<String>,
    /// Pair comparisons performed
    pub comparisons: u64,
}

impl DuplicateReport {
    /// Exportable records for every candidate
    #[must_use]
    pub fn records(&self, tree: &FamilyTree) -> Vec<DuplicateRecord> {
        self.candidates
            .iter()
            .map(|pair| to_record(tree, pair))
            .collect()
    }
}

/// Outcome of a scan: every group scored, or the run was cancelled
#[derive(Debug, Clone)]
pub enum ScanOutcome {
    /// All groups were processed
    Completed(DuplicateReport),
    /// Cancellation was requested; partial results were discarded
    Cancelled,
}

impl ScanOutcome {
    /// The report, if the scan completed
    #[must_use]
    pub fn report(&self) -> Option<&DuplicateReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::Cancelled => None,
        }
    }

    /// Whether the scan was cancelled
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Callback receiving progress snapshots from the polling thread
pub type ProgressCallback = Box<dyn Fn(ScanProgress) + Send + Sync>;

enum GroupOutcome {
    Scored(Vec<DuplicateIndividual>),
    Cancelled,
    Failed(String),
}

/// Finds likely duplicate individuals and caches the last completed scan
pub struct DuplicateScanner {
    config: DuplicateConfig,
    encoder: Box<dyn PhoneticEncoder>,
    standardiser: Box<dyn NameStandardiser>,
    progress_callback: Option<ProgressCallback>,
    cache: Option<DuplicateReport>,
}

impl DuplicateScanner {
    /// Create a scanner using Double Metaphone and an empty name table
    ///
    /// # Errors
    /// `InvalidConfig` if the settings fail validation
    pub fn new(config: DuplicateConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            encoder: Box::new(DoubleMetaphoneEncoder::new()),
            standardiser: Box::new(StandardisedNames::new()),
            progress_callback: None,
            cache: None,
        })
    }

    /// Use a different phonetic encoder; clears any cached scan
    #[must_use]
    pub fn with_encoder(mut self, encoder: impl PhoneticEncoder + 'static) -> Self {
        self.encoder = Box::new(encoder);
        self.cache = None;
        self
    }

    /// Use a forename standardisation table; clears any cached scan
    #[must_use]
    pub fn with_standardiser(mut self, standardiser: impl NameStandardiser + 'static) -> Self {
        self.standardiser = Box::new(standardiser);
        self.cache = None;
        self
    }

    /// Receive progress snapshots while scanning
    #[must_use]
    pub fn with_progress_callback(
        mut self,
        callback: impl Fn(ScanProgress) + Send + Sync + 'static,
    ) -> Self {
        self.progress_callback = Some(Box::new(callback));
        self
    }

    /// Settings in use
    #[must_use]
    pub const fn config(&self) -> &DuplicateConfig {
        &self.config
    }

    /// Scan the tree for duplicate candidates
    ///
    /// A completed report is cached and returned by later calls until
    /// [`DuplicateScanner::invalidate`] is called. A cancelled scan leaves
    /// the cache empty.
    ///
    /// # Errors
    /// `InvalidConfig` if the worker pool cannot be created
    pub fn scan(&mut self, tree: &FamilyTree, token: &CancellationToken) -> Result<ScanOutcome> {
        if let Some(report) = &self.cache {
            debug!("Returning cached duplicate scan");
            return Ok(ScanOutcome::Completed(report.clone()));
        }

        let start = Instant::now();
        let index = CandidateIndex::build(tree, self.encoder.as_ref(), self.standardiser.as_ref());
        let total = index.total_comparisons();
        info!(
            "Scanning {} surname groups for duplicates ({} comparisons, {} threads)",
            index.groups().len(),
            total,
            self.config.worker_threads
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.worker_threads)
            .thread_name(|i| format!("duplicate-scan-{i}"))
            .build()
            .map_err(|e| KinshipError::InvalidConfig(format!("worker pool: {e}")))?;

        let scorer = PairScorer::new(
            tree,
            self.encoder.as_ref(),
            self.config.eligibility_distance_squared,
        );
        let counter = AtomicU64::new(0);
        let finished = AtomicBool::new(false);
        let interval = Duration::from_millis(self.config.progress_interval_ms);
        let bar = self
            .config
            .show_progress_bar
            .then(|| progress::create_main_progress_bar(total, Some("Scanning for duplicates")));
        let reporter = Reporter {
            callback: self.progress_callback.as_deref(),
            bar: bar.as_ref(),
            total,
        };

        let outcomes = thread::scope(|scope| {
            let poller = scope.spawn(|| {
                while !finished.load(Ordering::Acquire) {
                    reporter.report(counter.load(Ordering::Relaxed));
                    thread::park_timeout(interval);
                }
            });

            let outcomes: Vec<(&SurnameGroup, GroupOutcome)> = pool.install(|| {
                index
                    .groups()
                    .par_iter()
                    .map(|group| (group, score_group(group, &index, &scorer, &counter, token)))
                    .collect()
            });

            finished.store(true, Ordering::Release);
            poller.thread().unpark();
            outcomes
        });

        let comparisons = counter.load(Ordering::Relaxed);
        let cancelled = token.is_cancelled()
            || outcomes
                .iter()
                .any(|(_, outcome)| matches!(outcome, GroupOutcome::Cancelled));
        if cancelled {
            if let Some(bar) = &bar {
                progress::finish_and_clear(bar);
            }
            info!("Duplicate scan cancelled after {comparisons} comparisons");
            return Ok(ScanOutcome::Cancelled);
        }

        reporter.report(total);
        if let Some(bar) = &bar {
            progress::finish_progress_bar(bar, Some("Duplicate scan complete"));
        }

        let mut candidates = Vec::new();
        let mut failed_groups = Vec::new();
        for (group, outcome) in outcomes {
            match outcome {
                GroupOutcome::Scored(found) => candidates.extend(found),
                GroupOutcome::Failed(reason) => {
                    warn!(
                        "Scoring surname group {} ({} members) failed: {reason}",
                        group.key,
                        group.members.len()
                    );
                    failed_groups.push(group.key.clone());
                }
                GroupOutcome::Cancelled => {}
            }
        }
        sort_candidates(&mut candidates);

        info!(
            "Found {} possible duplicates in {:.2?}",
            candidates.len(),
            start.elapsed()
        );
        let report = DuplicateReport {
            candidates,
            failed_groups,
            comparisons,
        };
        self.cache = Some(report.clone());
        Ok(ScanOutcome::Completed(report))
    }

    /// Drop the cached scan so the next call rescans
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// The cached report, if a scan has completed
    #[must_use]
    pub const fn cached(&self) -> Option<&DuplicateReport> {
        self.cache.as_ref()
    }

    /// Cached candidates scoring at least `min_score`, best first
    ///
    /// Empty until a scan has completed.
    #[must_use]
    pub fn build_duplicate_list(&self, min_score: i32) -> Vec<DuplicateIndividual> {
        self.cache
            .iter()
            .flat_map(|report| &report.candidates)
            .filter(|pair| pair.score >= min_score)
            .copied()
            .collect()
    }

    /// Cached candidates at or above the configured minimum score
    #[must_use]
    pub fn duplicates(&self) -> Vec<DuplicateIndividual> {
        self.build_duplicate_list(self.config.min_score)
    }

    /// Highest cached score, zero when nothing was found
    #[must_use]
    pub fn max_duplicate_score(&self) -> i32 {
        self.cache
            .iter()
            .flat_map(|report| &report.candidates)
            .map(|pair| pair.score)
            .max()
            .unwrap_or(0)
            .max(0)
    }

    /// Score one pair directly, ignoring eligibility
    #[must_use]
    pub fn score_pair(&self, tree: &FamilyTree, a: IndividualId, b: IndividualId) -> i32 {
        PairScorer::new(
            tree,
            self.encoder.as_ref(),
            self.config.eligibility_distance_squared,
        )
        .score(a, b)
    }
}

impl std::fmt::Debug for DuplicateScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DuplicateScanner")
            .field("config", &self.config)
            .field("cached", &self.cache.as_ref().map(|r| r.candidates.len()))
            .finish_non_exhaustive()
    }
}

struct Reporter<'a> {
    callback: Option<&'a (dyn Fn(ScanProgress) + Send + Sync)>,
    bar: Option<&'a ProgressBar>,
    total: u64,
}

impl Reporter<'_> {
    fn report(&self, completed: u64) {
        let snapshot = ScanProgress::new(completed, self.total);
        if let Some(bar) = self.bar {
            bar.set_position(snapshot.completed.min(self.total));
        }
        if let Some(callback) = self.callback {
            callback(snapshot);
        }
    }
}

fn score_group(
    group: &SurnameGroup,
    index: &CandidateIndex,
    scorer: &PairScorer<'_>,
    counter: &AtomicU64,
    token: &CancellationToken,
) -> GroupOutcome {
    if token.is_cancelled() {
        return GroupOutcome::Cancelled;
    }
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut found = Vec::new();
        for (a, b) in group.members.iter().copied().tuple_combinations() {
            if scorer.is_eligible(index, a, b) {
                let score = scorer.score(a, b);
                if score > 0 {
                    found.push(DuplicateIndividual::new(a, b, score));
                }
            }
            counter.fetch_add(1, Ordering::Relaxed);
            if token.is_cancelled() {
                return None;
            }
        }
        Some(found)
    }));
    match result {
        Ok(Some(found)) => GroupOutcome::Scored(found),
        Ok(None) => GroupOutcome::Cancelled,
        Err(payload) => GroupOutcome::Failed(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Best score first, then by handle so output order never depends on
/// thread scheduling
fn sort_candidates(candidates: &mut [DuplicateIndividual]) {
    candidates.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.ordered_pair().cmp(&b.ordered_pair()))
    });
}

fn to_record(tree: &FamilyTree, pair: &DuplicateIndividual) -> DuplicateRecord {
    let a = tree.individual(pair.individual_a);
    let b = tree.individual(pair.individual_b);
    DuplicateRecord {
        id_a: a.id().to_string(),
        name_a: a.name(),
        id_b: b.id().to_string(),
        name_b: b.name(),
        score: pair.score,
    }
}
