//! Concurrent lookup dispatcher.
//!
//! Runs one lookup+match cycle per item over a fixed-width worker pool.
//! The input list is truncated to the configured limit before dispatch, so
//! the pre-dispatch sort decides which subset runs. Completion order is
//! unspecified; after each completed task is collected, a fixed pacing delay
//! keeps the aggregate request rate under the tracker's limit without
//! capping concurrency width.

use futures::{stream, StreamExt};
use log::info;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::modules::catalog::LocalItem;
use crate::modules::matcher::{best_match, probe_variants};
use crate::modules::report::row::{ReportRow, RowOutcome};
use crate::modules::tracker::{build_query, expand_variants, SearchBackend};
use crate::shared::config::Tuning;

#[derive(Debug, Clone)]
pub struct DispatchOptions {
    pub workers: usize,
    pub limit: usize,
    pub pacing_delay: Duration,
}

impl DispatchOptions {
    pub fn from_tuning(tuning: &Tuning, limit: usize) -> Self {
        Self {
            workers: tuning.workers,
            limit,
            pacing_delay: tuning.pacing_delay(),
        }
    }
}

/// Which matching protocol each task runs. The two are alternatives, never
/// layered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Fetch once, score candidates against local metadata.
    Scored,
    /// Probe presence per title variant.
    Variants,
}

pub struct Dispatcher {
    backend: Arc<dyn SearchBackend>,
    options: DispatchOptions,
    strategy: MatchStrategy,
}

impl Dispatcher {
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        options: DispatchOptions,
        strategy: MatchStrategy,
    ) -> Self {
        Self {
            backend,
            options,
            strategy,
        }
    }

    /// Run every task and collect exactly one row per dispatched item.
    pub async fn run(&self, items: Vec<LocalItem>) -> Vec<ReportRow> {
        let selected: Vec<LocalItem> = items.into_iter().take(self.options.limit).collect();
        let total = selected.len();
        let workers = self.options.workers.max(1);
        info!(
            "Dispatching {} lookups across {} workers",
            total, workers
        );

        let mut completed = stream::iter(selected.into_iter().map(|item| {
            let backend = Arc::clone(&self.backend);
            let strategy = self.strategy;
            async move { check_one(backend.as_ref(), strategy, item).await }
        }))
        .buffer_unordered(workers);

        let mut rows = Vec::with_capacity(total);
        while let Some(row) = completed.next().await {
            info!("[{}/{}] '{}' -> {}", rows.len() + 1, total, row.title, row.outcome.status_label());
            rows.push(row);
            if !self.options.pacing_delay.is_zero() {
                sleep(self.options.pacing_delay).await;
            }
        }
        rows
    }
}

async fn check_one(
    backend: &dyn SearchBackend,
    strategy: MatchStrategy,
    item: LocalItem,
) -> ReportRow {
    let outcome = match strategy {
        MatchStrategy::Scored => {
            let query = build_query(&item.title, item.season, item.episode);
            let candidates = backend.search(&query).await;
            let local = item.file.clone().unwrap_or_default();
            RowOutcome::Scored(best_match(&local, &candidates))
        }
        MatchStrategy::Variants => {
            let variants = expand_variants(
                &item.title,
                item.original_title.as_deref(),
                item.season,
                item.episode,
            );
            RowOutcome::Presence(probe_variants(backend, &variants).await)
        }
    };

    ReportRow {
        title: item.title,
        year: item.year,
        season: item.season,
        episode: item.episode,
        outcome,
    }
}
