//! Pre-dispatch ordering of the candidate item list.
//!
//! The sort decides which truncated subset gets dispatched, so it must be a
//! deterministic total order: every policy breaks ties on the case-folded
//! title.

use clap::ValueEnum;
use std::cmp::Ordering;

use crate::modules::catalog::LocalItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortPolicy {
    /// Year ascending; items without a year sort last.
    Oldest,
    /// Year descending; items without a year sort last.
    Newest,
    /// Popularity descending; missing popularity counts as zero.
    Popular,
    /// Popularity ascending; missing popularity counts as zero.
    LeastPopular,
    /// Case-folded title ascending.
    Az,
    /// Case-folded title descending.
    Za,
    /// No explicit policy; stable alphabetical fallback.
    Original,
}

fn title_key(item: &LocalItem) -> String {
    item.title.to_lowercase()
}

fn compare(policy: SortPolicy, a: &LocalItem, b: &LocalItem) -> Ordering {
    let by_title = title_key(a).cmp(&title_key(b));
    match policy {
        SortPolicy::Oldest => a
            .year
            .unwrap_or(9999)
            .cmp(&b.year.unwrap_or(9999))
            .then(by_title),
        SortPolicy::Newest => b
            .year
            .unwrap_or(0)
            .cmp(&a.year.unwrap_or(0))
            .then(by_title),
        SortPolicy::Popular => b
            .popularity
            .unwrap_or(0.0)
            .total_cmp(&a.popularity.unwrap_or(0.0))
            .then(by_title),
        SortPolicy::LeastPopular => a
            .popularity
            .unwrap_or(0.0)
            .total_cmp(&b.popularity.unwrap_or(0.0))
            .then(by_title),
        SortPolicy::Az | SortPolicy::Original => by_title,
        SortPolicy::Za => by_title.reverse(),
    }
}

pub fn sort_items(items: &mut [LocalItem], policy: SortPolicy) {
    items.sort_by(|a, b| compare(policy, a, b));
}
