//! Local catalog records fed into the matching engine.

use clap::ValueEnum;

/// Granularity of a check run. A batch is uniform: entirely full-title,
/// entirely season-level, or entirely episode-level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CheckLevel {
    /// One lookup per title.
    Full,
    /// One lookup per (title, season).
    Season,
    /// One lookup per (title, season, episode).
    Episode,
}

/// Comparable attributes derived from file-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalFileMeta {
    pub codec: Option<String>,
    pub resolution: Option<String>,
    pub size_bytes: Option<u64>,
}

impl LocalFileMeta {
    pub fn is_empty(&self) -> bool {
        self.codec.is_none() && self.resolution.is_none() && self.size_bytes.is_none()
    }
}

/// One film, season, or episode to check against the tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalItem {
    pub title: String,
    pub original_title: Option<String>,
    pub year: Option<i32>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    /// Present only when the item was derived from a file record.
    pub file: Option<LocalFileMeta>,
    /// Ranking signal from the source API; absent for folder-derived items.
    pub popularity: Option<f64>,
}

impl LocalItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            original_title: None,
            year: None,
            season: None,
            episode: None,
            file: None,
            popularity: None,
        }
    }
}

/// Normalize a batch to one check level: full-title checks drop any parsed
/// season/episode, season checks keep only items that carry a season, and
/// episode checks keep only items that carry both numbers.
pub fn resolve_level(items: Vec<LocalItem>, level: CheckLevel) -> Vec<LocalItem> {
    match level {
        CheckLevel::Full => items
            .into_iter()
            .map(|mut item| {
                item.season = None;
                item.episode = None;
                item
            })
            .collect(),
        CheckLevel::Season => items
            .into_iter()
            .filter(|item| item.season.is_some())
            .map(|mut item| {
                item.episode = None;
                item
            })
            .collect(),
        CheckLevel::Episode => items
            .into_iter()
            .filter(|item| item.season.is_some() && item.episode.is_some())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode_item(title: &str, season: Option<u32>, episode: Option<u32>) -> LocalItem {
        LocalItem {
            season,
            episode,
            ..LocalItem::new(title)
        }
    }

    #[test]
    fn full_level_strips_season_and_episode() {
        let items = vec![episode_item("Show", Some(2), Some(4))];
        let resolved = resolve_level(items, CheckLevel::Full);
        assert_eq!(resolved[0].season, None);
        assert_eq!(resolved[0].episode, None);
    }

    #[test]
    fn season_level_keeps_only_seasoned_items() {
        let items = vec![
            episode_item("A", Some(1), Some(2)),
            episode_item("B", None, None),
        ];
        let resolved = resolve_level(items, CheckLevel::Season);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].season, Some(1));
        assert_eq!(resolved[0].episode, None);
    }

    #[test]
    fn episode_level_requires_both_numbers() {
        let items = vec![
            episode_item("A", Some(1), Some(2)),
            episode_item("B", Some(1), None),
        ];
        let resolved = resolve_level(items, CheckLevel::Episode);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].title, "A");
    }
}
