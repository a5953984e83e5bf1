//! Post-dispatch row filtering. Filtering only removes rows; it never
//! reorders them.

use clap::ValueEnum;

use crate::modules::matcher::Classification;
use crate::modules::report::row::{ReportRow, RowOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFilter {
    /// Keep every row.
    All,
    /// Keep rows the tracker knows nothing about.
    Missing,
    /// Keep exact matches (in presence mode: anything found).
    #[value(alias = "sent")]
    Exact,
    /// Keep rows present in another version (close or different).
    Versioning,
}

impl ReportFilter {
    pub fn matches(&self, outcome: &RowOutcome) -> bool {
        match self {
            ReportFilter::All => true,
            ReportFilter::Missing => outcome.is_missing(),
            ReportFilter::Exact => match outcome {
                RowOutcome::Scored(result) => result.classification == Classification::Exact,
                RowOutcome::Presence(presence) => presence.is_present(),
            },
            ReportFilter::Versioning => match outcome {
                RowOutcome::Scored(result) => matches!(
                    result.classification,
                    Classification::Close | Classification::Different
                ),
                RowOutcome::Presence(_) => false,
            },
        }
    }
}

pub fn filter_rows(rows: Vec<ReportRow>, filter: ReportFilter) -> Vec<ReportRow> {
    rows.into_iter()
        .filter(|row| filter.matches(&row.outcome))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::matcher::{MatchResult, VariantPresence};

    fn scored_row(title: &str, classification: Classification) -> ReportRow {
        ReportRow {
            title: title.to_string(),
            year: None,
            season: None,
            episode: None,
            outcome: RowOutcome::Scored(MatchResult {
                classification,
                confidence: 0,
                matched_title: None,
            }),
        }
    }

    fn rows() -> Vec<ReportRow> {
        vec![
            scored_row("e", Classification::Exact),
            scored_row("c", Classification::Close),
            scored_row("d", Classification::Different),
            scored_row("m", Classification::Missing),
        ]
    }

    #[test]
    fn all_keeps_everything_in_order() {
        let kept = filter_rows(rows(), ReportFilter::All);
        let titles: Vec<_> = kept.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["e", "c", "d", "m"]);
    }

    #[test]
    fn missing_keeps_only_missing() {
        let kept = filter_rows(rows(), ReportFilter::Missing);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "m");
    }

    #[test]
    fn exact_keeps_only_exact() {
        let kept = filter_rows(rows(), ReportFilter::Exact);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "e");
    }

    #[test]
    fn versioning_keeps_close_and_different() {
        let kept = filter_rows(rows(), ReportFilter::Versioning);
        let titles: Vec<_> = kept.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["c", "d"]);
    }

    #[test]
    fn presence_rows_map_onto_the_filters() {
        let present = RowOutcome::Presence(VariantPresence::Both);
        let absent = RowOutcome::Presence(VariantPresence::Absent);
        assert!(ReportFilter::Exact.matches(&present));
        assert!(!ReportFilter::Exact.matches(&absent));
        assert!(ReportFilter::Missing.matches(&absent));
        assert!(!ReportFilter::Versioning.matches(&present));
    }
}
