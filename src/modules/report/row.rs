//! The unit handed to rendering: one row per dispatched item.

use crate::modules::matcher::{Classification, MatchResult, VariantPresence};

#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Metadata-scored classification against the best candidate.
    Scored(MatchResult),
    /// Boolean presence tag from the title-variant probe.
    Presence(VariantPresence),
}

impl RowOutcome {
    pub fn is_missing(&self) -> bool {
        match self {
            RowOutcome::Scored(result) => result.classification == Classification::Missing,
            RowOutcome::Presence(presence) => !presence.is_present(),
        }
    }

    pub fn matched_title(&self) -> Option<&str> {
        match self {
            RowOutcome::Scored(result) => result.matched_title.as_deref(),
            RowOutcome::Presence(_) => None,
        }
    }

    /// Short status label for table and CSV cells.
    pub fn status_label(&self) -> String {
        match self {
            RowOutcome::Scored(result) => result.classification.to_string(),
            RowOutcome::Presence(presence) => presence.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub title: String,
    pub year: Option<i32>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub outcome: RowOutcome,
}
