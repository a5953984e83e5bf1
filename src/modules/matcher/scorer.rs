//! Similarity scoring between a local file and remote candidates.
//!
//! Scoring is attribute equality, not fuzzy title matching: byte size is the
//! strongest signal, codec and resolution refine it. The score is a ranking
//! key for candidate selection and is not user-facing.

use std::fmt;

use crate::modules::catalog::metadata::normalize_codec;
use crate::modules::catalog::LocalFileMeta;
use crate::modules::tracker::RemoteCandidate;

const EXACT_SIZE_POINTS: i64 = 1000;
const CLOSE_SIZE_POINTS: i64 = 500;
const CODEC_POINTS: i64 = 300;
const RESOLUTION_POINTS: i64 = 200;

/// Relative size difference bounds, both inclusive.
const EXACT_SIZE_TOLERANCE: f64 = 0.01;
const CLOSE_SIZE_TOLERANCE: f64 = 0.20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Exact,
    Close,
    Different,
    Missing,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Exact => write!(f, "Exact"),
            Classification::Close => write!(f, "Close"),
            Classification::Different => write!(f, "Different"),
            Classification::Missing => write!(f, "Missing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub classification: Classification,
    pub confidence: i64,
    pub matched_title: Option<String>,
}

impl MatchResult {
    pub fn missing() -> Self {
        Self {
            classification: Classification::Missing,
            confidence: 0,
            matched_title: None,
        }
    }
}

fn relative_difference(a: u64, b: u64) -> f64 {
    let (a, b) = (a as f64, b as f64);
    let mean = (a + b) / 2.0;
    if mean == 0.0 {
        0.0
    } else {
        (a - b).abs() / mean
    }
}

/// Score one candidate against the local metadata.
pub fn score_candidate(local: &LocalFileMeta, candidate: &RemoteCandidate) -> (Classification, i64) {
    let mut score = 0;
    let mut exact_size = false;
    let mut close_size = false;

    if let (Some(local_size), Some(remote_size)) = (local.size_bytes, candidate.size_bytes) {
        let diff = relative_difference(local_size, remote_size);
        if diff <= EXACT_SIZE_TOLERANCE {
            // within 1% also satisfies the 20% band
            exact_size = true;
            close_size = true;
            score += EXACT_SIZE_POINTS;
        } else if diff <= CLOSE_SIZE_TOLERANCE {
            close_size = true;
            score += CLOSE_SIZE_POINTS;
        }
    }

    let codec_match = match (&local.codec, &candidate.codec) {
        (Some(local_codec), Some(remote_codec)) => {
            normalize_codec(local_codec) == normalize_codec(remote_codec)
        }
        _ => false,
    };
    if codec_match {
        score += CODEC_POINTS;
    }

    let resolution_match = match (&local.resolution, &candidate.resolution) {
        (Some(local_res), Some(remote_res)) => local_res.eq_ignore_ascii_case(remote_res),
        _ => false,
    };
    if resolution_match {
        score += RESOLUTION_POINTS;
    }

    // Missing codec/resolution on either side does not block an exact match.
    let codec_ok = local.codec.is_none() || candidate.codec.is_none() || codec_match;
    let resolution_ok =
        local.resolution.is_none() || candidate.resolution.is_none() || resolution_match;

    let classification = if exact_size && codec_ok && resolution_ok {
        Classification::Exact
    } else if close_size || codec_match || resolution_match {
        Classification::Close
    } else {
        Classification::Different
    };

    (classification, score)
}

/// Pick the best candidate: highest confidence wins, first seen wins ties.
/// An empty candidate list is a `Missing` result with score 0.
pub fn best_match(local: &LocalFileMeta, candidates: &[RemoteCandidate]) -> MatchResult {
    let mut best: Option<MatchResult> = None;
    for candidate in candidates {
        let (classification, confidence) = score_candidate(local, candidate);
        let better = best
            .as_ref()
            .map_or(true, |current| confidence > current.confidence);
        if better {
            best = Some(MatchResult {
                classification,
                confidence,
                matched_title: Some(candidate.title.clone()),
            });
        }
    }
    best.unwrap_or_else(MatchResult::missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(size: Option<u64>, codec: Option<&str>, resolution: Option<&str>) -> LocalFileMeta {
        LocalFileMeta {
            codec: codec.map(str::to_string),
            resolution: resolution.map(str::to_string),
            size_bytes: size,
        }
    }

    fn candidate(
        title: &str,
        size: Option<u64>,
        codec: Option<&str>,
        resolution: Option<&str>,
    ) -> RemoteCandidate {
        RemoteCandidate {
            title: title.to_string(),
            codec: codec.map(str::to_string),
            resolution: resolution.map(str::to_string),
            size_bytes: size,
        }
    }

    #[test]
    fn full_agreement_is_exact_with_all_points() {
        let local = local(Some(1_000_000_000), Some("h264"), Some("1080p"));
        let cand = candidate("rip", Some(1_005_000_000), Some("h264"), Some("1080p"));
        let (classification, score) = score_candidate(&local, &cand);
        assert_eq!(classification, Classification::Exact);
        assert_eq!(score, 1500);
    }

    #[test]
    fn twenty_percent_boundary_is_close() {
        // |1.0e9 - 1.2e9| / 1.1e9 is just above 18%, inside the close band
        let local = local(Some(1_000_000_000), Some("h264"), None);
        let cand = candidate("rip", Some(1_200_000_000), Some("h265"), None);
        let (classification, score) = score_candidate(&local, &cand);
        assert_eq!(classification, Classification::Close);
        assert_eq!(score, 500);
    }

    #[test]
    fn exact_one_percent_boundary_is_inclusive() {
        // sizes chosen so |a-b| / mean == 0.01 exactly
        let local = local(Some(199), None, None);
        let cand = candidate("rip", Some(201), None, None);
        let (classification, score) = score_candidate(&local, &cand);
        assert_eq!(classification, Classification::Exact);
        assert_eq!(score, 1000);
    }

    #[test]
    fn no_local_metadata_means_different_with_zero_score() {
        let local = LocalFileMeta::default();
        let cand = candidate("rip", Some(123), Some("h264"), Some("1080p"));
        let (classification, score) = score_candidate(&local, &cand);
        assert_eq!(classification, Classification::Different);
        assert_eq!(score, 0);
    }

    #[test]
    fn missing_codec_on_one_side_does_not_block_exact() {
        let local = local(Some(1_000_000), None, Some("720p"));
        let cand = candidate("rip", Some(1_000_000), Some("h264"), Some("720p"));
        let (classification, score) = score_candidate(&local, &cand);
        assert_eq!(classification, Classification::Exact);
        assert_eq!(score, 1200);
    }

    #[test]
    fn exact_size_with_conflicting_codec_degrades_to_close() {
        let local = local(Some(1_000_000), Some("h264"), None);
        let cand = candidate("rip", Some(1_000_000), Some("av1"), None);
        let (classification, score) = score_candidate(&local, &cand);
        assert_eq!(classification, Classification::Close);
        assert_eq!(score, 1000);
    }

    #[test]
    fn x264_and_h264_compare_equal() {
        let local = local(None, Some("x264"), None);
        let cand = candidate("rip", None, Some("H264"), None);
        let (classification, score) = score_candidate(&local, &cand);
        assert_eq!(classification, Classification::Close);
        assert_eq!(score, 300);
    }

    #[test]
    fn empty_candidates_is_missing() {
        let result = best_match(&local(Some(1), Some("h264"), None), &[]);
        assert_eq!(result.classification, Classification::Missing);
        assert_eq!(result.confidence, 0);
        assert_eq!(result.matched_title, None);
    }

    #[test]
    fn best_candidate_wins_and_ties_keep_first_seen() {
        let local = local(Some(1_000_000_000), Some("h264"), Some("1080p"));
        let candidates = vec![
            candidate("weak", None, Some("h264"), None),
            candidate("strong", Some(1_000_000_000), Some("h264"), Some("1080p")),
            candidate("tied", Some(1_000_000_000), Some("x264"), Some("1080P")),
        ];
        let result = best_match(&local, &candidates);
        assert_eq!(result.matched_title.as_deref(), Some("strong"));
        assert_eq!(result.confidence, 1500);
        assert_eq!(result.classification, Classification::Exact);
    }

    #[test]
    fn relative_difference_of_zero_sizes_is_zero() {
        assert_eq!(relative_difference(0, 0), 0.0);
    }
}
