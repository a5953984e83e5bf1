//! Search query construction, including title-variant expansion for the
//! presence-probe mode.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

fn parenthetical_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*\([^)]*\)\s*$").expect("valid regex"))
}

/// Build the free-text query for one lookup: trimmed title, then ` Sxx` when
/// a season is given, then `Eyy` when an episode is given. Values of 100 or
/// more keep their natural width.
pub fn build_query(title: &str, season: Option<u32>, episode: Option<u32>) -> String {
    let mut query = title.trim().to_string();
    if let Some(season) = season {
        query.push_str(&format!(" S{:02}", season));
    }
    if let Some(episode) = episode {
        query.push_str(&format!("E{:02}", episode));
    }
    query
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantLabel {
    Local,
    Original,
}

impl fmt::Display for VariantLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantLabel::Local => write!(f, "Local"),
            VariantLabel::Original => write!(f, "Original"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryVariant {
    pub label: VariantLabel,
    pub query: String,
}

/// Strip one trailing parenthetical suffix, e.g. `Title (1999)` or
/// `Title (VOSTFR)`.
pub fn strip_parenthetical(title: &str) -> String {
    parenthetical_re().replace(title.trim(), "").to_string()
}

/// Ordered title variants to probe: the display title first, then the
/// original-language title when present and different. Identical variants
/// collapse to a single probe.
pub fn expand_variants(
    title: &str,
    original_title: Option<&str>,
    season: Option<u32>,
    episode: Option<u32>,
) -> Vec<QueryVariant> {
    let local = strip_parenthetical(title);
    let mut variants = vec![QueryVariant {
        label: VariantLabel::Local,
        query: build_query(&local, season, episode),
    }];

    if let Some(original) = original_title {
        let original = strip_parenthetical(original);
        if !original.is_empty() && original.to_lowercase() != local.to_lowercase() {
            variants.push(QueryVariant {
                label: VariantLabel::Original,
                query: build_query(&original, season, episode),
            });
        }
    }

    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_title_query_is_the_trimmed_title() {
        assert_eq!(build_query("  Alien  ", None, None), "Alien");
    }

    #[test]
    fn season_and_episode_are_zero_padded() {
        assert_eq!(build_query("Show", Some(2), None), "Show S02");
        assert_eq!(build_query("Show", Some(2), Some(5)), "Show S02E05");
    }

    #[test]
    fn wide_numbers_keep_their_natural_width() {
        assert_eq!(build_query("Soap", Some(101), Some(1234)), "Soap S101E1234");
    }

    #[test]
    fn query_round_trips_back_to_the_title() {
        let title = "The Wire";
        let query = build_query(title, Some(3), Some(11));
        let stripped = query.strip_suffix(" S03E11").unwrap();
        assert_eq!(stripped, title);
    }

    #[test]
    fn parenthetical_suffix_is_stripped() {
        assert_eq!(strip_parenthetical("Heat (1995)"), "Heat");
        assert_eq!(strip_parenthetical("Heat"), "Heat");
        // only a trailing suffix is removed
        assert_eq!(strip_parenthetical("(500) Days of Summer"), "(500) Days of Summer");
    }

    #[test]
    fn identical_variants_collapse_to_one_probe() {
        let variants = expand_variants("Alien", Some("Alien"), None, None);
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].label, VariantLabel::Local);
    }

    #[test]
    fn distinct_original_title_adds_a_second_variant() {
        let variants = expand_variants("The Gendarme of Saint-Tropez (1964)", Some("Le Gendarme de Saint-Tropez"), None, None);
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].query, "The Gendarme of Saint-Tropez");
        assert_eq!(variants[1].label, VariantLabel::Original);
        assert_eq!(variants[1].query, "Le Gendarme de Saint-Tropez");
    }

    #[test]
    fn case_only_differences_still_collapse() {
        let variants = expand_variants("ALIEN", Some("Alien (1979)"), None, None);
        assert_eq!(variants.len(), 1);
    }
}
