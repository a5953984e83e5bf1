//! Best-effort extraction of comparable attributes from filenames and
//! file-record fields.
//!
//! Codec, resolution, and size are independent extractions; a miss on one
//! never blocks the others.

use regex::Regex;
use std::sync::OnceLock;

use super::item::LocalFileMeta;

fn codec_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(x264|x265|h264|h265|vp9|av1)\b").expect("valid regex"))
}

fn resolution_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(\d{1,4}p|4k)\b").expect("valid regex"))
}

fn size_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*(kb|mb|gb)\b").expect("valid regex")
    })
}

fn season_episode_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)s(\d{1,2})(?:[xe]?(\d{1,2}))?").expect("valid regex"))
}

fn year_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\((\d{4})\)\s*$").expect("valid regex"))
}

/// Lowercase a codec token, folding the `x26N` aliases onto `h26N` so the
/// encoder prefix never causes a false mismatch.
pub fn normalize_codec(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    match lower.as_str() {
        "x264" => "h264".to_string(),
        "x265" => "h265".to_string(),
        _ => lower,
    }
}

/// Derive codec, resolution, and byte size from a filename stem or any other
/// free-form label.
pub fn extract_file_meta(name: &str) -> LocalFileMeta {
    let codec = codec_re()
        .find(name)
        .map(|m| normalize_codec(m.as_str()));

    let resolution = resolution_re()
        .find(name)
        .map(|m| m.as_str().to_lowercase());

    let size_bytes = size_re().captures(name).and_then(|caps| {
        let value: f64 = caps.get(1)?.as_str().parse().ok()?;
        let multiplier = match caps.get(2)?.as_str().to_lowercase().as_str() {
            "kb" => 1024.0,
            "mb" => 1024.0 * 1024.0,
            "gb" => 1024.0 * 1024.0 * 1024.0,
            _ => return None,
        };
        Some((value * multiplier) as u64)
    });

    LocalFileMeta {
        codec,
        resolution,
        size_bytes,
    }
}

/// Parse `SxxEyy`-style tokens (also `S01x02` and bare `S01`).
pub fn parse_season_episode(name: &str) -> (Option<u32>, Option<u32>) {
    let Some(caps) = season_episode_re().captures(name) else {
        return (None, None);
    };
    let season = caps.get(1).and_then(|m| m.as_str().parse().ok());
    let episode = caps.get(2).and_then(|m| m.as_str().parse().ok());
    (season, episode)
}

/// Split a trailing `(YYYY)` year marker off a filename stem.
pub fn parse_year_suffix(stem: &str) -> (String, Option<i32>) {
    if let Some(caps) = year_suffix_re().captures(stem) {
        let year = caps.get(1).and_then(|m| m.as_str().parse().ok());
        let title = stem[..caps.get(0).map_or(stem.len(), |m| m.start())]
            .trim()
            .to_string();
        return (title, year);
    }
    (stem.trim().to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_all_three_attributes() {
        let meta = extract_file_meta("Some.Movie.2019.1080p.x264.4.5gb");
        assert_eq!(meta.codec.as_deref(), Some("h264"));
        assert_eq!(meta.resolution.as_deref(), Some("1080p"));
        assert_eq!(
            meta.size_bytes,
            Some((4.5 * 1024.0 * 1024.0 * 1024.0) as u64)
        );
    }

    #[test]
    fn extractions_are_independent() {
        let meta = extract_file_meta("Plain Title 720P");
        assert_eq!(meta.codec, None);
        assert_eq!(meta.resolution.as_deref(), Some("720p"));
        assert_eq!(meta.size_bytes, None);
    }

    #[test]
    fn x26n_aliases_fold_onto_h26n() {
        assert_eq!(normalize_codec("X265"), "h265");
        assert_eq!(normalize_codec("h264"), "h264");
        assert_eq!(normalize_codec("AV1"), "av1");
        // unknown codecs are only case-folded
        assert_eq!(normalize_codec("XviD"), "xvid");
    }

    #[test]
    fn codec_must_be_a_whole_word() {
        let meta = extract_file_meta("prefixx264suffix");
        assert_eq!(meta.codec, None);
    }

    #[test]
    fn four_k_counts_as_resolution() {
        let meta = extract_file_meta("Movie.4K.HDR.av1");
        assert_eq!(meta.resolution.as_deref(), Some("4k"));
        assert_eq!(meta.codec.as_deref(), Some("av1"));
    }

    #[test]
    fn size_units_are_binary_multiples() {
        let meta = extract_file_meta("show 700MB rip");
        assert_eq!(meta.size_bytes, Some(700 * 1024 * 1024));
        let meta = extract_file_meta("tiny 512kb sample");
        assert_eq!(meta.size_bytes, Some(512 * 1024));
    }

    #[test]
    fn parses_season_and_episode_tokens() {
        assert_eq!(parse_season_episode("Show.S02E05.mkv"), (Some(2), Some(5)));
        assert_eq!(parse_season_episode("Show.s3"), (Some(3), None));
        assert_eq!(parse_season_episode("Show.1x02"), (None, None));
        assert_eq!(parse_season_episode("Show 2x05"), (None, None));
        assert_eq!(parse_season_episode("Show S01x04"), (Some(1), Some(4)));
        assert_eq!(parse_season_episode("No markers here"), (None, None));
    }

    #[test]
    fn year_suffix_is_split_off() {
        assert_eq!(
            parse_year_suffix("The Thing (1982)"),
            ("The Thing".to_string(), Some(1982))
        );
        assert_eq!(parse_year_suffix("No Year"), ("No Year".to_string(), None));
        // only a trailing marker counts
        assert_eq!(
            parse_year_suffix("(2001) A Space Odyssey"),
            ("(2001) A Space Odyssey".to_string(), None)
        );
    }
}
