//! Filesystem catalog source: walk a directory tree and derive one item per
//! video file from its name.

use log::info;
use std::path::Path;
use walkdir::WalkDir;

use super::item::LocalItem;
use super::metadata::{extract_file_meta, parse_season_episode, parse_year_suffix};
use crate::shared::errors::{AppError, AppResult};

const VIDEO_EXTENSIONS: &[&str] = &["mkv", "mp4", "avi", "mov"];

pub fn scan_folder(root: &Path) -> AppResult<Vec<LocalItem>> {
    if !root.is_dir() {
        return Err(AppError::Configuration(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let mut items = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let is_video = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| VIDEO_EXTENSIONS.contains(&e.to_lowercase().as_str()))
            .unwrap_or(false);
        if !is_video {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let (title, year) = parse_year_suffix(stem);
        let (season, episode) = parse_season_episode(&title);
        let mut meta = extract_file_meta(stem);
        if meta.size_bytes.is_none() {
            // the file is right here, so its real size beats any name token
            meta.size_bytes = entry.metadata().ok().map(|m| m.len());
        }

        items.push(LocalItem {
            title,
            original_title: None,
            year,
            season,
            episode,
            file: Some(meta),
            popularity: None,
        });
    }

    info!("Folder scan found {} video files", items.len());
    Ok(items)
}
