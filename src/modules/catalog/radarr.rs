//! Radarr catalog source: one LocalItem per movie, with file-level metadata
//! when Radarr has a file on disk for it.

use log::info;
use reqwest::Client;
use serde::Deserialize;

use super::api::{api_client, get_json};
use super::item::{LocalFileMeta, LocalItem};
use super::metadata::{extract_file_meta, normalize_codec};
use crate::shared::config::AppConfig;
use crate::shared::errors::AppResult;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RadarrMovie {
    #[serde(default)]
    title: String,
    original_title: Option<String>,
    year: Option<i32>,
    popularity: Option<f64>,
    movie_file: Option<RadarrMovieFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RadarrMovieFile {
    size: Option<u64>,
    relative_path: Option<String>,
    media_info: Option<RadarrMediaInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RadarrMediaInfo {
    video_codec: Option<String>,
    resolution: Option<String>,
}

pub struct RadarrSource {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RadarrSource {
    pub fn from_config(cfg: &AppConfig) -> AppResult<Self> {
        cfg.require_radarr()?;
        Ok(Self {
            client: api_client(cfg.tuning.timeout())?,
            base_url: cfg.radarr_url.trim_end_matches('/').to_string(),
            api_key: cfg.radarr_api_key.clone(),
        })
    }

    pub async fn movies(&self) -> AppResult<Vec<LocalItem>> {
        let url = format!("{}/api/v3/movie", self.base_url);
        let movies: Vec<RadarrMovie> =
            get_json(&self.client, &url, &self.api_key, &[]).await?;
        info!("Radarr returned {} movies", movies.len());

        Ok(movies.into_iter().map(to_item).collect())
    }
}

fn to_item(movie: RadarrMovie) -> LocalItem {
    let file = movie.movie_file.map(|f| {
        // mediaInfo wins; fall back to tokens in the stored filename
        let from_path = f
            .relative_path
            .as_deref()
            .map(extract_file_meta)
            .unwrap_or_default();
        let media = f.media_info.unwrap_or(RadarrMediaInfo {
            video_codec: None,
            resolution: None,
        });
        LocalFileMeta {
            codec: media
                .video_codec
                .map(|c| normalize_codec(&c))
                .or(from_path.codec),
            resolution: media
                .resolution
                .map(|r| r.to_lowercase())
                .or(from_path.resolution),
            size_bytes: f.size.or(from_path.size_bytes),
        }
    });

    LocalItem {
        title: movie.title,
        original_title: movie.original_title,
        year: movie.year,
        season: None,
        episode: None,
        file,
        popularity: movie.popularity,
    }
}
