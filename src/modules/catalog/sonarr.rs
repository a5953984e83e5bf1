//! Sonarr catalog source. Yields one item per series, per (series, season),
//! or per episode depending on the requested check level.

use log::info;
use reqwest::Client;
use serde::Deserialize;

use super::api::{api_client, get_json};
use super::item::LocalItem;
use crate::shared::config::AppConfig;
use crate::shared::errors::AppResult;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SonarrSeries {
    id: i64,
    #[serde(default)]
    title: String,
    year: Option<i32>,
    #[serde(default)]
    seasons: Vec<SonarrSeason>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SonarrSeason {
    season_number: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SonarrEpisode {
    season_number: u32,
    episode_number: u32,
}

pub struct SonarrSource {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SonarrSource {
    pub fn from_config(cfg: &AppConfig) -> AppResult<Self> {
        cfg.require_sonarr()?;
        Ok(Self {
            client: api_client(cfg.tuning.timeout())?,
            base_url: cfg.sonarr_url.trim_end_matches('/').to_string(),
            api_key: cfg.sonarr_api_key.clone(),
        })
    }

    async fn series(&self) -> AppResult<Vec<SonarrSeries>> {
        let url = format!("{}/api/v3/series", self.base_url);
        let series: Vec<SonarrSeries> =
            get_json(&self.client, &url, &self.api_key, &[]).await?;
        info!("Sonarr returned {} series", series.len());
        Ok(series)
    }

    /// One item per series (full-title checks).
    pub async fn series_items(&self) -> AppResult<Vec<LocalItem>> {
        Ok(self
            .series()
            .await?
            .into_iter()
            .map(|s| LocalItem {
                year: s.year,
                ..LocalItem::new(s.title)
            })
            .collect())
    }

    /// One item per (series, season).
    pub async fn season_items(&self) -> AppResult<Vec<LocalItem>> {
        let mut items = Vec::new();
        for series in self.series().await? {
            for season in &series.seasons {
                items.push(LocalItem {
                    year: series.year,
                    season: Some(season.season_number),
                    ..LocalItem::new(series.title.clone())
                });
            }
        }
        Ok(items)
    }

    /// One item per episode, flattened across all series.
    pub async fn episode_items(&self) -> AppResult<Vec<LocalItem>> {
        let mut items = Vec::new();
        for series in self.series().await? {
            let url = format!("{}/api/v3/episode", self.base_url);
            let episodes: Vec<SonarrEpisode> = get_json(
                &self.client,
                &url,
                &self.api_key,
                &[("seriesId", series.id.to_string())],
            )
            .await?;
            for episode in episodes {
                items.push(LocalItem {
                    year: series.year,
                    season: Some(episode.season_number),
                    episode: Some(episode.episode_number),
                    ..LocalItem::new(series.title.clone())
                });
            }
        }
        Ok(items)
    }
}
