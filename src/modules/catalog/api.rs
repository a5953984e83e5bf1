//! Shared plumbing for the media-management APIs (Radarr/Sonarr).

use log::debug;
use reqwest::Client;
use std::time::Duration;

use crate::shared::errors::{AppError, AppResult};

pub(crate) fn api_client(timeout: Duration) -> AppResult<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("trackscan/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(AppError::from)
}

/// GET a JSON payload with an `X-Api-Key` header. Catalog fetches are fatal
/// on failure: without a catalog there is nothing to dispatch.
pub(crate) async fn get_json<T>(
    client: &Client,
    url: &str,
    api_key: &str,
    query: &[(&str, String)],
) -> AppResult<T>
where
    T: serde::de::DeserializeOwned,
{
    debug!("catalog GET {}", url);
    let response = client
        .get(url)
        .header("X-Api-Key", api_key)
        .query(query)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Transport(format!(
            "{} returned HTTP {}",
            url, status
        )));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| AppError::MalformedResponse(format!("{}: {}", url, e)))
}
