//! Tracker search client with rate-limit aware retries.
//!
//! The contract at this boundary: `search` never fails. Rate limiting is
//! retried under the backoff policy; every other failure is logged and
//! degrades to an empty candidate list so one bad lookup cannot abort a
//! batch. Retry state is per call, so the client is safe to share across
//! workers.

use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::future::Future;
use tokio::time::sleep;

use super::response::{parse_search_response, RemoteCandidate, SearchResponse};
use super::retry_policy::RetryPolicy;
use crate::shared::config::AppConfig;
use crate::shared::errors::{AppError, AppResult};

/// Seam between the matching engine and the remote search index. Mockable so
/// the dispatcher and probes can be tested with scripted candidates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Look up one query. Never errors; failures come back as zero results.
    async fn search(&self, query: &str) -> Vec<RemoteCandidate>;
}

/// Outcome of one HTTP attempt against the tracker.
pub(crate) enum AttemptOutcome {
    RateLimited,
    Done(Vec<RemoteCandidate>),
}

/// Drive attempts under the backoff policy: a rate-limited attempt is
/// retried up to `max_retries` times (so `max_retries + 1` attempts total),
/// anything else is final.
pub(crate) async fn run_with_backoff<F, Fut>(
    policy: &RetryPolicy,
    query: &str,
    mut attempt: F,
) -> Vec<RemoteCandidate>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AttemptOutcome>,
{
    for n in 0..=policy.max_retries {
        match attempt().await {
            AttemptOutcome::Done(candidates) => return candidates,
            AttemptOutcome::RateLimited => {
                if n == policy.max_retries {
                    break;
                }
                let wait = policy.delay_for(n);
                warn!(
                    "Tracker rate limited for '{}' (attempt {}/{}). Waiting {:?} before retry.",
                    query,
                    n + 1,
                    policy.max_retries + 1,
                    wait
                );
                sleep(wait).await;
            }
        }
    }

    error!(
        "Tracker rate limit exceeded after {} attempts for '{}'",
        policy.max_retries + 1,
        query
    );
    Vec::new()
}

pub struct TrackerClient {
    client: Client,
    base_url: String,
    passkey: String,
    retry_policy: RetryPolicy,
}

impl TrackerClient {
    pub fn new(
        base_url: &str,
        passkey: &str,
        timeout: std::time::Duration,
        retry_policy: RetryPolicy,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("trackscan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(AppError::from)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            passkey: passkey.to_string(),
            retry_policy,
        })
    }

    pub fn from_config(cfg: &AppConfig) -> AppResult<Self> {
        cfg.validate_tracker()?;
        Self::new(
            &cfg.tracker_api_base,
            &cfg.tracker_passkey,
            cfg.tuning.timeout(),
            RetryPolicy::from_tuning(&cfg.tuning),
        )
    }

    async fn attempt(&self, url: &str, query: &str) -> AttemptOutcome {
        let sent = self
            .client
            .get(url)
            .query(&[("q", query), ("passkey", self.passkey.as_str())])
            .send()
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                error!("Tracker request failed for '{}': {}", query, e);
                return AttemptOutcome::Done(Vec::new());
            }
        };

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return AttemptOutcome::RateLimited;
        }
        if !response.status().is_success() {
            error!(
                "Tracker returned HTTP {} for '{}'",
                response.status(),
                query
            );
            return AttemptOutcome::Done(Vec::new());
        }

        let value = match response.json::<Value>().await {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to read tracker response for '{}': {}", query, e);
                return AttemptOutcome::Done(Vec::new());
            }
        };

        match parse_search_response(value) {
            SearchResponse::Candidates(candidates) => {
                debug!("'{}' -> {} candidates", query, candidates.len());
                AttemptOutcome::Done(candidates)
            }
            SearchResponse::Unrecognized => {
                warn!("Unrecognized tracker response shape for '{}'", query);
                AttemptOutcome::Done(Vec::new())
            }
        }
    }
}

#[async_trait]
impl SearchBackend for TrackerClient {
    async fn search(&self, query: &str) -> Vec<RemoteCandidate> {
        let url = format!("{}/external", self.base_url);
        run_with_backoff(&self.retry_policy, query, || self.attempt(&url, query)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_delay: Duration::from_millis(1),
            backoff_factor: 2.0,
            max_delay: Duration::from_millis(4),
        }
    }

    #[tokio::test]
    async fn persistent_rate_limiting_stops_after_retries_plus_one_attempts() {
        let attempts = AtomicU32::new(0);
        let result = run_with_backoff(&fast_policy(3), "q", || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { AttemptOutcome::RateLimited }
        })
        .await;

        assert!(result.is_empty());
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn recovery_during_backoff_returns_candidates() {
        let attempts = AtomicU32::new(0);
        let result = run_with_backoff(&fast_policy(3), "q", || {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    AttemptOutcome::RateLimited
                } else {
                    AttemptOutcome::Done(vec![RemoteCandidate {
                        title: "hit".to_string(),
                        ..RemoteCandidate::default()
                    }])
                }
            }
        })
        .await;

        assert_eq!(result.len(), 1);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn non_rate_limit_outcomes_are_final() {
        let attempts = AtomicU32::new(0);
        let result = run_with_backoff(&fast_policy(3), "q", || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { AttemptOutcome::Done(Vec::new()) }
        })
        .await;

        assert!(result.is_empty());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn client_construction_requires_tracker_config() {
        let cfg = AppConfig::default();
        assert!(TrackerClient::from_config(&cfg).is_err());
    }

    #[test]
    fn base_url_is_normalized() {
        let client = TrackerClient::new(
            "https://tracker.example/api/",
            "pk",
            Duration::from_secs(1),
            RetryPolicy::default(),
        )
        .unwrap();
        assert_eq!(client.base_url, "https://tracker.example/api");
    }
}
