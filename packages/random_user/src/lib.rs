#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Client for the randomuser.me fake user API.
//!
//! Fetches raw user records for a nationality/page/seed, retrying
//! transport-level failures with backoff. HTTP error statuses are
//! terminal: a 403 fails as [`FetchUsersError::AccessDenied`], anything
//! else non-2xx as [`FetchUsersError::RequestFailed`]. Records are kept
//! loosely typed ([`models::RawUser`]) and normalized into
//! [`models::User`] without ever dropping a record.

#[cfg(feature = "api")]
pub mod api;

pub mod models;

use std::{sync::LazyLock, time::Duration};

use models::{RandomUserResponse, RawUser};
use reqwest::StatusCode;
use thiserror::Error;
use usuarios_config::ServerConfig;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const MAX_ATTEMPTS: u8 = 3;
const RETRY_DELAYS: [Duration; 2] = [Duration::from_secs(1), Duration::from_secs(2)];

static CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap()
});

#[derive(Debug, Error)]
pub enum FetchUsersError {
    #[error("Access denied by the random user API (HTTP 403)")]
    AccessDenied,
    #[error("Random user API request failed with status {0}")]
    RequestFailed(u16),
    #[error("Failed to reach the random user API after {MAX_ATTEMPTS} attempts")]
    ConnectionFailed,
    #[error(transparent)]
    Parse(#[from] reqwest::Error),
}

/// Client bound to a configured upstream base URL.
#[derive(Debug, Clone)]
pub struct RandomUserClient {
    base_url: String,
}

impl RandomUserClient {
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            base_url: config.api_url.clone(),
        }
    }

    /// Fetches up to `count` raw user records.
    ///
    /// Empty `nat`/`seed` values and `None` `page` are omitted from the
    /// query. A response without a `results` field is a success with zero
    /// records.
    ///
    /// # Errors
    ///
    /// * [`FetchUsersError::AccessDenied`] if the API returns 403
    /// * [`FetchUsersError::RequestFailed`] for any other non-2xx status
    /// * [`FetchUsersError::ConnectionFailed`] if no response is received
    ///   after `MAX_ATTEMPTS` attempts
    /// * [`FetchUsersError::Parse`] if the response body is not valid JSON
    pub async fn fetch_users(
        &self,
        count: u32,
        nat: Option<&str>,
        page: Option<u32>,
        seed: Option<&str>,
    ) -> Result<Vec<RawUser>, FetchUsersError> {
        let query = build_query(count, nat, page, seed);

        let mut attempt = 1;
        let response = loop {
            log::debug!(
                "Fetching users from {} (attempt {attempt}/{MAX_ATTEMPTS})",
                self.base_url
            );

            match CLIENT.get(&self.base_url).query(&query).send().await {
                Ok(response) => break response,
                Err(err) if attempt < MAX_ATTEMPTS => {
                    let delay = RETRY_DELAYS[usize::from(attempt - 1).min(RETRY_DELAYS.len() - 1)];
                    log::warn!(
                        "Random user API connection failed (attempt {attempt}/{MAX_ATTEMPTS}), retrying in {delay:?}: {err:?}"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    log::error!("Random user API unreachable after {MAX_ATTEMPTS} attempts: {err:?}");
                    return Err(FetchUsersError::ConnectionFailed);
                }
            }
        };

        let status = response.status();

        if status == StatusCode::FORBIDDEN {
            log::error!("Random user API denied access (HTTP 403)");
            return Err(FetchUsersError::AccessDenied);
        }
        if !status.is_success() {
            log::error!("Random user API request failed with status {status}");
            return Err(FetchUsersError::RequestFailed(status.as_u16()));
        }

        let body: RandomUserResponse = response.json().await?;

        Ok(body.results.unwrap_or_default())
    }
}

fn build_query(
    count: u32,
    nat: Option<&str>,
    page: Option<u32>,
    seed: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut query = vec![("results", count.to_string())];

    if let Some(nat) = nat.filter(|x| !x.is_empty()) {
        query.push(("nat", nat.to_string()));
    }
    if let Some(page) = page {
        query.push(("page", page.to_string()));
    }
    if let Some(seed) = seed.filter(|x| !x.is_empty()) {
        query.push(("seed", seed.to_string()));
    }

    query
}
