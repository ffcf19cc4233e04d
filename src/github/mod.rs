// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Hosting API client.
//!
//! ```text
//! GithubClient::new(api_url)
//!   .list_repositories(username, token)
//!        |
//!        v
//!   GET {api_url}/users/{username}/repos
//!   Authorization: token {token}   (omitted when token is empty)
//!        |
//!        v
//!   [{ "name": .., "pushed_at": .., ... }]  --> Vec<RepositoryRecord>
//!
//! Global client: OnceLock, connection pool, GitHub-mandated User-Agent
//! Pagination:    not followed, first page only
//! ```

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;
use tracing::{debug, info};

use crate::error::TransportError;

/// Global HTTP client - initialized once, reused for every request.
/// Falls back to a basic client if custom configuration fails.
fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("repo-vault/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// One repository as reported by the hosting API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    /// Repository name, unique within the owner's namespace.
    pub name: String,
    /// Time of the last push. `null` (empty repositories) decodes as the epoch.
    #[serde(default = "epoch", deserialize_with = "pushed_at_or_epoch")]
    pub pushed_at: DateTime<Utc>,
}

impl RepositoryRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, pushed_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            pushed_at,
        }
    }

    /// `pushed_at` as written to manifests and summaries.
    #[must_use]
    pub fn pushed_at_string(&self) -> String {
        self.pushed_at
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    }
}

const fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

fn pushed_at_or_epoch<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DateTime<Utc>>::deserialize(deserializer)?.unwrap_or_else(epoch))
}

/// Client for the "list repositories for a user" endpoint.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    api_url: String,
}

impl GithubClient {
    /// Create a client rooted at `api_url` (e.g. `https://api.github.com`).
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: global_client().clone(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// `GET` endpoint listing the repositories of `username`.
    #[must_use]
    pub fn repos_url(&self, username: &str) -> String {
        format!("{}/users/{username}/repos", self.api_url)
    }

    /// List the repositories owned by `username`.
    ///
    /// Only the first page the API returns is used. An empty `token` sends
    /// the request without credentials.
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` if the request cannot be sent, the server
    /// answers with a non-success status, or the body is not a JSON array of
    /// repositories. No retry is attempted.
    pub async fn list_repositories(
        &self,
        username: &str,
        token: &str,
    ) -> Result<Vec<RepositoryRecord>, TransportError> {
        let url = self.repos_url(username);

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json");
        if token.is_empty() {
            debug!(%url, "listing repositories without credentials");
        } else {
            request = request.header("Authorization", format!("token {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(TransportError::HttpError {
                status: response.status().as_u16(),
                url,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;

        let repos: Vec<RepositoryRecord> =
            serde_json::from_str(&body).map_err(|source| TransportError::Decode {
                url: url.clone(),
                source,
            })?;

        info!(count = repos.len(), username, "listed repositories");
        Ok(repos)
    }
}
