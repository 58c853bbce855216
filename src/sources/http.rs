use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::cache::token::TokenRecord;
use crate::config::credentials::Credentials;
use crate::error::FetchError;
use crate::sources::TokenFetcher;
use crate::utils::constants::DEFAULT_HTTP_TIMEOUT_MS;

/// Expected shape of the token endpoint response. Every field is optional at
/// the wire level so a malformed body surfaces as `InvalidResponse` instead
/// of a deserialization failure with a less useful message.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<i64>,
}

/// Fetches tokens over HTTP: a GET against the configured endpoint carrying
/// the credential identity as query parameters.
#[derive(Debug, Clone)]
pub struct HttpTokenFetcher {
    client: Client,
    token_url: String,
}

impl HttpTokenFetcher {
    pub fn new(token_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS))
            .build()
            .expect("Failed to build HTTP client");
        Self::with_client(client, token_url)
    }

    /// Use a caller-built client (custom timeouts, proxy, TLS config).
    pub fn with_client(client: Client, token_url: impl Into<String>) -> Self {
        Self {
            client,
            token_url: token_url.into(),
        }
    }
}

impl TokenFetcher for HttpTokenFetcher {
    async fn fetch(&self, credentials: &Credentials) -> Result<TokenRecord, FetchError> {
        debug!(app_id = %credentials.app_id, url = %self.token_url, "requesting access token");

        let response = self
            .client
            .get(&self.token_url)
            .query(&[
                ("grant_type", "client_credential"),
                ("appid", credentials.app_id.as_str()),
                ("secret", credentials.secret.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::InvalidResponse(format!(
                "token endpoint answered HTTP {}",
                status
            )));
        }

        let body = response.bytes().await?;
        let parsed: TokenResponse = serde_json::from_slice(&body)
            .map_err(|err| FetchError::InvalidResponse(format!("unparseable body: {err}")))?;

        let value = parsed
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| FetchError::InvalidResponse("missing access_token".into()))?;
        let ttl_seconds = parsed
            .expires_in
            .filter(|ttl| *ttl > 0)
            .ok_or_else(|| FetchError::InvalidResponse("missing or non-positive expires_in".into()))?;

        Ok(TokenRecord::new(value, ttl_seconds))
    }
}
