//! Authorization stamping for outbound business calls.
//!
//! Business-logic collaborators need exactly one thing from the token layer:
//! a currently valid token on every outbound request. `Authorizer` binds a
//! coordinator to one credential identity and appends the token as the
//! `access_token` query parameter; when no valid token can be obtained the
//! business call fails with the same error the fetch produced.

use std::sync::Arc;

use reqwest::RequestBuilder;

use crate::cache::token_coordinator::TokenCoordinator;
use crate::config::credentials::Credentials;
use crate::error::FetchError;
use crate::sources::TokenFetcher;

pub struct Authorizer<F> {
    coordinator: Arc<TokenCoordinator<F>>,
    credentials: Credentials,
}

impl<F> Authorizer<F>
where
    F: TokenFetcher + Send + Sync + 'static,
{
    pub fn new(coordinator: Arc<TokenCoordinator<F>>, credentials: Credentials) -> Self {
        Self {
            coordinator,
            credentials,
        }
    }

    /// Stamp `request` with a valid access token for this identity.
    pub async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, FetchError> {
        let token = self.coordinator.get_token(&self.credentials).await?;
        Ok(request.query(&[("access_token", token.as_str())]))
    }
}
