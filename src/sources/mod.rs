/// Sources module
///
/// Defines the contract for exchanging a credential identity for a fresh
/// token, and the HTTP implementation of that contract.
pub mod http;

use crate::cache::token::TokenRecord;
use crate::config::credentials::Credentials;
use crate::error::FetchError;

/// One network exchange: credentials in, fresh token out.
///
/// Implementations perform exactly one outbound call per invocation, keep no
/// cache of their own, and never retry internally. Retry policy belongs to
/// the caller (see `resilience::retry`).
pub trait TokenFetcher {
    fn fetch(
        &self,
        credentials: &Credentials,
    ) -> impl std::future::Future<Output = Result<TokenRecord, FetchError>> + Send;
}
