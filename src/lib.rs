//! # Token Broker Library
//!
//! Client-side cache for short-lived bearer tokens. Fetching a token is an
//! expensive, rate-limited network call, so the broker serves a cached token
//! while it is still valid, refreshes it on demand before the remote service
//! invalidates it, and coalesces concurrent refreshes so at most one fetch
//! per credential identity is ever in flight.
//!
//! Modules:
//! - `config` — credential identity supplied by the host application
//! - `cache` — token records and the refresh coordinator
//! - `sources` — the token fetcher contract and its HTTP implementation
//! - `request` — stamping outbound business calls with a valid token
//! - `resilience` — caller-side retry policy

pub mod cache;
pub mod config;
pub mod error;
pub mod helpers;
pub mod request;
pub mod resilience;
pub mod sources;
pub mod tests;
pub mod utils;

pub use crate::cache::token::TokenRecord;
pub use crate::cache::token_coordinator::TokenCoordinator;
pub use crate::config::credentials::Credentials;
pub use crate::error::FetchError;
pub use crate::sources::http::HttpTokenFetcher;
pub use crate::sources::TokenFetcher;
