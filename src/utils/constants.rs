//! Shared constants and invariants

/// Buffer subtracted from the advertised ttl so a token is refreshed before
/// the remote service actually invalidates it. Covers clock skew and the
/// latency of requests already in flight.
pub const DEFAULT_SAFETY_MARGIN_SECS: i64 = 300;

pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;
