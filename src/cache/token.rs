use crate::helpers::time::now_i64;

/// Token value plus the timestamps establishing its validity window.
/// Replaced as a whole on every successful refresh, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub value: String,
    /// UNIX seconds at which the fetch completed.
    pub obtained_at: i64,
    /// Lifetime advertised by the remote endpoint, in seconds.
    pub ttl_seconds: i64,
}

impl TokenRecord {
    pub fn new(value: String, ttl_seconds: i64) -> Self {
        Self {
            value,
            obtained_at: now_i64(),
            ttl_seconds,
        }
    }

    /// UNIX seconds after which the record must no longer be served.
    /// The safety margin is subtracted from the advertised ttl so the token
    /// is retired before the remote service invalidates it.
    pub fn expires_at(&self, safety_margin_seconds: i64) -> i64 {
        self.obtained_at + self.ttl_seconds - safety_margin_seconds
    }

    /// A ttl at or below the safety margin yields an empty validity window,
    /// so such a record reads as already expired.
    pub fn is_valid(&self, safety_margin_seconds: i64) -> bool {
        now_i64() < self.expires_at(safety_margin_seconds)
    }
}
