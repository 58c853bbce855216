use std::fmt;

use serde::Deserialize;

/// Credential identity: one application id plus its secret names one token
/// namespace. Supplied by the host configuration once at startup and never
/// mutated afterwards; hashes and compares by both fields so two
/// applications never share a cache slot.
#[derive(Clone, Deserialize, PartialEq, Eq, Hash)]
pub struct Credentials {
    pub app_id: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(app_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            secret: secret.into(),
        }
    }
}

// Keep the secret out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("secret", &"***")
            .finish()
    }
}
