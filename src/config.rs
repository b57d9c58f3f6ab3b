use std::fmt::Debug;

use crate::{error::SignError, sign::Signer};

/// Credentials and defaults a [Signer] is built from. With the `serde` feature
/// enabled this can be deserialized from any configuration format, e.g.
///
/// ```json
/// { "access_key": "ok", "secret_key": "pouet", "default_bucket": "panier" }
/// ```
#[derive(Clone, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct SignerConfig {
    pub access_key: String,
    pub secret_key: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_bucket: Option<String>,
}

impl SignerConfig {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            default_bucket: None,
        }
    }

    pub fn with_default_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.default_bucket = Some(bucket.into());
        self
    }

    /// Validates the configuration and builds a [Signer] from it.
    pub fn build(&self) -> Result<Signer, SignError> {
        Signer::from_config(self)
    }
}

impl Debug for SignerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerConfig")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("default_bucket", &self.default_bucket)
            .finish()
    }
}

impl Signer {
    pub fn from_config(config: &SignerConfig) -> Result<Self, SignError> {
        Signer::new(
            config.access_key.as_str(),
            &config.secret_key,
            config.default_bucket.as_deref(),
        )
    }
}
