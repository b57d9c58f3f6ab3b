use thiserror::Error;

/// Everything that can go wrong while producing a signature. All variants are
/// raised before any digest is computed, except [SignError::Internal].
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SignError {
    /// The signer, or the bucket it should sign for, is set up incorrectly.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The per-call input is malformed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An unexpected internal error.
    #[error("internal error: {0}")]
    Internal(&'static str),
}

/// Invalid or ambiguous signer/bucket setup.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigurationError {
    #[error("an access key is required")]
    MissingAccessKey,

    #[error("a secret key is required")]
    MissingSecretKey,

    /// A bucket name started or ended with `/`.
    #[error("bucket name {0:?} must neither start nor end with '/'")]
    MalformedBucket(String),

    /// A bucket was given per call although the signer already has a default one.
    #[error("bucket name already set on the signer ({0})")]
    AmbiguousBucket(String),

    #[error("bucket name set neither on the signer nor on the call")]
    MissingBucket,
}

/// Malformed per-call input.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ValidationError {
    #[error("no object path provided")]
    EmptyObjectPath,

    #[error("object path {0:?} must start with '/'")]
    RelativeObjectPath(String),

    /// Only GET, PUT and DELETE can be signed.
    #[error("unsupported method {0}")]
    UnsupportedMethod(String),

    /// The request URI path was not valid percent-encoded UTF-8.
    #[error("request path is not valid UTF-8 once decoded")]
    InvalidRequestPath,
}

impl SignError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, SignError::Configuration(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, SignError::Validation(_))
    }
}
