use std::fmt::Debug;

use bytes::BytesMut;
use chrono::Utc;
use tracing::debug;

use crate::{
    algorithm::{HmacSha1, SignatureAlgorithm},
    error::{ConfigurationError, SignError, ValidationError},
    request::{Method, SignOptions},
    signature,
};

/// Room for the string to sign of a typical request without reallocating.
const TEMPORARY_BUFFER_CAPACITY: usize = 512;

/// Signs object storage requests for one set of credentials. A [Signer] is
/// immutable once built and can be shared between threads; every call works on
/// its own buffers.
pub struct Signer {
    access_key: String,
    algorithm: HmacSha1,
    default_bucket: Option<String>,
}

impl Signer {
    /// Builds a signer, failing if either key is empty or `default_bucket`
    /// starts or ends with `/`.
    pub fn new(
            access_key: impl Into<String>,
            secret_key: impl AsRef<str>,
            default_bucket: Option<&str>,
        ) -> Result<Self, SignError> {
        let access_key = access_key.into();
        let secret_key = secret_key.as_ref();
        if access_key.is_empty() {
            return Err(ConfigurationError::MissingAccessKey.into());
        }
        if secret_key.is_empty() {
            return Err(ConfigurationError::MissingSecretKey.into());
        }
        // An empty default bucket counts as no default bucket.
        let default_bucket = match default_bucket {
            Some(bucket) if !bucket.is_empty() => {
                if bucket.starts_with('/') || bucket.ends_with('/') {
                    return Err(ConfigurationError::MalformedBucket(bucket.to_string()).into());
                }
                Some(bucket.to_string())
            }
            _ => None,
        };
        Ok(Self {
            access_key,
            algorithm: HmacSha1::new(secret_key.as_bytes()),
            default_bucket,
        })
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn default_bucket(&self) -> Option<&str> {
        self.default_bucket.as_deref()
    }

    /// Signs a download of the object at `object_path`.
    pub fn sign_get(&self, object_path: &str, options: SignOptions<'_>) -> Result<String, SignError> {
        self.sign(Method::Get, object_path, options)
    }

    /// Signs an upload to `object_path`. Pass the content type the upload will
    /// carry through [SignOptions::mime_type].
    pub fn sign_put(&self, object_path: &str, options: SignOptions<'_>) -> Result<String, SignError> {
        self.sign(Method::Put, object_path, options)
    }

    pub fn sign_delete(&self, object_path: &str, options: SignOptions<'_>) -> Result<String, SignError> {
        self.sign(Method::Delete, object_path, options)
    }

    /// Signs a listing of `directory`. Listings are plain GETs on the directory
    /// path.
    pub fn sign_list(&self, directory: &str, options: SignOptions<'_>) -> Result<String, SignError> {
        self.sign(Method::Get, directory, options)
    }

    /// Validates the input, then signs `method` on `object_path` and formats the
    /// result according to `options.output`.
    pub fn sign(
            &self,
            method: Method,
            object_path: &str,
            options: SignOptions<'_>,
        ) -> Result<String, SignError> {
        let object_path = validate_object_path(object_path)?;
        let bucket = self.resolve_bucket(options.bucket_name)?;
        let canonical_path = format!("/{}{}", bucket, object_path);
        let timestamp = options.timestamp.unwrap_or_else(Utc::now);

        debug!(
            access_key = %self.access_key,
            method = method.as_str(),
            path = %canonical_path,
            "Signing request"
        );

        let mut temporary_buffer = BytesMut::with_capacity(TEMPORARY_BUFFER_CAPACITY);
        let raw = signature::sign(
            &mut temporary_buffer,
            &self.algorithm,
            method,
            &canonical_path,
            &timestamp,
            options.mime_type,
        )?;
        Ok(signature::format_output(&self.access_key, &raw, options.output))
    }

    fn resolve_bucket<'a>(&'a self, bucket_name: Option<&'a str>) -> Result<&'a str, ConfigurationError> {
        match (self.default_bucket.as_deref(), bucket_name.filter(|name| !name.is_empty())) {
            (Some(default_bucket), Some(_)) => Err(ConfigurationError::AmbiguousBucket(default_bucket.to_string())),
            (None, None) => Err(ConfigurationError::MissingBucket),
            (Some(bucket), None) | (None, Some(bucket)) => Ok(trim_ascii_whitespace(bucket)),
        }
    }
}

/// Trims the whitespace deployed signers strip: ASCII space, `\t`, `\n`, `\r`,
/// vertical tab and form feed. Other Unicode whitespace is part of the path.
fn trim_ascii_whitespace(value: &str) -> &str {
    value.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c'))
}

/// Returns the trimmed object path, which must start with `/`.
fn validate_object_path(object_path: &str) -> Result<&str, ValidationError> {
    if object_path.is_empty() {
        return Err(ValidationError::EmptyObjectPath);
    }
    let trimmed = trim_ascii_whitespace(object_path);
    if !trimmed.starts_with('/') {
        return Err(ValidationError::RelativeObjectPath(object_path.to_string()));
    }
    Ok(trimmed)
}

impl Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("access_key", &self.access_key)
            .field("algorithm", &self.algorithm.name())
            .field("default_bucket", &self.default_bucket)
            .finish()
    }
}
