//! Per-call request parameters.
//!
//! Support for the [http](https://crates.io/crates/http) crate can be enabled by
//! turning on the `http` **feature**, which is off by default. It adds
//! `Signer::authorize`, which signs an `http::Request` in place.

use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::ValidationError;

/// An HTTP method that can be signed. Directory listings are signed as [Method::Get].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Method {
    Get,
    Put,
    Delete,
}

impl Method {
    /// Returns the uppercase verb that enters the string to sign.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl FromStr for Method {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("GET") {
            Ok(Self::Get)
        } else if value.eq_ignore_ascii_case("PUT") {
            Ok(Self::Put)
        } else if value.eq_ignore_ascii_case("DELETE") {
            Ok(Self::Delete)
        } else {
            Err(ValidationError::UnsupportedMethod(value.to_string()))
        }
    }
}

/// The form in which the signature is returned.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum OutputMode {
    /// The bare base64 signature.
    #[default]
    Raw,

    /// The value of an `Authorization` header: `AWS <access key>:<signature>`.
    HttpHeader,

    /// The signature percent-encoded for use as a query parameter of a
    /// pre-signed URL.
    QueryString,
}

/// Optional parameters of a single signing call. Everything defaults to absent,
/// with [OutputMode::Raw] output.
#[derive(Clone, Debug, Default)]
pub struct SignOptions<'a> {
    pub bucket_name: Option<&'a str>,
    pub timestamp: Option<DateTime<Utc>>,
    pub mime_type: Option<&'a str>,
    pub output: OutputMode,
}

impl<'a> SignOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign for this bucket. Only allowed when the signer has no default bucket.
    pub fn bucket_name(mut self, bucket_name: &'a str) -> Self {
        self.bucket_name = Some(bucket_name);
        self
    }

    /// Sign for this instant instead of the current one.
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn mime_type(mut self, mime_type: &'a str) -> Self {
        self.mime_type = Some(mime_type);
        self
    }

    pub fn output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }
}

/// Adds support for signing requests from the [http](https://crates.io/crates/http)
/// crate.
///
/// Requires the `http` feature to be enabled.
#[cfg(feature = "http")]
mod http {
    use ::http::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
    use chrono::Utc;
    use percent_encoding::percent_decode_str;
    use tracing::debug;

    use super::{Method, OutputMode, SignOptions};
    use crate::error::{SignError, ValidationError};
    use crate::signature::{format_timestamp, AMZ_DATE_HEADER};
    use crate::sign::Signer;

    impl TryFrom<&::http::Method> for Method {
        type Error = ValidationError;

        fn try_from(method: &::http::Method) -> Result<Self, Self::Error> {
            if method == ::http::Method::GET {
                Ok(Method::Get)
            } else if method == ::http::Method::PUT {
                Ok(Method::Put)
            } else if method == ::http::Method::DELETE {
                Ok(Method::Delete)
            } else {
                Err(ValidationError::UnsupportedMethod(method.to_string()))
            }
        }
    }

    impl Signer {
        /// Signs `request` and inserts the `x-amz-date` and `authorization`
        /// headers. The URI path is percent-decoded before signing, since
        /// signing encodes it again. When `options` carries no mime type, the
        /// request's `content-type` header is used. The output mode of
        /// `options` is ignored.
        pub fn authorize<B>(
                &self,
                request: &mut ::http::Request<B>,
                options: SignOptions<'_>,
            ) -> Result<(), SignError> {
            let method = Method::try_from(request.method())?;
            let path = percent_decode_str(request.uri().path())
                .decode_utf8()
                .map_err(|_err| ValidationError::InvalidRequestPath)?
                .into_owned();
            let timestamp = options.timestamp.unwrap_or_else(Utc::now);
            let content_type = match options.mime_type {
                Some(mime_type) => Some(mime_type.to_string()),
                None => request
                    .headers()
                    .get(CONTENT_TYPE)
                    .map(|value| value.to_str().map(str::to_string))
                    .transpose()
                    .map_err(|_err| SignError::Internal("content-type header is not visible ASCII"))?,
            };
            let authorization = self.sign(
                method,
                &path,
                SignOptions {
                    bucket_name: options.bucket_name,
                    timestamp: Some(timestamp),
                    mime_type: content_type.as_deref(),
                    output: OutputMode::HttpHeader,
                },
            )?;

            let date = HeaderValue::from_str(&format_timestamp(&timestamp))
                .map_err(|_err| SignError::Internal("Formatted date is not a valid header value"))?;
            let authorization = HeaderValue::from_str(&authorization)
                .map_err(|_err| SignError::Internal("Authorization is not a valid header value"))?;
            debug!(method = method.as_str(), "Inserting authorization headers");
            request.headers_mut().insert(AMZ_DATE_HEADER, date);
            request.headers_mut().insert(AUTHORIZATION, authorization);
            Ok(())
        }
    }
}
