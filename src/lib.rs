//! Signs requests to S3-compatible object storage with the legacy `AWS`
//! HMAC-SHA1 scheme, producing either a raw signature, an `Authorization`
//! header value, or a token for a pre-signed URL query string.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use s3_signed_auth::{OutputMode, SignOptions, Signer};
//!
//! let signer = Signer::new("ok", "pouet", Some("panier")).unwrap();
//! let header = signer.sign_get(
//!     "/photo.png",
//!     SignOptions::new()
//!         .timestamp(Utc.with_ymd_and_hms(2014, 10, 1, 0, 42, 0).unwrap())
//!         .output(OutputMode::HttpHeader),
//! ).unwrap();
//! assert_eq!(header, "AWS ok:v11wbdzl77Qg5Kzh1R57PHCrpgw=");
//! ```
#![forbid(unsafe_code)]

mod algorithm;
mod config;
mod error;
pub mod request;
mod sign;
mod signature;

pub use algorithm::{HmacSha1, SignatureAlgorithm};

pub use config::SignerConfig;

pub use error::{ConfigurationError, SignError, ValidationError};

pub use request::{Method, OutputMode, SignOptions};

pub use sign::Signer;

pub use signature::{encode_path, format_timestamp, AMZ_DATE_HEADER};
