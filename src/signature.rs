use std::io::Write;

use base64::write::EncoderWriter;
use bytes::{BufMut, BytesMut};
use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::trace;

use crate::{algorithm::SignatureAlgorithm, error::SignError, request::{Method, OutputMode}};

/// Name of the header carrying the signed timestamp.
pub const AMZ_DATE_HEADER: &str = "x-amz-date";

/// Written in place of the content type when the caller supplies none. Deployed
/// verifiers expect this literal.
const ABSENT_MIME_TYPE: &[u8] = b"None";

/// Bytes left as-is in the canonical path. Everything else, including each byte
/// of a multi-byte UTF-8 character, is escaped as `%XX`.
const PATH_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'/');

/// Same as [PATH_SAFE] but `/` is escaped too, as in any URL component.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-');

/// Percent-encodes a canonical path (`/bucket/object`). No Unicode normalization
/// is performed, so differently normalized paths sign differently.
pub fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, PATH_SAFE).to_string()
}

/// Formats a timestamp the way it appears in the `x-amz-date` header, e.g.
/// `Wed, 01 Oct 2014 00:42:00 GMT`.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Computes the raw base64 signature of one request. `canonical_path` is the
/// unencoded `/bucket/object` path.
pub fn sign<SigAlg: SignatureAlgorithm>(
        temporary_buffer: &mut BytesMut,
        sig_alg: &SigAlg,
        method: Method,
        canonical_path: &str,
        timestamp: &DateTime<Utc>,
        mime_type: Option<&str>,
    ) -> Result<String, SignError> {
    let encoded_path = encode_path(canonical_path);
    let string_to_sign = build_string_to_sign(temporary_buffer, method, mime_type, timestamp, &encoded_path);
    trace!(
        algorithm = sig_alg.name(),
        string_to_sign = ?String::from_utf8_lossy(&string_to_sign),
        "Built string to sign"
    );
    let encoded_signature = get_encoded_signature(temporary_buffer, sig_alg, string_to_sign)?;
    let signature = std::str::from_utf8(&encoded_signature)
        .map_err(|_err| SignError::Internal("base64 output is not UTF-8"))?;
    Ok(signature.trim_end().to_string())
}

/// Wraps a raw signature in the requested output form.
pub fn format_output(access_key: &str, signature: &str, output: OutputMode) -> String {
    match output {
        OutputMode::Raw => signature.to_string(),
        OutputMode::HttpHeader => format!("AWS {}:{}", access_key, signature),
        OutputMode::QueryString => utf8_percent_encode(signature, QUERY_COMPONENT).to_string(),
    }
}

/// Layout: `{method}\n\n{mime}\n\n{x-amz-date:date}\n{path}`. The empty lines
/// stand for the unsigned Content-MD5 and Date fields.
fn build_string_to_sign(
        temporary_buffer: &mut BytesMut,
        method: Method,
        mime_type: Option<&str>,
        timestamp: &DateTime<Utc>,
        encoded_path: &str,
    ) -> BytesMut {
    temporary_buffer.clear();
    temporary_buffer.extend_from_slice(method.as_str().as_bytes());
    temporary_buffer.extend_from_slice(b"\n\n");
    match mime_type {
        Some(mime_type) => temporary_buffer.extend_from_slice(mime_type.as_bytes()),
        None => temporary_buffer.extend_from_slice(ABSENT_MIME_TYPE),
    }
    temporary_buffer.extend_from_slice(b"\n\n");
    temporary_buffer.extend_from_slice(AMZ_DATE_HEADER.as_bytes());
    temporary_buffer.extend_from_slice(b":");
    temporary_buffer.extend_from_slice(format_timestamp(timestamp).as_bytes());
    temporary_buffer.extend_from_slice(b"\n");
    temporary_buffer.extend_from_slice(encoded_path.as_bytes());
    temporary_buffer.split()
}

fn get_encoded_signature<SigAlg: SignatureAlgorithm>(
        temporary_buffer: &mut BytesMut,
        sig_alg: &SigAlg,
        signature_input: BytesMut,
    ) -> Result<BytesMut, SignError> {
    temporary_buffer.clear();
    sig_alg.sign(&signature_input, &mut (&mut *temporary_buffer).writer())
        .map_err(|_err| SignError::Internal("IO error when signing"))?;
    let signature = temporary_buffer.split();
    {
        let mut encoder = EncoderWriter::new((&mut *temporary_buffer).writer(), base64::STANDARD);
        encoder.write_all(&signature)
            .map_err(|_err| SignError::Internal("IO error when base64-encoding signature"))?;
    }
    Ok(temporary_buffer.split())
}
