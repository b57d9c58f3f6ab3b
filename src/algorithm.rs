use std::{fmt::Debug, io::Write};

use ring::hmac;

/// The algorithm used to turn the string to sign into signature bytes. The
/// canonicalization of the request is shared by every algorithm, so this trait
/// only covers the keyed digest itself.
pub trait SignatureAlgorithm {
    /// A short lowercase name for the algorithm, used in log events.
    fn name(&self) -> &str;

    /// Digitally sign a block of data, writing the raw signature bytes.
    fn sign(&self, data: &[u8], output: &mut dyn Write) -> std::io::Result<()>;
}

/// HMAC keyed with the account's secret key, using SHA-1 as the digest. SHA-1
/// is fixed by the wire format; the remote party verifies with the same digest.
pub struct HmacSha1 {
    key: hmac::Key,
}

impl HmacSha1 {
    /// Length in bytes of the produced signature.
    pub const OUTPUT_LEN: usize = 20;

    pub fn new(secret_key: &[u8]) -> Self {
        Self {
            key: hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, secret_key),
        }
    }
}

impl SignatureAlgorithm for HmacSha1 {
    fn name(&self) -> &str {
        "hmac-sha1"
    }

    fn sign(&self, data: &[u8], output: &mut dyn Write) -> std::io::Result<()> {
        let tag = hmac::sign(&self.key, data);
        output.write_all(tag.as_ref())
    }
}

impl Debug for HmacSha1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSha1")
            .field("key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_a_sha1_sized_tag() {
        let mut out = Vec::new();
        HmacSha1::new(b"pouet").sign(b"GET", &mut out).unwrap();
        assert_eq!(out.len(), HmacSha1::OUTPUT_LEN);
    }

    #[test]
    fn matches_rfc2202_test_case_2() {
        let mut out = Vec::new();
        HmacSha1::new(b"Jefe")
            .sign(b"what do ya want for nothing?", &mut out)
            .unwrap();
        let hex: String = out.iter().map(|byte| format!("{:02x}", byte)).collect();
        assert_eq!(hex, "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79");
    }

    #[test]
    fn debug_hides_the_key() {
        let debug = format!("{:?}", HmacSha1::new(b"pouet"));
        assert!(!debug.contains("pouet"));
        assert!(debug.contains("redacted"));
    }
}
