//! Base64 decoding of key components and encoding of PEM bodies
//!
//! Keycloak-style key sets are consumed with the standard alphabet and optional
//! padding. Components that only decode under the URL-safe alphabet (RFC 7517)
//! are accepted as a fallback.

use crate::error::{Error, Result};
use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig, general_purpose::STANDARD},
};

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);

const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Decode a base64 key component (`n`, `e`) into big-endian bytes
///
/// Each alphabet is tried on its own, so a value mixing standard (`+/`) and
/// URL-safe (`-_`) characters is rejected, as is embedded whitespace. Node's
/// `Buffer.from(s, "base64")` accepts both and skips anything else it does
/// not recognize.
pub(crate) fn decode_component(field: &str, input: &str) -> Result<Vec<u8>> {
    STANDARD_LENIENT
        .decode(input)
        .or_else(|standard_err| {
            URL_SAFE_LENIENT
                .decode(input)
                .map_err(|_| standard_err)
        })
        .map_err(|e| Error::InvalidKeyEncoding {
            field: field.into(),
            reason: e.to_string(),
        })
}

/// Encode bytes with the standard, padded alphabet
pub(crate) fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
