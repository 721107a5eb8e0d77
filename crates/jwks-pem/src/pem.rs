//! PEM rendering of PKCS#1 RSA public keys

use crate::error::Result;
use crate::limits::PEM_LINE_WIDTH;
use crate::utils::base64;
use crate::utils::der::rsa_public_key_der;

const BEGIN_RSA_PUBLIC_KEY: &str = "-----BEGIN RSA PUBLIC KEY-----\n";
const END_RSA_PUBLIC_KEY: &str = "\n-----END RSA PUBLIC KEY-----\n";

/// Build a PEM-armored PKCS#1 RSA public key from base64 modulus and exponent
///
/// `modulus` and `exponent` are big-endian unsigned integers in base64 as
/// published in a key set (`n` and `e`). The standard alphabet is expected,
/// padding is optional, and URL-safe input is accepted as a fallback.
///
/// # Errors
///
/// Returns `Error::InvalidKeyEncoding` if either component is not base64.
///
/// # Example
///
/// ```
/// let pem = jwks_pem::rsa_public_key_pem("AQAB", "AQAB").unwrap();
/// assert_eq!(
///     pem,
///     "-----BEGIN RSA PUBLIC KEY-----\nMAoCAwEAAQIDAQAB\n-----END RSA PUBLIC KEY-----\n"
/// );
/// ```
pub fn rsa_public_key_pem(modulus: &str, exponent: &str) -> Result<String> {
    let n = base64::decode_component("n", modulus)?;
    let e = base64::decode_component("e", exponent)?;
    Ok(encode_rsa_public_key(&rsa_public_key_der(&n, &e)))
}

/// Wrap DER bytes in `RSA PUBLIC KEY` armor with 64-column body lines
pub(crate) fn encode_rsa_public_key(der: &[u8]) -> String {
    let body = base64::encode(der);
    let lines: Vec<&str> = body
        .as_bytes()
        .chunks(PEM_LINE_WIDTH)
        // base64 output is ASCII, so every chunk boundary is a char boundary
        .filter_map(|chunk| std::str::from_utf8(chunk).ok())
        .collect();

    let mut pem = String::with_capacity(
        BEGIN_RSA_PUBLIC_KEY.len() + body.len() + lines.len() + END_RSA_PUBLIC_KEY.len(),
    );
    pem.push_str(BEGIN_RSA_PUBLIC_KEY);
    pem.push_str(&lines.join("\n"));
    pem.push_str(END_RSA_PUBLIC_KEY);
    pem
}
