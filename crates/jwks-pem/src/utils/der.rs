//! DER encoding utilities for building PKCS#1 RSAPublicKey structures
//!
//! Only the two primitives a PKCS#1 public key needs are implemented here:
//! unsigned INTEGERs and a SEQUENCE wrapper. Output must match other DER
//! encoders byte for byte, so no normalization is applied to the input
//! (leading zero bytes are kept as published).

const TAG_INTEGER: u8 = 0x02;
const TAG_SEQUENCE: u8 = 0x30;

/// Encode a DER length (short form up to 127, long form with minimal bytes above)
pub(crate) fn encode_length(len: usize) -> Vec<u8> {
    if len < 0x80 {
        vec![len as u8]
    } else {
        let significant = len.to_be_bytes();
        let skip = significant.iter().take_while(|b| **b == 0).count();
        let digits = &significant[skip..];

        let mut v = Vec::with_capacity(1 + digits.len());
        v.push(0x80 | (digits.len() as u8));
        v.extend_from_slice(digits);
        v
    }
}

/// Encode big-endian unsigned bytes as a DER INTEGER
pub(crate) fn encode_integer(bytes: &[u8]) -> Vec<u8> {
    // INTEGER is two's complement: keep values with the MSB set positive
    let pad = bytes.first().is_some_and(|b| b & 0x80 != 0);
    let value_len = bytes.len() + usize::from(pad);
    let len = encode_length(value_len);

    let mut out = Vec::with_capacity(1 + len.len() + value_len);
    out.push(TAG_INTEGER);
    out.extend_from_slice(&len);
    if pad {
        out.push(0x00);
    }
    out.extend_from_slice(bytes);
    out
}

/// Wrap already-encoded children in a DER SEQUENCE
pub(crate) fn encode_sequence(children: &[u8]) -> Vec<u8> {
    let len = encode_length(children.len());
    let mut out = Vec::with_capacity(1 + len.len() + children.len());
    out.push(TAG_SEQUENCE);
    out.extend_from_slice(&len);
    out.extend_from_slice(children);
    out
}

/// Build a DER-encoded PKCS#1 RSAPublicKey from modulus (n) and exponent (e) bytes
///
/// ```text
/// RSAPublicKey ::= SEQUENCE {
///     modulus           INTEGER,  -- n
///     publicExponent    INTEGER   -- e
/// }
/// ```
pub fn rsa_public_key_der(n: &[u8], e: &[u8]) -> Vec<u8> {
    let n_int = encode_integer(n);
    let e_int = encode_integer(e);
    let mut body = Vec::with_capacity(n_int.len() + e_int.len());
    body.extend_from_slice(&n_int);
    body.extend_from_slice(&e_int);
    encode_sequence(&body)
}
