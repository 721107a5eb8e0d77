//! JWK (JSON Web Key) struct, validation and conversion

use crate::error::{Error, Result};
use crate::pem::rsa_public_key_pem;
use miniserde::json::Value;

/// The only key type a key can be resolved for
pub(crate) const SUPPORTED_KEY_TYPE: &str = "RSA";

/// The only algorithm a key can be resolved for
pub(crate) const SUPPORTED_ALGORITHM: &str = "RS256";

/// JSON Web Key (JWK) structure
///
/// Every field is optional when decoding; requirements are checked by
/// [`Jwk::validate`] once the key has been selected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Jwk {
    /// Key ID
    pub kid: Option<String>,
    /// Key type (e.g., "RSA")
    pub kty: Option<String>,
    /// Algorithm (e.g., "RS256")
    pub alg: Option<String>,
    /// Key use, informational only (e.g., "sig")
    pub key_use: Option<String>,
    /// RSA modulus (base64)
    pub n: Option<String>,
    /// RSA exponent (base64)
    pub e: Option<String>,
}

impl Jwk {
    /// Decode a key set record
    ///
    /// Only string members are read. Anything else, including a record that is
    /// not an object, leaves the field unset so one malformed record cannot
    /// spoil the rest of the set.
    pub(crate) fn from_json(value: &Value) -> Self {
        let Value::Object(members) = value else {
            return Self::default();
        };
        let string = |name: &str| match members.get(name) {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        };

        Self {
            kid: string("kid"),
            kty: string("kty"),
            alg: string("alg"),
            key_use: string("use"),
            n: string("n"),
            e: string("e"),
        }
    }

    /// Check that the key can yield an RS256 public key
    ///
    /// Rules are checked in order and the first failure is returned:
    /// 1. `n` and `e` are present and non-empty
    /// 2. `kty` is `RSA`
    /// 3. `alg` is `RS256`
    pub fn validate(&self) -> Result<()> {
        self.key_material().map(|_| ())
    }

    /// Check the rules of [`validate`](Self::validate) and return `(n, e)`
    fn key_material(&self) -> Result<(&str, &str)> {
        let n = self.n.as_deref().filter(|n| !n.is_empty());
        let Some(n) = n else {
            return Err(Error::MissingKeyMaterial("n".into()));
        };
        let e = self.e.as_deref().filter(|e| !e.is_empty());
        let Some(e) = e else {
            return Err(Error::MissingKeyMaterial("e".into()));
        };

        if self.kty.as_deref() != Some(SUPPORTED_KEY_TYPE) {
            return Err(Error::UnsupportedKeyType(self.kty.clone()));
        }

        if self.alg.as_deref() != Some(SUPPORTED_ALGORITHM) {
            return Err(Error::UnsupportedAlgorithm(self.alg.clone()));
        }

        Ok((n, e))
    }

    /// Validate the key and convert it to a PEM-armored PKCS#1 public key
    pub fn to_pem(&self) -> Result<String> {
        let (n, e) = self.key_material()?;
        rsa_public_key_pem(n, e)
    }
}
