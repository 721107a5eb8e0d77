//! JSON Web Key Set (JWKS) module
pub(crate) mod caching;
pub(crate) mod jwk;

use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpResponse};
use crate::jwks::jwk::Jwk;
use crate::limits::MAX_KEY_SET_RESPONSE_SIZE;
use miniserde::json::Value;

/// The only content type a key set response is accepted with
const JSON_CONTENT_TYPE: &str = "application/json";

/// JSON Web Key Set (JWKS)
///
/// A document without a `keys` field decodes successfully and simply
/// contains no keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeySet {
    /// The keys in the set, in document order
    pub keys: Option<Vec<Jwk>>,
}

impl KeySet {
    /// Decode a key set document
    ///
    /// Records are decoded leniently (see [`Jwk`]); only the document shape
    /// itself is checked.
    pub(crate) fn from_json(value: &Value) -> Result<Self> {
        let Value::Object(document) = value else {
            return Err(Error::InvalidResponseBody(
                "key set must be a JSON object".into(),
            ));
        };

        let keys = match document.get("keys") {
            None => None,
            Some(Value::Array(keys)) => Some(keys.iter().map(Jwk::from_json).collect()),
            Some(_) => {
                return Err(Error::InvalidResponseBody(
                    "key set \"keys\" must be an array".into(),
                ));
            }
        };

        Ok(Self { keys })
    }

    /// Find the first key whose `kid` matches, in document order
    pub fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys
            .as_deref()?
            .iter()
            .find(|k| k.kid.as_deref() == Some(kid))
    }
}

/// Find a key in a key set by key ID (kid)
pub(crate) fn find_key_by_kid<'a>(set: &'a KeySet, kid: &str) -> Result<&'a Jwk> {
    set.find(kid).ok_or_else(|| Error::KeyNotFound(kid.into()))
}

/// Fetch and parse a key set document from the given URL
pub(crate) async fn fetch_key_set(client: &dyn HttpClient, url: &str) -> Result<KeySet> {
    let response = client.fetch(url).await?;
    parse_key_set(response)
}

/// Check a key set response and decode its body
pub(crate) fn parse_key_set(response: HttpResponse) -> Result<KeySet> {
    if response.status != 200 || response.content_type.as_deref() != Some(JSON_CONTENT_TYPE) {
        return Err(Error::UnexpectedResponse {
            status: response.status,
            content_type: response.content_type,
        });
    }

    // Validate response size before parsing to prevent resource exhaustion
    if response.body.len() > MAX_KEY_SET_RESPONSE_SIZE {
        return Err(Error::ResponseTooLarge {
            size: response.body.len(),
            max: MAX_KEY_SET_RESPONSE_SIZE,
        });
    }

    let body = std::str::from_utf8(&response.body)
        .map_err(|e| Error::InvalidResponseBody(format!("utf8 decode failed: {e}")))?;

    let value: Value = miniserde::json::from_str(body)
        .map_err(|e| Error::InvalidResponseBody(format!("invalid key set json: {e}")))?;

    KeySet::from_json(&value)
}
