//! Errors for jwks-pem

use thiserror::Error;

/// jwks-pem Errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),

    // ============================================================================
    // Remote Errors
    // ============================================================================
    #[error("Transport error: {0}")]
    TransportError(String),

    #[error(
        "Status: {status}, Content-type: {}",
        .content_type.as_deref().unwrap_or("undefined")
    )]
    UnexpectedResponse {
        status: u16,
        content_type: Option<String>,
    },

    #[error("Key set response too large: {size} bytes (maximum: {max} bytes)")]
    ResponseTooLarge { size: usize, max: usize },

    #[error("Invalid key set response: {0}")]
    InvalidResponseBody(String),

    // ============================================================================
    // Key Errors
    // ============================================================================
    #[error("Can't find key for kid \"{0}\" in response.")]
    KeyNotFound(String),

    #[error("Can't find modulus or exponent in key: '{0}' is missing or empty")]
    MissingKeyMaterial(String),

    #[error(
        "Key type (kty) must be RSA, found {}",
        .0.as_deref().unwrap_or("none")
    )]
    UnsupportedKeyType(Option<String>),

    #[error(
        "Algorithm (alg) must be RS256, found {}",
        .0.as_deref().unwrap_or("none")
    )]
    UnsupportedAlgorithm(Option<String>),

    #[error("Key field '{field}' is not valid base64: {reason}")]
    InvalidKeyEncoding { field: String, reason: String },
}

/// Result type alias for jwks-pem operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_response_display() {
        let err = Error::UnexpectedResponse {
            status: 404,
            content_type: None,
        };
        assert_eq!(err.to_string(), "Status: 404, Content-type: undefined");

        let err = Error::UnexpectedResponse {
            status: 200,
            content_type: Some("text/html".into()),
        };
        assert_eq!(err.to_string(), "Status: 200, Content-type: text/html");
    }

    #[test]
    fn test_key_not_found_display() {
        let err = Error::KeyNotFound("kid1".into());
        assert_eq!(err.to_string(), "Can't find key for kid \"kid1\" in response.");
    }

    #[test]
    fn test_validation_display() {
        assert_eq!(
            Error::UnsupportedKeyType(Some("EC".into())).to_string(),
            "Key type (kty) must be RSA, found EC"
        );
        assert_eq!(
            Error::UnsupportedAlgorithm(None).to_string(),
            "Algorithm (alg) must be RS256, found none"
        );
    }
}
