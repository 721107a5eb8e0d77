//! Key set URL construction and validation
//!
//! A base URL with a realm is expanded to the Keycloak certificate endpoint.
//! Without a realm the base URL is used verbatim, which allows arbitrary key
//! set endpoints.

use crate::error::{Error, Result};
use crate::limits::MAX_KEY_SET_URL_LENGTH;

/// Validate URL format and size
fn validate_url(url: &str, name: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(Error::ConfigurationInvalid(format!("{name} cannot be empty")));
    }

    if url.len() > MAX_KEY_SET_URL_LENGTH {
        return Err(Error::ConfigurationInvalid(format!(
            "{name} too long: {} characters (maximum: {MAX_KEY_SET_URL_LENGTH} characters)",
            url.len()
        )));
    }

    let parsed = url
        .parse::<url::Url>()
        .map_err(|e| Error::ConfigurationInvalid(format!("invalid {name}: {e}")))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(Error::ConfigurationInvalid(format!(
            "{name} must use http or https scheme"
        )));
    }

    if parsed.host_str().is_none() {
        return Err(Error::ConfigurationInvalid(format!(
            "{name} must have a valid host"
        )));
    }

    Ok(())
}

/// Validate a realm name before it is embedded in a URL path
fn validate_realm(realm: &str) -> Result<()> {
    if realm.trim().is_empty() {
        return Err(Error::ConfigurationInvalid("realm cannot be empty".into()));
    }

    if realm.contains(['/', '?', '#']) {
        return Err(Error::ConfigurationInvalid(format!(
            "realm must be a single path segment: {realm}"
        )));
    }

    Ok(())
}

/// Build the key set URL from a base URL and an optional realm
pub(crate) fn build_key_set_url(base_url: &str, realm: Option<&str>) -> Result<String> {
    validate_url(base_url, "base URL")?;

    let url = match realm {
        Some(realm) => {
            validate_realm(realm)?;
            let base = base_url.trim_end_matches('/');
            format!("{base}/auth/realms/{realm}/protocol/openid-connect/certs")
        }
        None => base_url.to_string(),
    };

    validate_url(&url, "key set URL")?;
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_key_set_url_with_realm() {
        assert_eq!(
            build_key_set_url("https://auth.example.com", Some("testrealm")),
            Ok("https://auth.example.com/auth/realms/testrealm/protocol/openid-connect/certs".into())
        );
        assert_eq!(
            build_key_set_url("http://localhost:8080/", Some("master")),
            Ok("http://localhost:8080/auth/realms/master/protocol/openid-connect/certs".into())
        );
    }

    #[test]
    fn test_build_key_set_url_verbatim() {
        assert_eq!(
            build_key_set_url("https://auth.example.com/custom", None),
            Ok("https://auth.example.com/custom".into())
        );
        // Trailing slash is preserved without a realm
        assert_eq!(
            build_key_set_url("https://auth.example.com/jwks/", None),
            Ok("https://auth.example.com/jwks/".into())
        );
    }

    #[test]
    fn test_build_key_set_url_empty() {
        assert!(build_key_set_url("", None).is_err());
        assert!(build_key_set_url("   ", Some("realm")).is_err());
    }

    #[test]
    fn test_build_key_set_url_invalid_scheme() {
        assert!(matches!(
            build_key_set_url("ftp://example.com", None),
            Err(Error::ConfigurationInvalid(msg)) if msg.contains("http or https")
        ));
    }

    #[test]
    fn test_build_key_set_url_not_a_url() {
        assert!(build_key_set_url("auth.example.com", None).is_err());
    }

    #[test]
    fn test_build_key_set_url_too_long() {
        let long_url = "https://example.com/".to_string() + &"a".repeat(MAX_KEY_SET_URL_LENGTH);
        assert!(matches!(
            build_key_set_url(&long_url, None),
            Err(Error::ConfigurationInvalid(msg)) if msg.contains("too long")
        ));
    }

    #[test]
    fn test_build_key_set_url_invalid_realm() {
        assert!(build_key_set_url("https://auth.example.com", Some("")).is_err());
        assert!(build_key_set_url("https://auth.example.com", Some("a/b")).is_err());
        assert!(build_key_set_url("https://auth.example.com", Some("a?b")).is_err());
    }
}
