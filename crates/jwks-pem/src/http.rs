//! HTTP client abstraction for fetching key sets
//!
//! The resolver only needs a single capability: GET a URL and report the
//! status code, `Content-Type` header and body. `reqwest::Client` implements
//! [`HttpClient`] out of the box; any other transport (proxies, custom TLS,
//! test doubles) can be plugged in by implementing the trait.

use crate::error::{Error, Result};
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`HttpClient::fetch`]
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Response to a key set request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Value of the `Content-Type` header, if present
    pub content_type: Option<String>,
    /// Raw response body
    pub body: Vec<u8>,
}

/// HTTP client used to fetch key sets
///
/// # Errors
///
/// Implementations report failures that prevented a response from being
/// received (connection, DNS, TLS, body read) as `Error::TransportError`.
/// Non-success status codes are **not** errors at this layer; they are
/// returned as a normal [`HttpResponse`].
pub trait HttpClient: Send + Sync {
    /// Perform a GET request for `url`
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse>>;
}

/// Build the client used when none is configured
///
/// Redirects are not followed: a 3xx answer is returned as-is and rejected as
/// an unexpected response.
pub(crate) fn default_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|e| Error::ConfigurationInvalid(format!("http client: {e}")))
}

impl HttpClient for reqwest::Client {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse>> {
        Box::pin(async move {
            let response = self
                .get(url)
                .send()
                .await
                .map_err(|e| Error::TransportError(format!("network: {e}")))?;

            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(ToString::to_string);

            let body = response
                .bytes()
                .await
                .map_err(|e| Error::TransportError(format!("network: {e}")))?
                .to_vec();

            Ok(HttpResponse {
                status,
                content_type,
                body,
            })
        })
    }
}
