//! Resolve RSA signing keys from a Keycloak-style JWKS endpoint into PKCS#1 PEM.
//!
//! ```no_run
//! # async fn run() -> jwks_pem::Result<()> {
//! use jwks_pem::KeyResolver;
//!
//! let resolver = KeyResolver::builder("https://auth.example.com")
//!     .realm("my-realm")
//!     .build()?;
//!
//! let pem = resolver.resolve("key-id").await?;
//! assert!(pem.starts_with("-----BEGIN RSA PUBLIC KEY-----\n"));
//! # Ok(())
//! # }
//! ```

mod error;
mod http;
mod jwks;
mod pem;
mod resolver;

// Internal modules
pub(crate) mod limits;
pub(crate) mod url;
pub(crate) mod utils;

// Public Interface
pub use error::{Error, Result};
pub use http::{BoxFuture, HttpClient, HttpResponse};
pub use jwks::KeySet;
pub use jwks::caching::{DEFAULT_CACHE_TTL, KeySetCache};
pub use jwks::jwk::Jwk;
pub use pem::rsa_public_key_pem;
pub use resolver::{KeyResolver, KeyResolverBuilder};
pub use utils::der::rsa_public_key_der;
