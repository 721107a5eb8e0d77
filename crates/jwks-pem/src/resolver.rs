use crate::error::Result;
use crate::http::{HttpClient, default_client};
use crate::jwks::caching::{DEFAULT_CACHE_TTL, KeySetCache};
use crate::jwks::{KeySet, fetch_key_set, find_key_by_kid};
use crate::url::build_key_set_url;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Builder for [`KeyResolver`]
///
/// Configuration is fixed once [`build`](KeyResolverBuilder::build) is called.
#[derive(Clone)]
pub struct KeyResolverBuilder {
    config_base_url: String,
    config_realm: Option<String>,
    config_client: Option<Arc<dyn HttpClient>>,
    config_cache_ttl: Duration,
    config_cache: Option<KeySetCache>,
}

impl KeyResolverBuilder {
    /// Create a builder for the given base URL
    ///
    /// With a [`realm`](Self::realm) the base URL is the identity provider's
    /// root; without one it is used verbatim as the key set endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            config_base_url: base_url.into(),
            config_realm: None,
            config_client: None,
            config_cache_ttl: DEFAULT_CACHE_TTL,
            config_cache: None,
        }
    }

    /// Configure the realm
    ///
    /// Keys are then fetched from
    /// `{base_url}/auth/realms/{realm}/protocol/openid-connect/certs`.
    pub fn realm(&mut self, realm: impl Into<String>) -> &mut Self {
        self.config_realm = Some(realm.into());
        self
    }

    /// Configure the HTTP client used for fetching key sets
    ///
    /// Defaults to a `reqwest::Client` that does not follow redirects.
    /// Timeouts, proxies and TLS settings belong on the client; a custom
    /// client that follows redirects hides 3xx answers from the resolver.
    pub fn client<C>(&mut self, client: C) -> &mut Self
    where
        C: HttpClient + 'static,
    {
        self.config_client = Some(Arc::new(client));
        self
    }

    /// Configure how long a fetched key set is served from the cache
    ///
    /// Defaults to 24 hours. `Duration::ZERO` disables caching and values
    /// above 100 years are clamped to 100 years. Ignored when a
    /// shared cache is configured with [`cache`](Self::cache).
    pub fn cache_ttl(&mut self, ttl: Duration) -> &mut Self {
        self.config_cache_ttl = ttl;
        self
    }

    /// Configure a cache shared with other resolvers
    ///
    /// Entries are keyed by key set URL, so resolvers for different realms can
    /// share one cache without interfering.
    pub fn cache(&mut self, cache: KeySetCache) -> &mut Self {
        self.config_cache = Some(cache);
        self
    }

    /// Validate the configuration and build the resolver
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigurationInvalid` if the base URL or realm cannot
    /// form a valid http(s) key set URL, or if the default HTTP client cannot
    /// be created.
    pub fn build(&self) -> Result<KeyResolver> {
        let key_set_url = build_key_set_url(&self.config_base_url, self.config_realm.as_deref())?;

        let client: Arc<dyn HttpClient> = match &self.config_client {
            Some(client) => client.clone(),
            None => Arc::new(default_client()?),
        };

        let cache = self
            .config_cache
            .clone()
            .unwrap_or_else(|| KeySetCache::new(self.config_cache_ttl));

        Ok(KeyResolver {
            key_set_url: key_set_url.into(),
            client,
            cache,
        })
    }
}

/// Resolves key IDs to PEM-encoded PKCS#1 RSA public keys
///
/// The resolver is cheap to clone; clones share the HTTP client and cache.
#[derive(Clone)]
pub struct KeyResolver {
    key_set_url: Arc<str>,
    client: Arc<dyn HttpClient>,
    cache: KeySetCache,
}

impl KeyResolver {
    /// Start configuring a resolver for the given base URL
    pub fn builder(base_url: impl Into<String>) -> KeyResolverBuilder {
        KeyResolverBuilder::new(base_url)
    }

    /// The key set URL this resolver fetches from
    pub fn key_set_url(&self) -> &str {
        &self.key_set_url
    }

    /// The cache backing this resolver
    pub fn cache(&self) -> &KeySetCache {
        &self.cache
    }

    /// Resolve a key ID to a PEM-encoded PKCS#1 RSA public key
    ///
    /// The key set is served from the cache while fresh and fetched otherwise.
    /// The matching key must carry `n` and `e`, have key type `RSA` and
    /// algorithm `RS256`.
    ///
    /// # Errors
    ///
    /// - `Error::TransportError` if the key set could not be fetched
    /// - `Error::UnexpectedResponse` for a status other than 200 or a content
    ///   type other than `application/json`
    /// - `Error::InvalidResponseBody` if the body is not a key set document
    /// - `Error::KeyNotFound` if no key carries the requested `kid`
    /// - `Error::MissingKeyMaterial`, `Error::UnsupportedKeyType` or
    ///   `Error::UnsupportedAlgorithm` if the key fails validation
    pub async fn resolve(&self, kid: &str) -> Result<String> {
        let key_set = self.key_set().await?;

        let jwk = find_key_by_kid(&key_set, kid).inspect_err(|_| {
            warn!(url = %self.key_set_url, kid, "no key with matching kid in key set");
        })?;

        jwk.to_pem().inspect_err(|e| {
            warn!(url = %self.key_set_url, kid, error = %e, "key rejected");
        })
    }

    /// Get the key set from the cache, fetching it on a miss
    async fn key_set(&self) -> Result<Arc<KeySet>> {
        if let Some(cached) = self.cache.get(&self.key_set_url).await {
            debug!(url = %self.key_set_url, "key set cache hit");
            return Ok(cached);
        }

        debug!(url = %self.key_set_url, "key set cache miss, fetching");
        let key_set = fetch_key_set(self.client.as_ref(), &self.key_set_url)
            .await
            .inspect_err(|e| {
                warn!(url = %self.key_set_url, error = %e, "key set fetch failed");
            })?;

        let key_set = Arc::new(key_set);
        self.cache.insert(&self.key_set_url, key_set.clone()).await;

        Ok(key_set)
    }
}

impl fmt::Debug for KeyResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyResolver")
            .field("key_set_url", &self.key_set_url)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
