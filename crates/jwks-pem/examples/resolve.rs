//! Resolve a key ID from a Keycloak realm and print the PEM
//!
//! ```not_rust
//! cargo run --example resolve -- https://keycloak.example.com my-realm my-kid
//! ```
//!
//! Pass an empty realm (`""`) to treat the URL as the key set endpoint itself.

use std::time::Duration;

use jwks_pem::KeyResolver;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jwks_pem=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(base_url), Some(realm), Some(kid)) = (args.next(), args.next(), args.next()) else {
        eprintln!("usage: resolve <base-url> <realm> <kid>");
        std::process::exit(2);
    };

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build HTTP client");

    let mut builder = KeyResolver::builder(base_url);
    builder.client(client);
    if !realm.is_empty() {
        builder.realm(realm);
    }

    let resolver = match builder.build() {
        Ok(resolver) => resolver,
        Err(e) => {
            tracing::error!("invalid configuration: {e}");
            std::process::exit(2);
        }
    };
    tracing::debug!("fetching keys from {}", resolver.key_set_url());

    match resolver.resolve(&kid).await {
        Ok(pem) => print!("{pem}"),
        Err(e) => {
            tracing::warn!("resolving {kid} failed: {e}");
            std::process::exit(1);
        }
    }
}
