//! Canonical test configuration.

use url::Url;

use crate::config::{CatalogConfig, StorefrontConfig};

/// Storefront configuration talking to the catalog at `catalog_url`.
///
/// Plain HTTP base URL, so session cookies are not marked secure.
#[must_use]
pub fn storefront_config(catalog_url: Url) -> StorefrontConfig {
    let mut catalog = CatalogConfig::new(catalog_url);
    catalog.timeout_secs = 5;

    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://127.0.0.1".to_string(),
        catalog,
        sentry_dsn: None,
        sentry_environment: None,
    }
}
