use std::net::SocketAddr;

use crate::links::PlatformKeySet;

/// Policy applied when the remote catalog fetch fails.
///
/// `Strict` surfaces the failure to the caller as a structured error.
/// `Lenient` substitutes the fixed mock catalog instead, which keeps the
/// consumer rendering but masks upstream outages; it must be opted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    Strict,
    Lenient,
}

/// How the paginator decides whether another catalog page exists.
///
/// `LinkCursor` follows the `rel="next"` cursor in the `Link` response header
/// (current Shopify admin API). `ShortPage` requests a fixed page size and
/// stops when a page comes back short (older offset-style APIs without
/// reliable `Link` headers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationStrategy {
    LinkCursor,
    ShortPage,
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub shopify_store: String,
    /// Admin API access token. `None` puts the service in mock-catalog mode.
    pub shopify_token: Option<String>,
    pub shopify_api_version: String,
    pub request_timeout_secs: u64,
    pub page_limit: u32,
    pub max_pages: usize,
    pub pagination_strategy: PaginationStrategy,
    pub failure_policy: FailurePolicy,
    pub platform_key_set: PlatformKeySet,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"[redacted]")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("shopify_store", &self.shopify_store)
            .field(
                "shopify_token",
                &self.shopify_token.as_ref().map(|_| "[redacted]"),
            )
            .field("shopify_api_version", &self.shopify_api_version)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("page_limit", &self.page_limit)
            .field("max_pages", &self.max_pages)
            .field("pagination_strategy", &self.pagination_strategy)
            .field("failure_policy", &self.failure_policy)
            .field("platform_key_set", &self.platform_key_set)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
