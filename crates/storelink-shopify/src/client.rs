//! HTTP client for the admin catalog and collections endpoints.

use std::time::Duration;

use reqwest::Client;

use storelink_core::PaginationStrategy;

use crate::error::ShopifyError;
use crate::pagination::extract_next_cursor;
use crate::transport::{RawResponse, ResponseBody};
use crate::types::{
    Collection, CustomCollectionsPage, Product, ProductsPage, SmartCollectionsPage,
};

/// Client for one store's admin API.
///
/// Performs single request/response cycles through [`ShopifyClient::get_raw`]
/// and exposes the higher-level paginated and collection fetches on top of it.
/// Non-2xx statuses become typed errors at the fetch level, not the transport
/// level, and nothing here retries: a failed page fails the whole fetch so a
/// partial catalog is never returned.
#[derive(Debug, Clone)]
pub struct ShopifyClient {
    http: Client,
    origin: String,
    token: String,
    api_version: String,
}

impl ShopifyClient {
    /// Creates a client for `store_domain` with the given access token.
    ///
    /// `store_domain` may be a bare domain (`shop.myshopify.com`) or a full
    /// origin with scheme; bare domains get `https://`.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ShopifyError::InvalidStoreDomain`] if the
    /// domain does not form a valid URL base.
    pub fn new(
        store_domain: &str,
        token: &str,
        api_version: &str,
        timeout_secs: u64,
    ) -> Result<Self, ShopifyError> {
        let origin = normalize_origin(store_domain);
        reqwest::Url::parse(&origin).map_err(|e| ShopifyError::InvalidStoreDomain {
            store: store_domain.to_owned(),
            reason: e.to_string(),
        })?;

        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            origin,
            token: token.to_owned(),
            api_version: api_version.to_owned(),
        })
    }

    /// Performs one GET against the admin API and returns the raw outcome.
    ///
    /// Never fails on a non-2xx status; callers inspect `RawResponse::status`.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Http`] only for connection-level failures.
    pub async fn get_raw(&self, url: &str) -> Result<RawResponse, ShopifyError> {
        let response = self
            .http
            .get(url)
            .header("X-Shopify-Access-Token", &self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let link_header = response
            .headers()
            .get(reqwest::header::LINK)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let text = response.text().await?;

        Ok(RawResponse {
            status,
            link_header,
            body: ResponseBody::from_text(text),
        })
    }

    /// Fetches the entire catalog by walking pages until exhaustion.
    ///
    /// Pages are fetched strictly in order because each continuation depends
    /// on the previous response. The `max_pages` ceiling bounds memory and
    /// request count against a remote that keeps signaling another page; when
    /// it is reached the items accumulated so far are returned and a warning
    /// is logged. An empty catalog yields an empty `Vec`, not an error.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::UnexpectedStatus`] — any page answered non-2xx; items
    ///   from earlier pages are discarded, never partially returned.
    /// - [`ShopifyError::Deserialize`] — a page body lacked the `products`
    ///   field or was not JSON.
    /// - [`ShopifyError::Http`] — connection-level failure.
    pub async fn fetch_all_products(
        &self,
        limit: u32,
        strategy: PaginationStrategy,
        max_pages: usize,
    ) -> Result<Vec<Product>, ShopifyError> {
        let mut all_products: Vec<Product> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page_number: u32 = 1;
        let mut pages_fetched = 0usize;

        loop {
            let url = self.products_url(limit, strategy, cursor.as_deref(), page_number)?;
            let raw = self.get_raw(&url).await?;

            if !raw.is_success() {
                return Err(ShopifyError::UnexpectedStatus {
                    status: raw.status,
                    url,
                    body: raw.body.display_text(),
                });
            }

            pages_fetched += 1;
            let page: ProductsPage = raw
                .body
                .parse(&format!("products page {pages_fetched} from {}", self.origin))?;
            let page_len = page.products.len();
            all_products.extend(page.products);

            if pages_fetched >= max_pages {
                tracing::warn!(
                    pages_fetched,
                    items = all_products.len(),
                    "pagination ceiling reached; returning accumulated catalog"
                );
                break;
            }

            match strategy {
                PaginationStrategy::LinkCursor => {
                    cursor = extract_next_cursor(raw.link_header.as_deref());
                    if cursor.is_none() {
                        break;
                    }
                }
                PaginationStrategy::ShortPage => {
                    if page_len < limit as usize {
                        break;
                    }
                    page_number += 1;
                }
            }
        }

        tracing::debug!(
            items = all_products.len(),
            pages = pages_fetched,
            "catalog fetch complete"
        );
        Ok(all_products)
    }

    /// Fetches the author-curated collections.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::fetch_all_products`], for a single request.
    pub async fn fetch_custom_collections(&self) -> Result<Vec<Collection>, ShopifyError> {
        let url = self.endpoint_url("custom_collections.json", &[])?;
        let raw = self.get_raw(&url).await?;

        if !raw.is_success() {
            return Err(ShopifyError::UnexpectedStatus {
                status: raw.status,
                url,
                body: raw.body.display_text(),
            });
        }

        let page: CustomCollectionsPage = raw
            .body
            .parse(&format!("custom collections from {}", self.origin))?;
        Ok(page.custom_collections)
    }

    /// Fetches the rule-derived (smart) collections.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::fetch_all_products`], for a single request.
    pub async fn fetch_smart_collections(&self) -> Result<Vec<Collection>, ShopifyError> {
        let url = self.endpoint_url("smart_collections.json", &[])?;
        let raw = self.get_raw(&url).await?;

        if !raw.is_success() {
            return Err(ShopifyError::UnexpectedStatus {
                status: raw.status,
                url,
                body: raw.body.display_text(),
            });
        }

        let page: SmartCollectionsPage = raw
            .body
            .parse(&format!("smart collections from {}", self.origin))?;
        Ok(page.smart_collections)
    }

    /// Builds the products URL for one page under the given strategy.
    fn products_url(
        &self,
        limit: u32,
        strategy: PaginationStrategy,
        cursor: Option<&str>,
        page_number: u32,
    ) -> Result<String, ShopifyError> {
        let mut params: Vec<(&str, String)> = vec![("limit", limit.to_string())];
        match strategy {
            PaginationStrategy::LinkCursor => {
                if let Some(cursor) = cursor {
                    params.push(("page_info", cursor.to_owned()));
                }
            }
            PaginationStrategy::ShortPage => {
                // The first page is addressed without an explicit page number.
                if page_number > 1 {
                    params.push(("page", page_number.to_string()));
                }
            }
        }
        self.endpoint_url("products.json", &params)
    }

    /// Builds a full admin-API URL for `resource` with query parameters.
    fn endpoint_url(
        &self,
        resource: &str,
        params: &[(&str, String)],
    ) -> Result<String, ShopifyError> {
        let base = format!(
            "{origin}/admin/api/{version}/{resource}",
            origin = self.origin,
            version = self.api_version
        );
        let mut url =
            reqwest::Url::parse(&base).map_err(|e| ShopifyError::InvalidStoreDomain {
                store: self.origin.clone(),
                reason: format!("cannot build endpoint URL for {resource}: {e}"),
            })?;

        for (name, value) in params {
            url.query_pairs_mut().append_pair(name, value);
        }

        Ok(url.to_string())
    }
}

/// Normalizes a configured store domain into a URL origin.
fn normalize_origin(store_domain: &str) -> String {
    let trimmed = store_domain.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_origin_prepends_https_for_bare_domains() {
        assert_eq!(
            normalize_origin("shop.myshopify.com"),
            "https://shop.myshopify.com"
        );
    }

    #[test]
    fn normalize_origin_keeps_explicit_scheme_and_trims_slash() {
        assert_eq!(
            normalize_origin("http://127.0.0.1:9999/"),
            "http://127.0.0.1:9999"
        );
    }

    #[test]
    fn products_url_first_page_has_no_cursor_or_page_param() {
        let client = ShopifyClient::new("shop.myshopify.com", "tok", "2023-10", 5).expect("client");
        let url = client
            .products_url(250, PaginationStrategy::LinkCursor, None, 1)
            .expect("url");
        assert_eq!(
            url,
            "https://shop.myshopify.com/admin/api/2023-10/products.json?limit=250"
        );
    }

    #[test]
    fn products_url_carries_page_info_cursor() {
        let client = ShopifyClient::new("shop.myshopify.com", "tok", "2023-10", 5).expect("client");
        let url = client
            .products_url(250, PaginationStrategy::LinkCursor, Some("abc123"), 1)
            .expect("url");
        assert!(url.ends_with("products.json?limit=250&page_info=abc123"));
    }

    #[test]
    fn products_url_short_page_numbers_pages_after_the_first() {
        let client = ShopifyClient::new("shop.myshopify.com", "tok", "2023-10", 5).expect("client");
        let url = client
            .products_url(100, PaginationStrategy::ShortPage, None, 3)
            .expect("url");
        assert!(url.ends_with("products.json?limit=100&page=3"));
    }

    #[test]
    fn new_rejects_unparseable_store_domain() {
        let result = ShopifyClient::new("https://", "tok", "2023-10", 5);
        assert!(matches!(
            result,
            Err(ShopifyError::InvalidStoreDomain { .. })
        ));
    }
}
