use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShopifyError {
    /// Connection-level failure (refused, DNS, timeout). Not retried.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote answered with a non-2xx status. The raw body text is kept
    /// for diagnostics since Shopify error payloads vary by endpoint.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        body: String,
    },

    /// The remote answered 2xx but the payload did not have the expected
    /// shape (missing items field, non-JSON body, wrong field types).
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid store domain \"{store}\": {reason}")]
    InvalidStoreDomain { store: String, reason: String },
}
