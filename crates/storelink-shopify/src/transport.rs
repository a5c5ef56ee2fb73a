//! Single request/response cycle against the admin API.
//!
//! The transport layer never fails on a non-2xx status; it hands the raw
//! status, the `Link` header, and the body back to the caller for inspection.
//! Only connection-level failures surface as errors. When the body is not
//! well-formed JSON the raw text is preserved instead of being discarded, so
//! error paths can still show what the remote actually sent.

use serde::de::DeserializeOwned;

use crate::error::ShopifyError;

/// The outcome of one admin-API request.
#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    /// Raw `Link` header value, if present. Carries pagination cursors.
    pub link_header: Option<String>,
    pub body: ResponseBody,
}

impl RawResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A response payload: parsed when well-formed, raw text otherwise.
#[derive(Debug)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseBody {
    #[must_use]
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }

    /// Deserializes the payload into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Deserialize`] when the payload is raw text or
    /// does not match the expected shape.
    pub fn parse<T: DeserializeOwned>(&self, context: &str) -> Result<T, ShopifyError> {
        let attempt = match self {
            Self::Json(value) => serde_json::from_value(value.clone()),
            Self::Text(text) => serde_json::from_str(text),
        };
        attempt.map_err(|e| ShopifyError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// A display form of the payload for embedding in error messages.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Json(value) => value.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        count: i64,
    }

    #[test]
    fn from_text_keeps_well_formed_json_parsed() {
        let body = ResponseBody::from_text(r#"{"count": 3}"#.to_owned());
        assert!(matches!(body, ResponseBody::Json(_)));
        let parsed: Wrapper = body.parse("wrapper").expect("parse");
        assert_eq!(parsed.count, 3);
    }

    #[test]
    fn from_text_keeps_raw_text_on_parse_failure() {
        let body = ResponseBody::from_text("<html>gateway error</html>".to_owned());
        assert!(matches!(body, ResponseBody::Text(_)));
        assert_eq!(body.display_text(), "<html>gateway error</html>");
    }

    #[test]
    fn parse_of_raw_text_is_a_deserialize_error() {
        let body = ResponseBody::from_text("not json".to_owned());
        let result = body.parse::<Wrapper>("wrapper");
        assert!(matches!(
            result,
            Err(ShopifyError::Deserialize { ref context, .. }) if context == "wrapper"
        ));
    }

    #[test]
    fn parse_of_mismatched_shape_is_a_deserialize_error() {
        let body = ResponseBody::from_text(r#"{"unexpected": true}"#.to_owned());
        assert!(body.parse::<Wrapper>("wrapper").is_err());
    }

    #[test]
    fn is_success_covers_the_2xx_range_only() {
        let ok = RawResponse {
            status: 201,
            link_header: None,
            body: ResponseBody::Text(String::new()),
        };
        let redirect = RawResponse {
            status: 301,
            link_header: None,
            body: ResponseBody::Text(String::new()),
        };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }
}
