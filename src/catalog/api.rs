/// Catalog endpoint access
///
/// The store never talks HTTP itself; it awaits a [`CatalogSource`]. The
/// production source is [`HttpCatalog`], which maps non-success statuses to
/// friendly messages and never retries.

use std::future::Future;

use serde::Deserialize;
use tracing::{debug, error};

use crate::error::FetchError;
use crate::state::data::Product;

/// Friendly messages for the statuses users actually run into
const STATUS_MESSAGES: &[(u16, &str)] = &[
    (400, "Bad request: the server could not understand the request."),
    (401, "Unauthorized: please sign in to continue."),
    (403, "Forbidden: you do not have permission to access this resource."),
    (404, "Not found: the requested resource does not exist."),
    (408, "Request timeout: the server took too long to respond. Try again."),
    (429, "Too many requests: slow down and try again in a moment."),
    (500, "Server error: something went wrong on our side. Please try later."),
    (502, "Bad gateway: upstream service returned an invalid response."),
    (503, "Service unavailable: the service is temporarily down. Try again later."),
    (504, "Gateway timeout: upstream service timed out."),
];

/// Human-readable message for an HTTP status
pub fn message_for_status(status: u16) -> String {
    STATUS_MESSAGES
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, message)| (*message).to_string())
        .unwrap_or_else(|| format!("Failed to load catalog data (code {status})"))
}

/// Anything that can produce the product catalog.
pub trait CatalogSource {
    /// Fetch the full catalog once. No retries.
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>, FetchError>> + Send;
}

/// Response body of the catalog endpoint
#[derive(Debug, Deserialize)]
struct CatalogEnvelope {
    #[serde(default)]
    record: Option<Vec<Product>>,
}

/// Parse a catalog response body. A missing or null `record` is an empty catalog.
pub fn parse_catalog(body: &[u8]) -> Result<Vec<Product>, FetchError> {
    let envelope: CatalogEnvelope =
        serde_json::from_slice(body).map_err(|err| FetchError::Decode(err.to_string()))?;
    Ok(envelope.record.unwrap_or_default())
}

/// Catalog source backed by a JSON endpoint
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalog {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download one product image with the catalog's client
    pub fn fetch_image(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send {
        let request = self.client.get(url);

        async move {
            let response = request.send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::from_status(status.as_u16()));
            }

            Ok(response.bytes().await?.to_vec())
        }
    }
}

impl CatalogSource for HttpCatalog {
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>, FetchError>> + Send {
        let request = self.client.get(&self.url);
        let url = self.url.clone();

        async move {
            debug!(%url, "Requesting catalog");

            let response = request.send().await.map_err(|err| {
                error!(%url, error = %err, "API fetch error");
                FetchError::from(err)
            })?;

            let status = response.status();
            if !status.is_success() {
                error!(%url, status = status.as_u16(), "Catalog endpoint returned an error status");
                return Err(FetchError::from_status(status.as_u16()));
            }

            let body = response.bytes().await?;
            parse_catalog(&body)
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::Cell;

    /// Build a product with just the fields the tests care about
    pub fn product(id: u64, name: &str, ibu: f64) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: format!("{name} description"),
            image_url: format!("https://example.com/{id}.png"),
            abv: 5.0,
            ibu,
        }
    }

    /// Always returns the same products and counts calls
    pub struct StaticSource {
        products: Vec<Product>,
        calls: Cell<usize>,
    }

    impl StaticSource {
        pub fn new(products: Vec<Product>) -> Self {
            Self {
                products,
                calls: Cell::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.get()
        }
    }

    impl CatalogSource for StaticSource {
        fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>, FetchError>> + Send {
            self.calls.set(self.calls.get() + 1);
            let products = self.products.clone();
            async move { Ok(products) }
        }
    }

    /// Always fails with the given error
    pub struct FailingSource(FetchError);

    impl FailingSource {
        pub fn status(status: u16) -> Self {
            Self(FetchError::from_status(status))
        }
    }

    impl CatalogSource for FailingSource {
        fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>, FetchError>> + Send {
            let err = self.0.clone();
            async move { Err(err) }
        }
    }

    #[test]
    fn test_known_status_messages() {
        assert_eq!(
            message_for_status(404),
            "Not found: the requested resource does not exist."
        );
        assert_eq!(
            message_for_status(429),
            "Too many requests: slow down and try again in a moment."
        );
    }

    #[test]
    fn test_unknown_status_fallback() {
        assert_eq!(message_for_status(520), "Failed to load catalog data (code 520)");
    }

    #[test]
    fn test_parse_catalog_envelope() {
        let body = br#"{"record": [{"id": 1, "name": "Lager", "ibu": 20, "abv": 4.5}]}"#;

        let products = parse_catalog(body).unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Lager");
    }

    #[test]
    fn test_parse_catalog_without_record_is_empty() {
        assert!(parse_catalog(br#"{}"#).unwrap().is_empty());
        assert!(parse_catalog(br#"{"record": null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_catalog_rejects_garbage() {
        let err = parse_catalog(b"<html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
