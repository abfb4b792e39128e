//! Client for the backend product API.
//!
//! | Method | Endpoint |
//! |--------|----------|
//! | [`ApiClient::product`] | `GET /products/{id}` |
//! | [`ApiClient::autocomplete`] | `GET /products/autocomplete` |
//! | [`ApiClient::product_prices`] | `GET /products/{id}/prices` |
//! | [`ApiClient::manufacturers`] | `GET /manufacturers` |
//! | [`ApiClient::manufacturer_products`] | `GET /manufacturers/{key}/products` |
//!
//! The autocomplete endpoint serves a bare JSON array. The client folds the
//! outcome into [`ApiResponse`] so callers branch on success explicitly; every
//! other call returns `Result<_, ApiError>` and leaves handling to the caller.

mod error;
mod types;

pub use error::ApiError;
pub use types::{ApiResponse, ManufacturerSummary, Price, Product, ProductAutocomplete};

use crate::log;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Optional filters for manufacturer product listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub release_year: Option<i32>,
    pub limit: Option<u32>,
}

impl ProductFilter {
    /// Render as a query string, including the leading `?` when non-empty.
    fn query_string(&self) -> String {
        let mut params = Vec::with_capacity(2);
        if let Some(year) = self.release_year {
            params.push(format!("release_year={year}"));
        }
        if let Some(limit) = self.limit {
            params.push(format!("limit={limit}"));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// Thin typed wrapper over `reqwest` for one API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a single product by id.
    pub async fn product(&self, id: u64) -> Result<Product, ApiError> {
        self.get_json(&format!("/products/{id}")).await
    }

    /// Fetch autocomplete entries for all products.
    ///
    /// Never fails: transport and decode errors are logged and reported as
    /// [`ApiResponse::Failure`].
    pub async fn autocomplete(&self) -> ApiResponse<Vec<ProductAutocomplete>> {
        let result = self
            .get_json::<Vec<ProductAutocomplete>>("/products/autocomplete")
            .await;
        if let Err(err) = &result {
            log!("api"; "autocomplete unavailable: {err}");
        }
        result.into()
    }

    /// Fetch retailer prices for a product.
    pub async fn product_prices(&self, id: u64) -> Result<Vec<Price>, ApiError> {
        self.get_json(&format!("/products/{id}/prices")).await
    }

    /// Fetch the manufacturers known to the backend.
    pub async fn manufacturers(&self) -> Result<Vec<ManufacturerSummary>, ApiError> {
        self.get_json("/manufacturers").await
    }

    /// Fetch products of one manufacturer, optionally filtered.
    pub async fn manufacturer_products(
        &self,
        manufacturer: &str,
        filter: ProductFilter,
    ) -> Result<Vec<Product>, ApiError> {
        let path = format!(
            "/manufacturers/{}/products{}",
            urlencoding::encode(manufacturer),
            filter.query_string()
        );
        self.get_json(&path).await
    }

    /// Issue a GET for `path` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| ApiError::Http {
            url: url.clone(),
            source,
        })?;
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode { url, source })
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! In-process HTTP server answering canned JSON bodies.

    use std::{collections::HashMap, sync::Arc, thread};
    use tiny_http::{Header, Response, Server};

    /// Serves `routes` (request URL → (status, body)) until dropped.
    /// Unknown URLs answer 404.
    pub struct MockApi {
        pub base_url: String,
        server: Arc<Server>,
    }

    impl MockApi {
        pub fn start(routes: &[(&str, u16, &str)]) -> Self {
            let routes: HashMap<String, (u16, String)> = routes
                .iter()
                .map(|(url, status, body)| ((*url).to_string(), (*status, (*body).to_string())))
                .collect();

            let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
            let addr = server.server_addr().to_ip().unwrap();
            let base_url = format!("http://{addr}");

            let worker = Arc::clone(&server);
            thread::spawn(move || {
                for request in worker.incoming_requests() {
                    let (status, body) = routes
                        .get(request.url())
                        .cloned()
                        .unwrap_or((404, r#"{"detail":"Not Found"}"#.to_string()));
                    let header =
                        Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
                    let response = Response::from_string(body)
                        .with_status_code(status)
                        .with_header(header);
                    let _ = request.respond(response);
                }
            });

            Self { base_url, server }
        }
    }

    impl Drop for MockApi {
        fn drop(&mut self) {
            self.server.unblock();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockApi;
    use super::*;

    const CITY_BUS: &str = r#"{
        "id": 1, "manufacturer_id": "cada", "name": "City Bus", "manufacturer": "CaDA",
        "category": "City", "base_image_url": "https://img.example.com/1.jpg",
        "description": "Bus", "piece_count": 1628, "minifigures": 0,
        "release_year": 2023, "created_at": "2024-03-01T12:00:00"
    }"#;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_filter_query_string() {
        assert_eq!(ProductFilter::default().query_string(), "");
        let filter = ProductFilter {
            release_year: Some(2024),
            limit: None,
        };
        assert_eq!(filter.query_string(), "?release_year=2024");
        let filter = ProductFilter {
            release_year: Some(2024),
            limit: Some(10),
        };
        assert_eq!(filter.query_string(), "?release_year=2024&limit=10");
    }

    #[tokio::test]
    async fn test_product_fetch() {
        let api = MockApi::start(&[("/products/1", 200, CITY_BUS)]);
        let client = ApiClient::new(&api.base_url);

        let product = client.product(1).await.unwrap();
        assert_eq!(product.name.as_deref(), Some("City Bus"));
        assert_eq!(product.piece_count, Some(1628));
    }

    #[tokio::test]
    async fn test_product_not_found_is_status_error() {
        let api = MockApi::start(&[]);
        let client = ApiClient::new(&api.base_url);

        let err = client.product(99).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, ref url } if url.ends_with("/products/99")));
    }

    #[tokio::test]
    async fn test_product_malformed_body_is_decode_error() {
        let api = MockApi::start(&[("/products/2", 200, r#"{"id": "two"}"#)]);
        let client = ApiClient::new(&api.base_url);

        let err = client.product(2).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_autocomplete_success() {
        let body = r#"[
            {"id": 1, "manufacturer": "CaDA", "name": "City Bus"},
            {"id": 2, "manufacturer": "COBI", "manufacturer_id": "cobi", "name": "Tiger I"}
        ]"#;
        let api = MockApi::start(&[("/products/autocomplete", 200, body)]);
        let client = ApiClient::new(&api.base_url);

        let response = client.autocomplete().await;
        let entries = response.data().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].manufacturer_id.as_deref(), Some("cobi"));
    }

    #[tokio::test]
    async fn test_autocomplete_failure_is_error_response() {
        let api = MockApi::start(&[("/products/autocomplete", 500, "{}")]);
        let client = ApiClient::new(&api.base_url);

        let response = client.autocomplete().await;
        assert!(response.is_error());
        assert!(response.data().is_none());
    }

    #[tokio::test]
    async fn test_autocomplete_wrapped_body_rejected() {
        let body = r#"{"data": [], "error": false}"#;
        let api = MockApi::start(&[("/products/autocomplete", 200, body)]);
        let client = ApiClient::new(&api.base_url);

        assert!(client.autocomplete().await.is_error());
    }

    #[tokio::test]
    async fn test_manufacturer_products_with_filter() {
        let body = format!("[{CITY_BUS}]");
        let api = MockApi::start(&[(
            "/manufacturers/Mould%20King/products?release_year=2023&limit=5",
            200,
            body.as_str(),
        )]);
        let client = ApiClient::new(&api.base_url);

        let filter = ProductFilter {
            release_year: Some(2023),
            limit: Some(5),
        };
        let products = client
            .manufacturer_products("Mould King", filter)
            .await
            .unwrap();
        assert_eq!(products.len(), 1);
    }

    #[tokio::test]
    async fn test_manufacturers_and_prices() {
        let api = MockApi::start(&[
            ("/manufacturers", 200, r#"[{"id": 1, "name": "CaDA"}]"#),
            (
                "/products/1/prices",
                200,
                r#"[{"retailer_id": 3, "price": 99.0, "in_stock": true}]"#,
            ),
        ]);
        let client = ApiClient::new(&api.base_url);

        let manufacturers = client.manufacturers().await.unwrap();
        assert_eq!(manufacturers[0].name, "CaDA");

        let prices = client.product_prices(1).await.unwrap();
        assert_eq!(prices[0].in_stock, Some(true));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_http_error() {
        // Bind then release a port so nothing is listening on it
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = ApiClient::new(&format!("http://127.0.0.1:{port}"));
        let err = client.manufacturers().await.unwrap_err();
        assert!(matches!(err, ApiError::Http { .. }));
    }
}
