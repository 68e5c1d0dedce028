//! `reqwest` implementation of the backend service traits.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::config::StorefrontConfig;

use super::types::{OrderConfirmation, OrderErrorBody, OrderPayload, Product, ProductFilter};
use super::{CheckoutError, FetchError, OrderGateway, ProductCatalog};

/// Client for the backend Product and Order services.
///
/// Cheap to clone; one instance is shared by the whole engine.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl BackendClient {
    /// Create a new backend client from configuration.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.backend_base_url.trim_end_matches('/').to_string(),
            timeout: config.request_timeout_secs.map(Duration::from_secs),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn apply_timeout(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }
}

/// Response body prefix kept in errors and logs.
fn body_prefix(body: &str) -> String {
    body.chars().take(200).collect()
}

#[async_trait]
impl ProductCatalog for BackendClient {
    #[instrument(skip(self, filter), fields(query = %filter.query, category = %filter.category, sport = %filter.sport))]
    async fn search(&self, filter: &ProductFilter) -> Result<Vec<Product>, FetchError> {
        let mut request = self.client.get(self.url("/api/products"));
        let params = filter.query_params();
        if !params.is_empty() {
            request = request.query(&params);
        }

        let response = self.apply_timeout(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body_prefix(&body),
                "product query returned non-success status"
            );
            return Err(FetchError::Status {
                status,
                body: body_prefix(&body),
            });
        }

        let products: Vec<Product> = serde_json::from_str(&body)?;
        debug!(count = products.len(), "products fetched");
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn seed_demo_data(&self) -> Result<(), FetchError> {
        let request = self.client.post(self.url("/api/products/seed"));
        let response = self.apply_timeout(request).send().await?;
        let status = response.status();

        // Only the status matters; no body contract beyond it.
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body_prefix(&body),
                "demo seed returned non-success status"
            );
            return Err(FetchError::Status {
                status,
                body: body_prefix(&body),
            });
        }

        debug!("demo data seeded");
        Ok(())
    }
}

#[async_trait]
impl OrderGateway for BackendClient {
    #[instrument(skip(self, payload), fields(items = payload.items.len(), total = %payload.total))]
    async fn submit_order(
        &self,
        payload: &OrderPayload,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let request = self.client.post(self.url("/api/orders")).json(payload);
        let response = self.apply_timeout(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // An unparsable error body degrades to the no-detail default.
            let parsed: OrderErrorBody = serde_json::from_str(&body).unwrap_or_default();
            tracing::warn!(
                status = %status,
                detail = ?parsed.detail,
                "order submission rejected"
            );
            return Err(CheckoutError::Rejected {
                status,
                detail: parsed.detail,
            });
        }

        // The confirmation is opaque beyond "succeeded"; a missing or odd
        // body still counts as success.
        let confirmation: OrderConfirmation = serde_json::from_str(&body).unwrap_or_default();
        debug!(order_id = ?confirmation.id, "order confirmed");
        Ok(confirmation)
    }
}
