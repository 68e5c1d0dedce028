//! Backend API clients for the Product and Order services.
//!
//! # Architecture
//!
//! - The backend is the source of truth for the catalog and for persisted
//!   orders; the engine holds no local copies beyond the currently loaded
//!   product list
//! - [`ProductCatalog`] and [`OrderGateway`] are the seams the rest of the
//!   engine depends on; [`BackendClient`] implements both over `reqwest`
//! - Tests substitute scripted implementations of the traits
//!
//! # Endpoints
//!
//! - `GET /api/products?q=&category=&sport=` - filtered product list;
//!   empty filter fields are omitted from the query string entirely
//! - `POST /api/products/seed` - populate demo data (status only)
//! - `POST /api/orders` - submit an order payload
//!
//! # Example
//!
//! ```rust,ignore
//! use fieldhouse_storefront::backend::{BackendClient, ProductCatalog};
//! use fieldhouse_storefront::backend::types::ProductFilter;
//!
//! let client = BackendClient::new(&config);
//! let products = client
//!     .search(&ProductFilter::default().with_sport("Running"))
//!     .await?;
//! ```

mod client;
pub mod types;

pub use client::BackendClient;
pub use types::{
    OrderConfirmation, OrderCustomer, OrderErrorBody, OrderItem, OrderPayload, Product,
    ProductFilter,
};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the Product Service (catalog queries and demo seeding).
///
/// Transport failures and non-success statuses are one error kind; the
/// difference lives in the message, not in divergent control flow.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        /// Response body prefix for diagnostics.
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors from the Order Service, plus the submission boundary guards.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service rejected the order.
    #[error("order rejected ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected {
        status: reqwest::StatusCode,
        /// Structured `detail` from the error body, when one was present
        /// and parsable.
        detail: Option<String>,
    },

    /// Submission was requested with an empty cart; nothing was sent.
    #[error("cart is empty")]
    EmptyCart,

    /// A submission is already in flight; nothing was sent.
    #[error("a submission is already in flight")]
    SubmissionInFlight,
}

impl CheckoutError {
    /// User-facing failure detail: the service's structured `detail` when
    /// present, otherwise a generic status description.
    #[must_use]
    pub fn user_detail(&self) -> String {
        match self {
            Self::Rejected {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Rejected {
                status,
                detail: None,
            } => status
                .canonical_reason()
                .map_or_else(|| status.to_string(), ToString::to_string),
            other => other.to_string(),
        }
    }
}

/// Read side of the external Product Service.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Fetch products matching the filter.
    async fn search(&self, filter: &ProductFilter) -> Result<Vec<Product>, FetchError>;

    /// Ask the backend to populate demo data.
    async fn seed_demo_data(&self) -> Result<(), FetchError>;
}

/// Write side of the external Order Service.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submit an order payload.
    async fn submit_order(
        &self,
        payload: &OrderPayload,
    ) -> Result<OrderConfirmation, CheckoutError>;
}
