//! Domain types for the Fieldhouse backend API.
//!
//! These types mirror the backend's JSON wire format. Prices travel as
//! exact decimals; the engine never mutates a [`Product`].

use fieldhouse_core::{OrderId, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Product Types
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Unit price.
    pub price: Decimal,
    /// Plain text description.
    pub description: String,
    /// Image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Product category (e.g., "Footwear").
    pub category: String,
    /// Sport the product belongs to (e.g., "Running").
    pub sport: String,
    /// Brand name.
    #[serde(default)]
    pub brand: Option<String>,
}

/// Catalog filter state.
///
/// Empty fields are unconstrained and are omitted from the query string
/// entirely, never sent as empty parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Free-text search query.
    pub query: String,
    /// Category constraint (empty = all categories).
    pub category: String,
    /// Sport constraint (empty = all sports).
    pub sport: String,
}

impl ProductFilter {
    /// Set the text query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Set the category constraint.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the sport constraint.
    #[must_use]
    pub fn with_sport(mut self, sport: impl Into<String>) -> Self {
        self.sport = sport.into();
        self
    }

    /// Whether no field constrains the catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.category.is_empty() && self.sport.is_empty()
    }

    /// Query parameters for the Product Service. Empty fields are omitted.
    #[must_use]
    pub fn query_params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::new();
        if !self.query.is_empty() {
            params.push(("q", self.query.as_str()));
        }
        if !self.category.is_empty() {
            params.push(("category", self.category.as_str()));
        }
        if !self.sport.is_empty() {
            params.push(("sport", self.sport.as_str()));
        }
        params
    }
}

// =============================================================================
// Order Types
// =============================================================================

/// One order line: a product and the quantity purchased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Quantity, always at least 1.
    pub quantity: u32,
}

/// Customer and shipping record attached to an order.
///
/// Address collection is out of scope for the engine; every order carries
/// the same placeholder record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCustomer {
    /// Customer display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub zip: String,
}

impl OrderCustomer {
    /// The fixed placeholder customer used for all orders.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            name: "Guest Shopper".to_string(),
            email: "guest@fieldhouse.shop".to_string(),
            address: "1 Fieldhouse Way".to_string(),
            city: "Springfield".to_string(),
            zip: "00000".to_string(),
        }
    }
}

/// Outbound order submission payload.
///
/// Built from a single cart snapshot at submission time and never retained
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    /// Order lines.
    pub items: Vec<OrderItem>,
    /// Customer and shipping record.
    pub customer: OrderCustomer,
    /// Sum of line price x quantity over all items.
    pub subtotal: Decimal,
    /// Shipping cost per the pricing policy.
    pub shipping: Decimal,
    /// Subtotal plus shipping.
    pub total: Decimal,
}

/// Order Service confirmation body.
///
/// Only inspected for the optional order id; anything else the service
/// returns is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Persisted order id, when the service reports one.
    #[serde(default)]
    pub id: Option<OrderId>,
}

/// Error body optionally returned by the Order Service.
///
/// An absent or unparsable body degrades to the no-detail default rather
/// than a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderErrorBody {
    /// Human-readable rejection reason.
    #[serde(default)]
    pub detail: Option<String>,
}
