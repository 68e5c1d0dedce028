//! In-memory shopping cart.
//!
//! The cart is client-local state for the current session; it does not
//! survive the process. Lines are kept in first-add order and merged by
//! product id, so the cart never holds two lines for one product.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fieldhouse_core::ProductId;
use fieldhouse_core::types::price;

use crate::backend::types::Product;

/// One aggregated cart entry for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product id this line aggregates.
    pub id: ProductId,
    /// Product title (denormalized for display).
    pub title: String,
    /// Unit price snapshot taken when the line was first added.
    pub price: Decimal,
    /// Quantity, always at least 1.
    pub qty: u32,
}

impl CartLine {
    /// Line total (price x qty).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.qty)
    }
}

/// In-memory cart keyed by product id.
///
/// Methods take `&self`; state sits behind a mutex so the store can be
/// shared across suspension points on the UI thread. No lock is held
/// across an await.
#[derive(Debug, Default)]
pub struct CartStore {
    lines: Mutex<Vec<CartLine>>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CartLine>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add one unit of a product.
    ///
    /// An existing line for the same id has its quantity incremented; the
    /// price snapshot from the first add is retained even if the product's
    /// live price has changed since. Otherwise a new line is appended with
    /// quantity 1.
    pub fn add(&self, product: &Product) {
        let mut lines = self.lock();
        if let Some(line) = lines.iter_mut().find(|line| line.id == product.id) {
            line.qty += 1;
            return;
        }
        lines.push(CartLine {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            qty: 1,
        });
    }

    /// Remove the entire line for a product.
    ///
    /// Returns false (not an error) if no line exists for the id. There is
    /// no decrement: quantities only grow by one or disappear whole.
    pub fn remove(&self, id: ProductId) -> bool {
        let mut lines = self.lock();
        let len_before = lines.len();
        lines.retain(|line| line.id != id);
        lines.len() < len_before
    }

    /// Empty the cart.
    ///
    /// Called by the checkout flow after a confirmed successful order.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Snapshot of the cart lines in first-add order.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.lock().clone()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Total item count (sum of quantities).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lock().iter().map(|line| u64::from(line.qty)).sum()
    }

    /// Sum of line price x quantity over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lock().iter().map(CartLine::line_total).sum()
    }

    /// Shipping cost for the current subtotal.
    #[must_use]
    pub fn shipping(&self) -> Decimal {
        price::shipping_for(self.subtotal())
    }

    /// Subtotal plus shipping.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.subtotal() + self.shipping()
    }
}
