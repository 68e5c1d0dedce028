//! Catalog querying with last-request-wins load semantics.
//!
//! [`CatalogQuery`] owns the fetched product list, the current filter, and
//! the load status. Overlapping loads are resolved by issuance order: each
//! load takes a monotonically increasing token, and a response is applied
//! only if its token is still the newest issued. Superseded responses are
//! discarded on arrival; the transport is not aborted.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, instrument, warn};

use fieldhouse_core::LoadStatus;

use crate::backend::types::{Product, ProductFilter};
use crate::backend::{FetchError, ProductCatalog};

#[derive(Debug, Default)]
struct CatalogState {
    products: Vec<Product>,
    status: LoadStatus,
    filter: ProductFilter,
    /// Token of the most recently issued load.
    issued: u64,
}

/// Owns the product list and loading status, and turns filter state into
/// backend queries.
pub struct CatalogQuery {
    catalog: Arc<dyn ProductCatalog>,
    state: Mutex<CatalogState>,
}

impl CatalogQuery {
    /// Create a catalog query over a Product Service.
    #[must_use]
    pub fn new(catalog: Arc<dyn ProductCatalog>) -> Self {
        Self {
            catalog,
            state: Mutex::new(CatalogState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load products for a filter.
    ///
    /// The status flips to `Loading` synchronously, before the request is
    /// sent, so a UI can render a placeholder. On an applied success the
    /// held list is replaced and the status becomes `Ready`; on an applied
    /// error the status becomes `Error` and the previous list is preserved.
    /// A load superseded by a newer one leaves all state untouched.
    ///
    /// Returns this load's own fetch result either way.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the Product Service request fails.
    #[instrument(skip(self, filter), fields(query = %filter.query, category = %filter.category, sport = %filter.sport))]
    pub async fn load(&self, filter: ProductFilter) -> Result<Vec<Product>, FetchError> {
        let token = {
            let mut state = self.lock();
            state.issued += 1;
            state.status = LoadStatus::Loading;
            state.filter = filter.clone();
            state.issued
        };

        let result = self.catalog.search(&filter).await;

        let mut state = self.lock();
        if token != state.issued {
            debug!(token, newest = state.issued, "discarding superseded load");
            return result;
        }

        match &result {
            Ok(products) => {
                state.products = products.clone();
                state.status = LoadStatus::Ready;
                debug!(count = products.len(), "catalog updated");
            }
            Err(err) => {
                state.status = LoadStatus::Error;
                warn!(error = %err, "catalog load failed; keeping previous list");
            }
        }
        result
    }

    /// Populate backend demo data, then reload with the current filter.
    ///
    /// A seed failure changes no catalog state; callers treat it as
    /// non-fatal (demo affordance, not a core transaction).
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if seeding or the follow-up load fails.
    #[instrument(skip(self))]
    pub async fn seed_demo_data(&self) -> Result<(), FetchError> {
        if let Err(err) = self.catalog.seed_demo_data().await {
            warn!(error = %err, "demo seed failed");
            return Err(err);
        }
        self.load(self.filter()).await?;
        Ok(())
    }

    /// Snapshot of the currently loaded product list.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    /// Current load status.
    #[must_use]
    pub fn status(&self) -> LoadStatus {
        self.lock().status
    }

    /// The filter of the most recently issued load.
    #[must_use]
    pub fn filter(&self) -> ProductFilter {
        self.lock().filter.clone()
    }

    /// Distinct categories of the loaded list, in first-occurrence order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        distinct(&self.lock().products, |product| &product.category)
    }

    /// Distinct sports of the loaded list, in first-occurrence order.
    #[must_use]
    pub fn sports(&self) -> Vec<String> {
        distinct(&self.lock().products, |product| &product.sport)
    }
}

/// Distinct values in first-occurrence order.
fn distinct(products: &[Product], field: impl Fn(&Product) -> &str) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for product in products {
        let value = field(product);
        if !values.iter().any(|seen| seen == value) {
            values.push(value.to_string());
        }
    }
    values
}
