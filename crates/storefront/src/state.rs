//! Application state shared across the storefront engine.

use std::sync::Arc;

use fieldhouse_core::ProductId;

use crate::backend::types::OrderConfirmation;
use crate::backend::{BackendClient, CheckoutError, OrderGateway, ProductCatalog};
use crate::cart::CartStore;
use crate::catalog::CatalogQuery;
use crate::checkout::CheckoutFlow;
use crate::config::StorefrontConfig;

/// Application state wiring the catalog, cart, and checkout together.
///
/// This struct is cheaply cloneable via `Arc` and is what a front end
/// (the CLI, a web layer) drives. Every clone shares one cart and one
/// catalog.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogQuery,
    cart: CartStore,
    checkout: CheckoutFlow,
}

impl AppState {
    /// Create application state backed by the HTTP backend from `config`.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let client = Arc::new(BackendClient::new(&config));
        let products: Arc<dyn ProductCatalog> = client.clone();
        let orders: Arc<dyn OrderGateway> = client;
        Self::with_services(config, products, orders)
    }

    /// Create application state with explicit service implementations.
    ///
    /// Tests use this to substitute scripted backends.
    #[must_use]
    pub fn with_services(
        config: StorefrontConfig,
        products: Arc<dyn ProductCatalog>,
        orders: Arc<dyn OrderGateway>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: CatalogQuery::new(products),
                cart: CartStore::new(),
                checkout: CheckoutFlow::new(orders),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog query.
    #[must_use]
    pub fn catalog(&self) -> &CatalogQuery {
        &self.inner.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the checkout flow.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutFlow {
        &self.inner.checkout
    }

    /// Add one unit of a product from the loaded catalog to the cart.
    ///
    /// Returns false when the id is not in the currently loaded list; the
    /// cart only ever holds products the user could see.
    pub fn add_to_cart(&self, id: ProductId) -> bool {
        let Some(product) = self
            .inner
            .catalog
            .products()
            .into_iter()
            .find(|product| product.id == id)
        else {
            return false;
        };
        self.inner.cart.add(&product);
        true
    }

    /// Submit the current cart as an order.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` per [`CheckoutFlow::submit`].
    pub async fn checkout_cart(&self) -> Result<OrderConfirmation, CheckoutError> {
        self.inner.checkout.submit(&self.inner.cart).await
    }

    /// Seed backend demo data and reload the catalog.
    ///
    /// Failures are swallowed here by design: seeding is a demo
    /// affordance, and its errors are logged but never surfaced to the
    /// cart or checkout subsystems.
    pub async fn seed_demo_data(&self) {
        if let Err(err) = self.inner.catalog.seed_demo_data().await {
            tracing::warn!(error = %err, "ignoring demo seed failure");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use rust_decimal::Decimal;

    use crate::backend::FetchError;
    use crate::backend::types::{OrderPayload, Product, ProductFilter};

    struct FixedBackend {
        products: Vec<Product>,
    }

    #[async_trait]
    impl ProductCatalog for FixedBackend {
        async fn search(&self, _filter: &ProductFilter) -> Result<Vec<Product>, FetchError> {
            Ok(self.products.clone())
        }

        async fn seed_demo_data(&self) -> Result<(), FetchError> {
            Ok(())
        }
    }

    #[async_trait]
    impl OrderGateway for FixedBackend {
        async fn submit_order(
            &self,
            _payload: &OrderPayload,
        ) -> Result<OrderConfirmation, CheckoutError> {
            Ok(OrderConfirmation::default())
        }
    }

    fn state_with_products(products: Vec<Product>) -> AppState {
        let backend = Arc::new(FixedBackend { products });
        let products: Arc<dyn ProductCatalog> = backend.clone();
        let orders: Arc<dyn OrderGateway> = backend;
        AppState::with_services(
            StorefrontConfig::for_base_url("http://unused"),
            products,
            orders,
        )
    }

    fn product(id: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Decimal::new(15_00, 2),
            description: String::new(),
            image: None,
            category: "Equipment".to_string(),
            sport: "Tennis".to_string(),
            brand: None,
        }
    }

    #[tokio::test]
    async fn test_add_to_cart_requires_loaded_product() {
        let state = state_with_products(vec![product(1)]);

        // Nothing loaded yet: the id is unknown.
        assert!(!state.add_to_cart(ProductId::new(1)));

        state.catalog().load(ProductFilter::default()).await.unwrap();
        assert!(state.add_to_cart(ProductId::new(1)));
        assert!(!state.add_to_cart(ProductId::new(2)));
        assert_eq!(state.cart().item_count(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_one_cart() {
        let state = state_with_products(vec![product(1)]);
        state.catalog().load(ProductFilter::default()).await.unwrap();

        let clone = state.clone();
        clone.add_to_cart(ProductId::new(1));
        assert_eq!(state.cart().item_count(), 1);
    }
}
