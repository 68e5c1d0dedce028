//! Scripted demo order: load the catalog, add products, check out.

use tracing::{info, warn};

use fieldhouse_core::ProductId;
use fieldhouse_core::types::price;
use fieldhouse_storefront::AppState;
use fieldhouse_storefront::backend::types::ProductFilter;
use fieldhouse_storefront::config::StorefrontConfig;

/// Add the given product ids to the cart and submit a checkout.
///
/// # Errors
///
/// Returns an error if configuration loading or the initial catalog load
/// fails. A rejected checkout is reported through the flow's message and
/// is not an error here; the cart stays intact for another attempt.
pub async fn run(add: Vec<i64>) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let state = AppState::new(config);

    state.catalog().load(ProductFilter::default()).await?;

    for raw_id in add {
        let id = ProductId::new(raw_id);
        if state.add_to_cart(id) {
            info!("added product #{id} to cart");
        } else {
            warn!("product #{id} is not in the catalog; skipping");
        }
    }

    let cart = state.cart();
    if cart.is_empty() {
        info!("cart is empty; nothing to check out");
        return Ok(());
    }

    for line in cart.lines() {
        info!(
            "  {} x{} @ {}",
            line.title,
            line.qty,
            price::format_usd(line.price)
        );
    }
    info!("subtotal {}", price::format_usd(cart.subtotal()));
    info!("shipping {}", price::format_usd(cart.shipping()));
    info!("total    {}", price::format_usd(cart.total()));

    let outcome = state.checkout_cart().await;
    if let Some(message) = state.checkout().message() {
        info!("{message}");
    }
    if outcome.is_err() {
        warn!("order was not placed; the cart is preserved for retry");
    }

    Ok(())
}
