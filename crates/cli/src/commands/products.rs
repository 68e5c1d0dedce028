//! List catalog products with optional filters.

use tracing::info;

use fieldhouse_core::types::price;
use fieldhouse_storefront::AppState;
use fieldhouse_storefront::backend::types::ProductFilter;
use fieldhouse_storefront::config::StorefrontConfig;

/// Query the catalog and print the result plus derived facets.
///
/// # Errors
///
/// Returns an error if configuration loading or the catalog request fails.
pub async fn run(
    query: Option<String>,
    category: Option<String>,
    sport: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let state = AppState::new(config);

    let filter = ProductFilter {
        query: query.unwrap_or_default(),
        category: category.unwrap_or_default(),
        sport: sport.unwrap_or_default(),
    };

    let products = state.catalog().load(filter).await?;
    info!("{} products", products.len());
    for product in &products {
        let brand = product.brand.as_deref().unwrap_or("unbranded");
        info!(
            "  #{} {} {} [{} / {} / {}]",
            product.id,
            product.title,
            price::format_usd(product.price),
            product.category,
            product.sport,
            brand
        );
    }

    let categories = state.catalog().categories();
    if !categories.is_empty() {
        info!("categories: {}", categories.join(", "));
    }
    let sports = state.catalog().sports();
    if !sports.is_empty() {
        info!("sports: {}", sports.join(", "));
    }

    Ok(())
}
