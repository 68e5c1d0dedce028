//! Populate backend demo data.

use tracing::info;

use fieldhouse_storefront::AppState;
use fieldhouse_storefront::config::StorefrontConfig;

/// Seed demo data and report what the catalog now holds.
///
/// Seeding failures are not fatal: the engine logs them and the catalog
/// keeps its previous contents.
///
/// # Errors
///
/// Returns an error if configuration loading fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let state = AppState::new(config);

    state.seed_demo_data().await;
    info!(
        "catalog holds {} products ({})",
        state.catalog().products().len(),
        state.catalog().status()
    );

    Ok(())
}
