//! Dashboard entry-point: wires the store, cache, and session, then logs
//! the first rendered page as JSON.

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use dashboard::domain::query_cache::QueryCache;
use dashboard::domain::ui_state::UiState;
use dashboard::domain::CustomerService;
use dashboard::example_data::seed_example_customers_on_startup;
use dashboard::outbound::{InMemoryCustomerStore, TracingNotifier};
use dashboard::session::DashboardSession;
use dashboard::settings::DashboardSettings;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = DashboardSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load dashboard settings: {err}"))?;
    let policy = settings.missing_record_policy()?;
    let store = InMemoryCustomerStore::new(settings.latency(), policy);
    seed_example_customers_on_startup(&settings, &store).await?;

    let service = CustomerService::new(
        Arc::new(store),
        Arc::new(TracingNotifier),
        QueryCache::new(settings.cache_options()),
    );
    let mut session = DashboardSession::new(service, UiState::with_page_size(settings.page_size()));
    let loaded = session
        .refresh()
        .await
        .wrap_err("failed to load customers")?;
    info!(loaded, "dashboard ready");

    let view = session.table_view();
    let toolbar = session.toolbar();
    let snapshot = json!({
        "page": view.page(),
        "filtered": view.filtered_count(),
        "primaryAction": toolbar.primary_label(),
        "primaryEnabled": toolbar.is_primary_enabled(),
    });
    info!(%snapshot, "first page rendered");
    Ok(())
}
