use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use internlink::config::StorageConfig;
use internlink::error::AppError;
use internlink::marketplace::{EngagementStore, IdentityStore, JsonFileAdapter};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// The two marketplace stores sharing one file-backed adapter.
pub(crate) struct MarketplaceStores {
    pub(crate) identity: Arc<IdentityStore<JsonFileAdapter>>,
    pub(crate) engagement: Arc<EngagementStore<JsonFileAdapter>>,
}

pub(crate) fn open_stores(storage: &StorageConfig) -> Result<MarketplaceStores, AppError> {
    let adapter = Arc::new(JsonFileAdapter::new(&storage.data_dir)?);
    let identity = Arc::new(IdentityStore::open(adapter.clone())?);
    let engagement = Arc::new(EngagementStore::open(
        adapter,
        storage.engagement_policy(),
    )?);

    Ok(MarketplaceStores {
        identity,
        engagement,
    })
}
