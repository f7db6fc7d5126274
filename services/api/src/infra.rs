use job_portal::config::ListingConfig;
use job_portal::error::AppError;
use job_portal::listings::InMemoryJobRepository;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Where postings live for this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StoreMode {
    Memory,
    Snapshot,
}

impl StoreMode {
    pub(crate) fn label(self) -> &'static str {
        match self {
            StoreMode::Memory => "memory",
            StoreMode::Snapshot => "snapshot",
        }
    }
}

pub(crate) fn open_repository(
    config: &ListingConfig,
) -> Result<(Arc<InMemoryJobRepository>, StoreMode), AppError> {
    match &config.data_path {
        Some(path) => {
            let repository = InMemoryJobRepository::with_snapshot(path.clone())?;
            info!(
                path = %path.display(),
                postings = repository.len()?,
                "loaded job snapshot"
            );
            Ok((Arc::new(repository), StoreMode::Snapshot))
        }
        None => Ok((
            Arc::new(InMemoryJobRepository::default()),
            StoreMode::Memory,
        )),
    }
}
