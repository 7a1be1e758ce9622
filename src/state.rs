use std::sync::Arc;

use crate::database::CatalogStore;
use crate::notify::NotificationPublisher;

/// Shared per-request dependencies. Everything a handler needs is injected
/// here; nothing reads process-wide singletons on the request path.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    /// Absent when no real-time transport is configured; handlers skip
    /// notification silently in that case.
    pub publisher: Option<Arc<dyn NotificationPublisher>>,
    pub jwt_secret: String,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        publisher: Option<Arc<dyn NotificationPublisher>>,
        jwt_secret: impl Into<String>,
    ) -> Self {
        Self {
            store,
            publisher,
            jwt_secret: jwt_secret.into(),
        }
    }
}
