//! Shared application state.

use crate::config::Config;
use roster_core::{Classifier, ControlSession, LocalBus, SyncBus};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state.
///
/// There is exactly one control session per server; every display connection
/// builds its own replica from `bus`.
pub struct AppState {
    pub session: Mutex<ControlSession>,
    pub bus: Arc<LocalBus>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let bus = Arc::new(LocalBus::new(config.topic.clone(), config.channel_capacity));
        let classifier = Classifier::new(config.default_unit_label.clone());
        let session = ControlSession::new(bus.clone(), classifier);

        Self {
            session: Mutex::new(session),
            bus,
            config,
        }
    }

    /// The bus as seen by display replicas.
    pub fn sync_bus(&self) -> Arc<dyn SyncBus> {
        self.bus.clone()
    }
}
