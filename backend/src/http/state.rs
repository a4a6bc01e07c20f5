//! Application state for the HTTP server.

use std::sync::Arc;
use tokio::sync::{watch, Mutex};

use crate::dataset::Dataset;
use crate::services::{ReactiveController, ViewSnapshot};

/// Shared application state passed to all handlers.
///
/// Input events go through the controller mutex, so each one is fully
/// resolved before the next is accepted. Readers use the snapshot receiver
/// and never block on the controller.
#[derive(Clone)]
pub struct AppState {
    /// Read-only dataset shared with the controller
    pub dataset: Arc<Dataset>,
    /// Single writer of the filter selection
    pub controller: Arc<Mutex<ReactiveController>>,
    /// Latest published snapshot
    pub snapshots: watch::Receiver<Arc<ViewSnapshot>>,
}

impl AppState {
    /// Create a new application state over the given dataset.
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let controller = ReactiveController::new(Arc::clone(&dataset));
        let snapshots = controller.subscribe();
        Self {
            dataset,
            controller: Arc::new(Mutex::new(controller)),
            snapshots,
        }
    }

    /// Latest published snapshot.
    pub fn latest(&self) -> Arc<ViewSnapshot> {
        self.snapshots.borrow().clone()
    }
}
