use std::sync::Arc;

use crate::tasks::TaskStore;

pub struct AppState {
    pub tasks: Arc<dyn TaskStore>,
}
