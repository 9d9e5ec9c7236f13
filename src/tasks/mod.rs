pub mod error;
pub mod handlers;
pub mod store;
pub mod types;

use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::shared::state::AppState;
use crate::urls::ApiUrls;

pub use error::TasksError;
pub use handlers::*;
pub use store::{MemoryTaskStore, PgTaskStore, TaskStore};
pub use types::*;

pub fn configure_task_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            ApiUrls::TASKS,
            get(handle_task_list).post(handle_task_create),
        )
        .route(ApiUrls::TASKS_STATS, get(handle_task_stats))
        .route(ApiUrls::TASKS_COMPLETED, delete(handle_clear_completed))
        .route(
            ApiUrls::TASK_BY_ID,
            get(handle_task_get)
                .patch(handle_task_update)
                .delete(handle_task_delete),
        )
}
