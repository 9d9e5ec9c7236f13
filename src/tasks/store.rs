use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::shared::utils::DbPool;

use super::error::TasksError;
use super::types::{CreateTaskRequest, Task, TaskStats, UpdateTaskRequest};

/// Persistence abstraction over Task records. The store is the sole owner
/// of the Task lifecycle: it assigns identifiers on create, mutates rows
/// only through update and destroys them only through delete.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Task>, TasksError>;
    async fn create(&self, request: CreateTaskRequest) -> Result<Task, TasksError>;
    async fn get(&self, task_id: Uuid) -> Result<Task, TasksError>;
    async fn update(&self, task_id: Uuid, request: UpdateTaskRequest)
        -> Result<Task, TasksError>;
    async fn delete(&self, task_id: Uuid) -> Result<(), TasksError>;
    async fn clear_completed(&self) -> Result<usize, TasksError>;
    async fn stats(&self) -> Result<TaskStats, TasksError>;
    async fn ping(&self) -> Result<(), TasksError>;
}

/// Diesel-backed store. Queries are blocking and run on the blocking pool
/// with a connection checked out per operation.
pub struct PgTaskStore {
    pool: DbPool,
}

impl PgTaskStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn list(&self) -> Result<Vec<Task>, TasksError> {
        let pool = self.pool.clone();

        let result = tokio::task::spawn_blocking(move || {
            use crate::shared::models::schema::tasks::dsl::*;
            let mut conn = pool
                .get()
                .map_err(|e| TasksError::Database(e.to_string()))?;

            tasks
                .order(created_at.asc())
                .load::<Task>(&mut conn)
                .map_err(|e| TasksError::Database(e.to_string()))
        })
        .await
        .map_err(|e| TasksError::Internal(e.to_string()))??;

        Ok(result)
    }

    async fn create(&self, request: CreateTaskRequest) -> Result<Task, TasksError> {
        request.validate()?;
        let pool = self.pool.clone();

        let result = tokio::task::spawn_blocking(move || {
            use crate::shared::models::schema::tasks::dsl::*;
            let mut conn = pool
                .get()
                .map_err(|e| TasksError::Database(e.to_string()))?;

            let task = request.into_task();
            diesel::insert_into(tasks)
                .values(&task)
                .get_result::<Task>(&mut conn)
                .map_err(|e| TasksError::Database(e.to_string()))
        })
        .await
        .map_err(|e| TasksError::Internal(e.to_string()))??;

        Ok(result)
    }

    async fn get(&self, task_id: Uuid) -> Result<Task, TasksError> {
        let pool = self.pool.clone();

        let result = tokio::task::spawn_blocking(move || {
            use crate::shared::models::schema::tasks::dsl::*;
            let mut conn = pool
                .get()
                .map_err(|e| TasksError::Database(e.to_string()))?;

            tasks
                .find(task_id)
                .first::<Task>(&mut conn)
                .optional()
                .map_err(|e| TasksError::Database(e.to_string()))?
                .ok_or_else(|| TasksError::NotFound(format!("task {task_id} not found")))
        })
        .await
        .map_err(|e| TasksError::Internal(e.to_string()))??;

        Ok(result)
    }

    async fn update(
        &self,
        task_id: Uuid,
        request: UpdateTaskRequest,
    ) -> Result<Task, TasksError> {
        request.validate()?;
        let changeset = request.changeset(Utc::now());
        let pool = self.pool.clone();

        let result = tokio::task::spawn_blocking(move || {
            use crate::shared::models::schema::tasks::dsl::*;
            let mut conn = pool
                .get()
                .map_err(|e| TasksError::Database(e.to_string()))?;

            diesel::update(tasks.find(task_id))
                .set(&changeset)
                .get_result::<Task>(&mut conn)
                .optional()
                .map_err(|e| TasksError::Database(e.to_string()))?
                .ok_or_else(|| TasksError::NotFound(format!("task {task_id} not found")))
        })
        .await
        .map_err(|e| TasksError::Internal(e.to_string()))??;

        Ok(result)
    }

    async fn delete(&self, task_id: Uuid) -> Result<(), TasksError> {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            use crate::shared::models::schema::tasks::dsl::*;
            let mut conn = pool
                .get()
                .map_err(|e| TasksError::Database(e.to_string()))?;

            let deleted = diesel::delete(tasks.find(task_id))
                .execute(&mut conn)
                .map_err(|e| TasksError::Database(e.to_string()))?;

            if deleted == 0 {
                return Err(TasksError::NotFound(format!("task {task_id} not found")));
            }
            Ok(())
        })
        .await
        .map_err(|e| TasksError::Internal(e.to_string()))??;

        Ok(())
    }

    async fn clear_completed(&self) -> Result<usize, TasksError> {
        let pool = self.pool.clone();

        let result = tokio::task::spawn_blocking(move || {
            use crate::shared::models::schema::tasks::dsl::*;
            let mut conn = pool
                .get()
                .map_err(|e| TasksError::Database(e.to_string()))?;

            diesel::delete(tasks.filter(completed.eq(true)))
                .execute(&mut conn)
                .map_err(|e| TasksError::Database(e.to_string()))
        })
        .await
        .map_err(|e| TasksError::Internal(e.to_string()))??;

        Ok(result)
    }

    async fn stats(&self) -> Result<TaskStats, TasksError> {
        let pool = self.pool.clone();

        let result = tokio::task::spawn_blocking(move || {
            use crate::shared::models::schema::tasks::dsl::*;
            let mut conn = pool
                .get()
                .map_err(|e| TasksError::Database(e.to_string()))?;

            let total: i64 = tasks
                .count()
                .get_result(&mut conn)
                .map_err(|e| TasksError::Database(e.to_string()))?;
            let active: i64 = tasks
                .filter(completed.eq(false))
                .count()
                .get_result(&mut conn)
                .map_err(|e| TasksError::Database(e.to_string()))?;
            let done: i64 = tasks
                .filter(completed.eq(true))
                .count()
                .get_result(&mut conn)
                .map_err(|e| TasksError::Database(e.to_string()))?;

            Ok::<TaskStats, TasksError>(TaskStats {
                total: total as usize,
                active: active as usize,
                completed: done as usize,
            })
        })
        .await
        .map_err(|e| TasksError::Internal(e.to_string()))??;

        Ok(result)
    }

    async fn ping(&self) -> Result<(), TasksError> {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            pool.get()
                .map(|_| ())
                .map_err(|e| TasksError::Database(e.to_string()))
        })
        .await
        .map_err(|e| TasksError::Internal(e.to_string()))?
    }
}

/// In-memory store with the same contract, for tests and for running
/// without a relational backend.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn list(&self) -> Result<Vec<Task>, TasksError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.clone())
    }

    async fn create(&self, request: CreateTaskRequest) -> Result<Task, TasksError> {
        request.validate()?;
        let task = request.into_task();

        let mut tasks = self.tasks.write().await;
        tasks.push(task.clone());
        Ok(task)
    }

    async fn get(&self, task_id: Uuid) -> Result<Task, TasksError> {
        let tasks = self.tasks.read().await;
        tasks
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
            .ok_or_else(|| TasksError::NotFound(format!("task {task_id} not found")))
    }

    async fn update(
        &self,
        task_id: Uuid,
        request: UpdateTaskRequest,
    ) -> Result<Task, TasksError> {
        request.validate()?;

        let mut tasks = self.tasks.write().await;
        if let Some(task) = tasks.iter_mut().find(|t| t.id == task_id) {
            request.apply(task);
            return Ok(task.clone());
        }
        Err(TasksError::NotFound(format!("task {task_id} not found")))
    }

    async fn delete(&self, task_id: Uuid) -> Result<(), TasksError> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != task_id);
        if tasks.len() == before {
            return Err(TasksError::NotFound(format!("task {task_id} not found")));
        }
        Ok(())
    }

    async fn clear_completed(&self) -> Result<usize, TasksError> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| !t.completed);
        Ok(before - tasks.len())
    }

    async fn stats(&self) -> Result<TaskStats, TasksError> {
        let tasks = self.tasks.read().await;
        let done = tasks.iter().filter(|t| t.completed).count();
        Ok(TaskStats {
            total: tasks.len(),
            active: tasks.len() - done,
            completed: done,
        })
    }

    async fn ping(&self) -> Result<(), TasksError> {
        Ok(())
    }
}
