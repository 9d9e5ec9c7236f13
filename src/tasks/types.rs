use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::models::schema::tasks;

use super::error::TasksError;

// Database model - matches schema exactly
#[derive(Debug, Clone, Queryable, Insertable, Serialize, Deserialize)]
#[diesel(table_name = tasks)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl CreateTaskRequest {
    pub fn validate(&self) -> Result<(), TasksError> {
        if self.title.trim().is_empty() {
            return Err(TasksError::Validation("title is required".to_string()));
        }
        Ok(())
    }

    /// Assigns the identifier and timestamps owned by the store.
    pub fn into_task(self) -> Task {
        let now = Utc::now();
        Task {
            id: Uuid::new_v4(),
            title: self.title,
            description: self.description,
            completed: self.completed,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl UpdateTaskRequest {
    pub fn validate(&self) -> Result<(), TasksError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(TasksError::Validation(
                    "title must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn changeset(&self, updated_at: DateTime<Utc>) -> TaskChangeset {
        TaskChangeset {
            title: self.title.clone(),
            description: self.description.clone(),
            completed: self.completed,
            updated_at,
        }
    }

    /// Partial merge: only supplied fields change.
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = Some(description.clone());
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        task.updated_at = Utc::now();
    }
}

// None fields are skipped by AsChangeset, so unspecified columns keep
// their prior values.
#[derive(AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}
