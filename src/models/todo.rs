use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTodoRequest {
    #[serde(default)]
    pub title: String,
}

/// A create request that passed validation.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: String,
}

impl NewTodoRequest {
    pub fn validate(self) -> Result<NewTodo, AppError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Title is required".to_string()));
        }
        Ok(NewTodo {
            title: title.to_string(),
        })
    }
}
