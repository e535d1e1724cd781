use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

use super::DEFAULT_MOOD;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    pub id: String,
    pub content: String,
    pub mood: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDiaryEntryRequest {
    #[serde(default)]
    pub content: String,
    pub mood: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewDiaryEntry {
    pub content: String,
    pub mood: String,
}

impl NewDiaryEntryRequest {
    pub fn validate(self) -> Result<NewDiaryEntry, AppError> {
        let content = self.content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("Content is required".to_string()));
        }
        // An empty mood token falls back to the default, same as a missing one.
        let mood = self
            .mood
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MOOD.to_string());
        Ok(NewDiaryEntry {
            content: content.to_string(),
            mood,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDiaryEntryRequest {
    pub content: Option<String>,
    pub mood: Option<String>,
}
