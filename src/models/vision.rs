use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VisionItem {
    pub id: String,
    pub caption: String,
    pub mime_type: String,
    pub image_base64: String,
    pub created_at: String,
}

/// A validated vision-board upload: bytes already read, capped, and encoded.
#[derive(Debug, Clone)]
pub struct NewVisionItem {
    pub caption: String,
    pub mime_type: String,
    pub image_base64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateVisionItemRequest {
    pub caption: Option<String>,
}
