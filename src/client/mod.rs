//! Native port of the web client's data layer: fetch/mutate calls plus the
//! per-resource state containers with their optimistic-update rules.

pub mod diary;
pub mod todos;
pub mod vision;

pub use diary::DiaryFeed;
pub use todos::TodoList;
pub use vision::VisionBoard;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use thiserror::Error;

use crate::models::{DiaryEntry, Todo, VisionItem};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    Status(u16),
}

#[async_trait]
pub trait BackendClient: Send + Sync {
    async fn list_todos(&self) -> Result<Vec<Todo>, ClientError>;
    async fn create_todo(&self, title: &str) -> Result<Todo, ClientError>;
    async fn toggle_todo(&self, id: &str) -> Result<(), ClientError>;
    async fn delete_todo(&self, id: &str) -> Result<(), ClientError>;

    async fn list_entries(&self) -> Result<Vec<DiaryEntry>, ClientError>;
    async fn create_entry(&self, content: &str, mood: &str) -> Result<DiaryEntry, ClientError>;
    async fn update_entry(
        &self,
        id: &str,
        content: Option<&str>,
        mood: Option<&str>,
    ) -> Result<(), ClientError>;
    async fn delete_entry(&self, id: &str) -> Result<(), ClientError>;

    async fn list_vision_items(&self) -> Result<Vec<VisionItem>, ClientError>;
    async fn create_vision_item(
        &self,
        caption: &str,
        mime_type: &str,
        image: Vec<u8>,
    ) -> Result<VisionItem, ClientError>;
    async fn update_caption(&self, id: &str, caption: &str) -> Result<(), ClientError>;
    async fn delete_vision_item(&self, id: &str) -> Result<(), ClientError>;
}

pub struct HttpBackendClient {
    client: Client,
    base_url: String,
}

impl HttpBackendClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn ensure_success(res: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if res.status().is_success() {
        Ok(res)
    } else {
        Err(ClientError::Status(res.status().as_u16()))
    }
}

#[async_trait]
impl BackendClient for HttpBackendClient {
    async fn list_todos(&self) -> Result<Vec<Todo>, ClientError> {
        let res = self.client.get(self.url("/todos")).send().await?;
        Ok(ensure_success(res)?.json().await?)
    }

    async fn create_todo(&self, title: &str) -> Result<Todo, ClientError> {
        let res = self
            .client
            .post(self.url("/todos"))
            .json(&serde_json::json!({ "title": title }))
            .send()
            .await?;
        Ok(ensure_success(res)?.json().await?)
    }

    async fn toggle_todo(&self, id: &str) -> Result<(), ClientError> {
        let res = self
            .client
            .patch(self.url(&format!("/todos/{}", id)))
            .send()
            .await?;
        ensure_success(res)?;
        Ok(())
    }

    async fn delete_todo(&self, id: &str) -> Result<(), ClientError> {
        let res = self
            .client
            .delete(self.url(&format!("/todos/{}", id)))
            .send()
            .await?;
        ensure_success(res)?;
        Ok(())
    }

    async fn list_entries(&self) -> Result<Vec<DiaryEntry>, ClientError> {
        let res = self.client.get(self.url("/diary")).send().await?;
        Ok(ensure_success(res)?.json().await?)
    }

    async fn create_entry(&self, content: &str, mood: &str) -> Result<DiaryEntry, ClientError> {
        let res = self
            .client
            .post(self.url("/diary"))
            .json(&serde_json::json!({ "content": content, "mood": mood }))
            .send()
            .await?;
        Ok(ensure_success(res)?.json().await?)
    }

    async fn update_entry(
        &self,
        id: &str,
        content: Option<&str>,
        mood: Option<&str>,
    ) -> Result<(), ClientError> {
        let mut body = serde_json::Map::new();
        if let Some(content) = content {
            body.insert("content".to_string(), content.into());
        }
        if let Some(mood) = mood {
            body.insert("mood".to_string(), mood.into());
        }

        let res = self
            .client
            .patch(self.url(&format!("/diary/{}", id)))
            .json(&body)
            .send()
            .await?;
        ensure_success(res)?;
        Ok(())
    }

    async fn delete_entry(&self, id: &str) -> Result<(), ClientError> {
        let res = self
            .client
            .delete(self.url(&format!("/diary/{}", id)))
            .send()
            .await?;
        ensure_success(res)?;
        Ok(())
    }

    async fn list_vision_items(&self) -> Result<Vec<VisionItem>, ClientError> {
        let res = self.client.get(self.url("/vision-board")).send().await?;
        Ok(ensure_success(res)?.json().await?)
    }

    async fn create_vision_item(
        &self,
        caption: &str,
        mime_type: &str,
        image: Vec<u8>,
    ) -> Result<VisionItem, ClientError> {
        let part = Part::bytes(image)
            .file_name("upload")
            .mime_str(mime_type)?;
        let form = Form::new()
            .text("caption", caption.to_string())
            .part("image", part);

        let res = self
            .client
            .post(self.url("/vision-board"))
            .multipart(form)
            .send()
            .await?;
        Ok(ensure_success(res)?.json().await?)
    }

    async fn update_caption(&self, id: &str, caption: &str) -> Result<(), ClientError> {
        let res = self
            .client
            .patch(self.url(&format!("/vision-board/{}", id)))
            .json(&serde_json::json!({ "caption": caption }))
            .send()
            .await?;
        ensure_success(res)?;
        Ok(())
    }

    async fn delete_vision_item(&self, id: &str) -> Result<(), ClientError> {
        let res = self
            .client
            .delete(self.url(&format!("/vision-board/{}", id)))
            .send()
            .await?;
        ensure_success(res)?;
        Ok(())
    }
}
