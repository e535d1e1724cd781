use tracing::warn;

use crate::models::DiaryEntry;

use super::{BackendClient, ClientError};

/// Client-side diary state: newest entry first, same as the page.
pub struct DiaryFeed {
    entries: Vec<DiaryEntry>,
    loading: bool,
}

impl DiaryFeed {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            loading: true,
        }
    }

    pub fn entries(&self) -> &[DiaryEntry] {
        &self.entries
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub async fn load(&mut self, api: &dyn BackendClient) {
        match api.list_entries().await {
            Ok(entries) => self.entries = entries,
            Err(err) => warn!("failed to load diary entries: {}", err),
        }
        self.loading = false;
    }

    /// Append-on-success: the entry only appears once the server has it.
    pub async fn create(
        &mut self,
        api: &dyn BackendClient,
        content: &str,
        mood: &str,
    ) -> Result<(), ClientError> {
        let created = api.create_entry(content, mood).await?;
        self.entries.insert(0, created);
        Ok(())
    }

    /// Optimistic edit: the prior entry is snapshotted and put back verbatim
    /// if the server rejects the change.
    pub async fn update(
        &mut self,
        api: &dyn BackendClient,
        id: &str,
        content: Option<&str>,
        mood: Option<&str>,
    ) -> Result<(), ClientError> {
        let snapshot = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .map(|pos| (pos, self.entries[pos].clone()));

        if let Some((pos, _)) = &snapshot {
            let entry = &mut self.entries[*pos];
            if let Some(content) = content {
                entry.content = content.trim().to_string();
            }
            if let Some(mood) = mood {
                entry.mood = mood.to_string();
            }
        }

        if let Err(err) = api.update_entry(id, content, mood).await {
            if let Some((pos, prior)) = snapshot {
                self.entries[pos] = prior;
            }
            return Err(err);
        }
        Ok(())
    }

    pub async fn delete(&mut self, api: &dyn BackendClient, id: &str) -> Result<(), ClientError> {
        let previous = self.entries.clone();
        self.entries.retain(|e| e.id != id);
        if let Err(err) = api.delete_entry(id).await {
            self.entries = previous;
            return Err(err);
        }
        Ok(())
    }
}

impl Default for DiaryFeed {
    fn default() -> Self {
        Self::new()
    }
}
