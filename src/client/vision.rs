use tracing::warn;

use crate::models::VisionItem;

use super::{BackendClient, ClientError};

/// Client-side vision-board state.
pub struct VisionBoard {
    items: Vec<VisionItem>,
    loading: bool,
}

impl VisionBoard {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
        }
    }

    pub fn items(&self) -> &[VisionItem] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub async fn load(&mut self, api: &dyn BackendClient) {
        match api.list_vision_items().await {
            Ok(items) => self.items = items,
            Err(err) => warn!("failed to load vision board: {}", err),
        }
        self.loading = false;
    }

    /// Append-on-success: the upload has to land before the board shows it.
    pub async fn create(
        &mut self,
        api: &dyn BackendClient,
        caption: &str,
        mime_type: &str,
        image: Vec<u8>,
    ) -> Result<(), ClientError> {
        let created = api.create_vision_item(caption, mime_type, image).await?;
        self.items.insert(0, created);
        Ok(())
    }

    /// Optimistic caption edit with snapshot restore on failure.
    pub async fn update_caption(
        &mut self,
        api: &dyn BackendClient,
        id: &str,
        caption: &str,
    ) -> Result<(), ClientError> {
        let snapshot = self
            .items
            .iter()
            .position(|i| i.id == id)
            .map(|pos| (pos, self.items[pos].caption.clone()));

        if let Some((pos, _)) = &snapshot {
            self.items[*pos].caption = caption.trim().to_string();
        }

        if let Err(err) = api.update_caption(id, caption).await {
            if let Some((pos, prior)) = snapshot {
                self.items[pos].caption = prior;
            }
            return Err(err);
        }
        Ok(())
    }

    pub async fn delete(&mut self, api: &dyn BackendClient, id: &str) -> Result<(), ClientError> {
        let previous = self.items.clone();
        self.items.retain(|i| i.id != id);
        if let Err(err) = api.delete_vision_item(id).await {
            self.items = previous;
            return Err(err);
        }
        Ok(())
    }
}

impl Default for VisionBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{FakeBackend, item};
    use super::*;

    fn loaded(items: Vec<VisionItem>) -> VisionBoard {
        VisionBoard {
            items,
            loading: false,
        }
    }

    #[tokio::test]
    async fn test_create_prepends_on_success() {
        let api = FakeBackend::default();
        let mut board = loaded(vec![item("a", "old dream")]);

        board
            .create(&api, "new dream", "image/png", b"bytes".to_vec())
            .await
            .unwrap();

        assert_eq!(board.items().len(), 2);
        assert_eq!(board.items()[0].caption, "new dream");
    }

    #[tokio::test]
    async fn test_failed_create_changes_nothing() {
        let api = FakeBackend {
            fail_mutations: true,
            ..Default::default()
        };
        let mut board = loaded(vec![item("a", "old dream")]);

        assert!(
            board
                .create(&api, "new dream", "image/png", b"bytes".to_vec())
                .await
                .is_err()
        );
        assert_eq!(board.items().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_caption_edit_restores_prior_caption() {
        let api = FakeBackend {
            fail_mutations: true,
            ..Default::default()
        };
        let mut board = loaded(vec![item("a", "sunset goals")]);

        assert!(board.update_caption(&api, "a", "city lights").await.is_err());
        assert_eq!(board.items()[0].caption, "sunset goals");
    }

    #[tokio::test]
    async fn test_failed_delete_restores_exact_order() {
        let api = FakeBackend {
            fail_mutations: true,
            ..Default::default()
        };
        let mut board = loaded(vec![item("a", "one"), item("b", "two"), item("c", "three")]);

        assert!(board.delete(&api, "b").await.is_err());

        let ids: Vec<&str> = board.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
