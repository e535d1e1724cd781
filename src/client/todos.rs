use tracing::warn;

use crate::models::Todo;

use super::{BackendClient, ClientError};

/// Client-side todo list state, mirroring what the page renders.
pub struct TodoList {
    todos: Vec<Todo>,
    loading: bool,
}

impl TodoList {
    pub fn new() -> Self {
        Self {
            todos: Vec::new(),
            loading: true,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Initial fetch. A failed load leaves the list empty; the caller only
    /// sees the loading flag clear.
    pub async fn load(&mut self, api: &dyn BackendClient) {
        match api.list_todos().await {
            Ok(todos) => self.todos = todos,
            Err(err) => warn!("failed to load todos: {}", err),
        }
        self.loading = false;
    }

    /// Append-on-success: nothing is added locally until the server confirms.
    pub async fn create(
        &mut self,
        api: &dyn BackendClient,
        title: &str,
    ) -> Result<(), ClientError> {
        let created = api.create_todo(title).await?;
        self.todos.insert(0, created);
        Ok(())
    }

    /// Optimistic: flip locally, then re-flip if the server rejects. The flip
    /// is its own inverse, so apply-then-reapply restores the prior state.
    pub async fn toggle(&mut self, api: &dyn BackendClient, id: &str) -> Result<(), ClientError> {
        self.flip(id);
        if let Err(err) = api.toggle_todo(id).await {
            self.flip(id);
            return Err(err);
        }
        Ok(())
    }

    /// Optimistic removal; on failure the full prior list is restored so the
    /// order survives, not just the membership.
    pub async fn delete(&mut self, api: &dyn BackendClient, id: &str) -> Result<(), ClientError> {
        let previous = self.todos.clone();
        self.todos.retain(|t| t.id != id);
        if let Err(err) = api.delete_todo(id).await {
            self.todos = previous;
            return Err(err);
        }
        Ok(())
    }

    fn flip(&mut self, id: &str) {
        if let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) {
            todo.completed = !todo.completed;
        }
    }
}

impl Default for TodoList {
    fn default() -> Self {
        Self::new()
    }
}
