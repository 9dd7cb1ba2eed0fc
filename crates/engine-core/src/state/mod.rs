use crate::error::StateError;
use async_trait::async_trait;
use model::pagination::cursor::CursorState;
use std::path::Path;

pub mod file_store;
pub mod paths;

/// Durable storage for one cursor document per path.
#[async_trait]
pub trait CursorStore: Send + Sync {
    /// Loads the cursor at `path`; a missing file yields the unset cursor.
    async fn load(&self, path: &Path) -> Result<CursorState, StateError>;

    /// Replaces the cursor at `path`. Readers see either the old or the new
    /// document, never a partial one.
    async fn save(&self, path: &Path, state: &CursorState) -> Result<(), StateError>;

    async fn exists(&self, path: &Path) -> Result<bool, StateError>;
}
