use crate::{error::StateError, state::CursorStore};
use async_trait::async_trait;
use model::pagination::cursor::CursorState;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;

/// Stores each cursor as a small pretty-printed JSON document.
///
/// Saves go through a sibling temporary file that is synced and then renamed
/// over the target. On Unix the parent directory is synced after the rename so
/// the new entry survives a power loss.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileStore;

impl JsonFileStore {
    pub fn new() -> Self {
        JsonFileStore
    }

    /// `dir/.name.tmp` for a target of `dir/name`.
    fn temp_path(path: &Path) -> PathBuf {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "cursor".to_string());
        path.with_file_name(format!(".{name}.tmp"))
    }

    async fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let tmp = Self::temp_path(path);

        let result: std::io::Result<()> = async {
            let mut file = fs::File::create(&tmp).await?;
            file.write_all(bytes).await?;
            file.sync_all().await?;
            drop(file);
            fs::rename(&tmp, path).await?;
            Self::sync_parent(path).await
        }
        .await;

        if result.is_err() {
            let _ = fs::remove_file(&tmp).await;
        }
        result
    }

    #[cfg(unix)]
    async fn sync_parent(path: &Path) -> std::io::Result<()> {
        match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(dir) => fs::File::open(dir).await?.sync_all().await,
            None => Ok(()),
        }
    }

    #[cfg(not(unix))]
    async fn sync_parent(_path: &Path) -> std::io::Result<()> {
        Ok(())
    }
}

#[async_trait]
impl CursorStore for JsonFileStore {
    async fn load(&self, path: &Path) -> Result<CursorState, StateError> {
        match fs::read(path).await {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|source| StateError::Malformed {
                    path: path.to_path_buf(),
                    source,
                })
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No state file, starting from the first row");
                Ok(CursorState::default())
            }
            Err(source) => Err(StateError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    async fn save(&self, path: &Path, state: &CursorState) -> Result<(), StateError> {
        let mut bytes = serde_json::to_vec_pretty(state).map_err(StateError::Serialize)?;
        bytes.push(b'\n');

        Self::write_atomic(path, &bytes)
            .await
            .map_err(|source| StateError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(path = %path.display(), last_id = state.last_id, "Saved cursor");
        Ok(())
    }

    async fn exists(&self, path: &Path) -> Result<bool, StateError> {
        fs::try_exists(path).await.map_err(|source| StateError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
