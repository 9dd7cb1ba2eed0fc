use crate::error::StateError;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Maps a state-file identity onto a concrete path.
pub trait StatePathResolver: Send + Sync {
    fn resolve(&self, identity: &str) -> Result<PathBuf, StateError>;
}

/// Resolves identities as plain file names inside one data directory.
#[derive(Debug, Clone)]
pub struct DataDirResolver {
    data_dir: PathBuf,
}

impl DataDirResolver {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Creates the data directory (mode 0750 on Unix) if it does not exist.
    pub async fn prepare(&self) -> Result<(), StateError> {
        info!(path = %self.data_dir.display(), "Creating state file directory");

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(0o750);

        builder
            .create(&self.data_dir)
            .await
            .map_err(|source| StateError::Io {
                path: self.data_dir.clone(),
                source,
            })
    }
}

impl StatePathResolver for DataDirResolver {
    fn resolve(&self, identity: &str) -> Result<PathBuf, StateError> {
        let mut components = Path::new(identity).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(self.data_dir.join(name)),
            _ => Err(StateError::InvalidIdentity(identity.to_string())),
        }
    }
}
