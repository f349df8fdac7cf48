use crate::modules::transcode::workspace::Workspace;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Root directory under which every request stages its temporary files.
/// The directory is shared across requests; the files inside it never are,
/// because each workspace namespaces its members by a per-request token.
#[derive(Clone)]
pub struct ScratchArea {
    root: PathBuf,
}

impl ScratchArea {
    pub async fn init(root: PathBuf) -> std::io::Result<Self> {
        fs::create_dir_all(&root).await?;
        info!("✅ Scratch area ready at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Re-create the root if something removed it while the server was
    /// running. No-op when it already exists.
    pub async fn ensure(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    pub fn workspace(&self) -> Workspace {
        Workspace::new(self.root.clone())
    }
}
