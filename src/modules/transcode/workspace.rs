use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;
use uuid::Uuid;

/// The set of file paths one request stages on disk.
///
/// Every path handed out is recorded, so [`Workspace::cleanup`] can delete
/// the whole set no matter how far the request got. The token namespaces all
/// members, which keeps concurrent requests collision-free even when they
/// upload identically-named files in the same instant.
pub struct Workspace {
    root: PathBuf,
    token: String,
    members: Vec<PathBuf>,
}

impl Workspace {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            token: Uuid::new_v4().simple().to_string(),
            members: Vec::new(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Staging path for the primary clip, keeping the uploaded extension.
    pub fn input_path(&mut self, declared_name: &str) -> PathBuf {
        let name = format!("input_{}.{}", self.token, file_extension(declared_name));
        self.register(name)
    }

    pub fn outro_path(&mut self, declared_name: &str) -> PathBuf {
        let name = format!("outro_{}.{}", self.token, file_extension(declared_name));
        self.register(name)
    }

    /// Intermediate produced by one normalize pass of the two-pass concat.
    pub fn normalized_path(&mut self, label: &str) -> PathBuf {
        let name = format!("{}_norm_{}.mp4", label, self.token);
        self.register(name)
    }

    pub fn manifest_path(&mut self) -> PathBuf {
        let name = format!("concat_{}.txt", self.token);
        self.register(name)
    }

    pub fn output_path(&mut self) -> PathBuf {
        let name = format!("output_{}.mp4", self.token);
        self.register(name)
    }

    /// Best-effort deletion of every member, the output file included: its
    /// bytes are returned from memory, not served from disk. Runs after the
    /// response is already determined, so failures are logged and never
    /// escalated. Paths that were registered but never materialized are
    /// expected and skipped silently.
    pub async fn cleanup(&self) {
        for path in &self.members {
            if let Err(e) = fs::remove_file(path).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to remove temp file {}: {}", path.display(), e);
                }
            }
        }
    }

    fn register(&mut self, file_name: String) -> PathBuf {
        let path = self.root.join(file_name);
        self.members.push(path.clone());
        path
    }
}

/// Extension taken from the uploaded name, restricted to short alphanumerics
/// so generated paths cannot traverse out of the scratch root and stay safe
/// inside concat-manifest quoting. Anything else becomes `mp4`.
fn file_extension(declared_name: &str) -> String {
    Path::new(declared_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| "mp4".to_string())
}
