//! Best-effort persistence of the latest reading to a JSON file.

use crate::reading::data::PersistedReading;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Overwrites a single JSON file with the latest reading.
#[derive(Debug, Clone)]
pub struct FilePersister {
    path: Arc<PathBuf>,
}

impl FilePersister {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Start writing `{"tempF":"<value>"}` to the file.
    ///
    /// The write runs on its own task with its own buffer; callers may drop
    /// the handle. Failures are logged and otherwise ignored.
    pub fn persist(&self, temperature_f: f64) -> JoinHandle<()> {
        let path = Arc::clone(&self.path);
        let payload = PersistedReading::new(temperature_f).to_json();

        tokio::spawn(async move {
            let payload = match payload {
                Ok(payload) => payload,
                Err(e) => {
                    warn!("Failed to encode reading for {}: {}", path.display(), e);
                    return;
                }
            };
            match tokio::fs::write(path.as_path(), payload).await {
                Ok(()) => debug!("Wrote {}", path.display()),
                Err(e) => warn!("Failed to write {}: {}", path.display(), e),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "temperature_pi_persist_{}_{}",
            std::process::id(),
            name
        ))
    }

    #[test]
    fn test_path_is_the_configured_file() {
        let persister = FilePersister::new("data/temperature.json");
        assert_eq!(persister.path(), Path::new("data/temperature.json"));
        assert_eq!(persister.clone().path(), persister.path());
    }

    #[tokio::test]
    async fn test_persist_overwrites_file() {
        let path = temp_path("overwrite.json");
        let persister = FilePersister::new(&path);

        persister.persist(71.2).await.unwrap();
        persister.persist(72.3).await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content, r#"{"tempF":"72.3"}"#);
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_persist_failure_is_swallowed() {
        let path = temp_path("missing-dir").join("temperature.json");
        let persister = FilePersister::new(&path);

        assert!(persister.persist(50.0).await.is_ok());
        assert!(!path.exists());
    }
}
