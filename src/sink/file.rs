//! File-backed content sink.
//!
//! Writes go to a sibling temporary file which is then renamed over the
//! target, so a reader never opens a half-written document.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SinkError;
use crate::sink::ContentSink;

/// Sink that renders into a single file on disk.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ContentSink for FileSink {
    fn replace(&self, content: &str) -> Result<(), SinkError> {
        if self.path.file_name().is_none() {
            return Err(SinkError::Unavailable(format!(
                "`{}` is not a file path",
                self.path.display()
            )));
        }
        let staging = self.staging_path();
        fs::write(&staging, content)?;
        fs::rename(&staging, &self.path)?;
        tracing::trace!(path = %self.path.display(), bytes = content.len(), "Sink file replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_writes_file() {
        let path = std::env::temp_dir().join(format!("spa-sink-{}.html", uuid::Uuid::new_v4()));
        let sink = FileSink::new(&path);

        sink.replace("<h1>One</h1>").unwrap();
        sink.replace("<h1>Two</h1>").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<h1>Two</h1>");
        assert!(!sink.staging_path().exists());

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_missing_directory_fails() {
        let sink = FileSink::new("/definitely/not/a/dir/index.html");
        assert!(matches!(sink.replace("x"), Err(SinkError::Io(_))));
    }

    #[test]
    fn test_directory_path_is_unavailable() {
        let sink = FileSink::new("/");
        assert!(matches!(sink.replace("x"), Err(SinkError::Unavailable(_))));
    }
}
