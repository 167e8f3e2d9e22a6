/// Where the knowledge document comes from.
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The standard knowledge document, compiled into the crate.
pub const STANDARD_DOCUMENT: &str = include_str!("../../data/knowledge_base.txt");

#[derive(Debug, Error)]
pub enum DocumentReadError {
    #[error("knowledge document not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read access to the full text of a knowledge document.
pub trait DocumentSource {
    fn read(&self) -> Result<String, DocumentReadError>;

    /// Short human-readable name for log lines.
    fn describe(&self) -> String;
}

/// The standard document embedded at compile time.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl DocumentSource for EmbeddedSource {
    fn read(&self) -> Result<String, DocumentReadError> {
        Ok(STANDARD_DOCUMENT.to_string())
    }

    fn describe(&self) -> String {
        "embedded standard document".to_string()
    }
}

/// A document on the filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DocumentSource for FileSource {
    fn read(&self) -> Result<String, DocumentReadError> {
        std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DocumentReadError::NotFound(self.path.clone()),
            _ => DocumentReadError::Io {
                path: self.path.clone(),
                source: e,
            },
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A document already held in memory.
#[derive(Debug, Clone)]
pub struct TextSource(pub String);

impl DocumentSource for TextSource {
    fn read(&self) -> Result<String, DocumentReadError> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory document ({} bytes)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_source_is_not_empty() {
        let text = EmbeddedSource.read().unwrap();
        assert!(text.contains("FOOD BY CITY"));
    }

    #[test]
    fn missing_file_reports_not_found() {
        let source = FileSource::new("does/not/exist.txt");
        assert!(matches!(source.read(), Err(DocumentReadError::NotFound(_))));
    }

    #[test]
    fn text_source_returns_its_text() {
        let source = TextSource("hello".to_string());
        assert_eq!(source.read().unwrap(), "hello");
    }
}
