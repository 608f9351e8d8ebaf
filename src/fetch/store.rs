use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{LoaderError, Result};

/// External document store, consulted by path.
///
/// Assumed to be a content-addressable file tree reachable by path; a
/// missing document is a distinct signal (`LoaderError::DocumentNotFound`)
/// so callers can log it as such, though the fetch layer treats every
/// per-document failure the same way.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<String>;

    /// Human-readable store identity for logs.
    fn describe(&self) -> String;
}

/// Filesystem-backed store over a local mirror of the rules repository.
///
/// When a branch is configured and that subtree exists, paths resolve under
/// `root/branch/`; otherwise directly under `root/`.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
    branch: Option<String>,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>, branch: Option<String>) -> Self {
        Self {
            root: root.into(),
            branch,
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        if let Some(branch) = &self.branch {
            let branched = self.root.join(branch);
            if branched.is_dir() {
                return branched.join(path);
            }
        }
        self.root.join(path)
    }

    /// Where the catalog index lives in this store.
    pub fn index_path(&self) -> PathBuf {
        self.resolve("index.json")
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn fetch(&self, path: &str) -> Result<String> {
        let resolved = self.resolve(path);
        match tokio::fs::read_to_string(&resolved).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(LoaderError::DocumentNotFound(path.to_string()))
            }
            Err(e) => Err(LoaderError::Store(format!("{}: {e}", resolved.display()))),
        }
    }

    fn describe(&self) -> String {
        match &self.branch {
            Some(branch) => format!("{}@{branch}", self.root.display()),
            None => self.root.display().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fetch_existing_document() {
        let temp = TempDir::new().unwrap();
        tokio::fs::create_dir_all(temp.path().join("base"))
            .await
            .unwrap();
        tokio::fs::write(temp.path().join("base/rule.md"), "# Rule\n")
            .await
            .unwrap();

        let store = FsDocumentStore::new(temp.path(), None);
        let content = store.fetch("base/rule.md").await.unwrap();
        assert_eq!(content, "# Rule\n");
    }

    #[tokio::test]
    async fn test_missing_document_is_not_found() {
        let temp = TempDir::new().unwrap();
        let store = FsDocumentStore::new(temp.path(), None);

        let err = store.fetch("base/missing.md").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_branch_subtree_preferred_when_present() {
        let temp = TempDir::new().unwrap();
        tokio::fs::create_dir_all(temp.path().join("main/base"))
            .await
            .unwrap();
        tokio::fs::write(temp.path().join("main/base/rule.md"), "branched")
            .await
            .unwrap();

        let store = FsDocumentStore::new(temp.path(), Some("main".into()));
        assert_eq!(store.fetch("base/rule.md").await.unwrap(), "branched");
    }

    #[tokio::test]
    async fn test_missing_branch_falls_back_to_root() {
        let temp = TempDir::new().unwrap();
        tokio::fs::write(temp.path().join("rule.md"), "root").await.unwrap();

        let store = FsDocumentStore::new(temp.path(), Some("main".into()));
        assert_eq!(store.fetch("rule.md").await.unwrap(), "root");
    }
}
