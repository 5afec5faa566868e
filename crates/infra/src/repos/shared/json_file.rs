use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tracing::{error, warn};

/// Useful functions for repositories that keep a whole collection in one JSON document

/// Reads the document at `path`. A missing or unreadable document is reported
/// as `None` so that callers can treat it as an empty collection.
pub async fn load_document<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            error!("Unable to read document {}. Err: {:?}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_slice(&raw) {
        Ok(document) => Some(document),
        Err(e) => {
            warn!("Document {} is malformed, ignoring it. Err: {:?}", path.display(), e);
            None
        }
    }
}

/// Replaces the document at `path`. The content is written to a sibling
/// temporary file first and then renamed over the old document.
pub async fn save_document<T: Serialize>(path: &Path, document: &T) -> anyhow::Result<()> {
    let raw = serde_json::to_vec_pretty(document)?;
    let tmp_path = temporary_path(path);
    tokio::fs::write(&tmp_path, raw).await?;
    tokio::fs::rename(&tmp_path, path).await?;
    Ok(())
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    file_name.push(".tmp");
    path.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_document_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let res: Option<Vec<String>> = load_document(&dir.path().join("missing.json")).await;
        assert!(res.is_none());
    }

    #[tokio::test]
    async fn malformed_document_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        tokio::fs::write(&path, b"[{\"oops\"").await.unwrap();
        let res: Option<Vec<String>> = load_document(&path).await;
        assert!(res.is_none());
    }

    #[tokio::test]
    async fn saves_and_loads_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.json");
        let ids = vec!["a".to_string(), "b".to_string()];
        save_document(&path, &ids).await.unwrap();
        let res: Option<Vec<String>> = load_document(&path).await;
        assert_eq!(res, Some(ids));
        assert!(!temporary_path(&path).exists());
    }

    #[tokio::test]
    async fn save_fails_when_directory_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("ids.json");
        assert!(save_document(&path, &vec!["a"]).await.is_err());
    }
}
