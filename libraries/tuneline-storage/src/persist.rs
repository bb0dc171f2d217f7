/// Whole-document JSON persistence
use crate::error::{Result, StorageError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Read and parse a whole document
///
/// Returns `None` when the file does not exist or holds only whitespace.
pub async fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StorageError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| StorageError::Malformed {
            path: path.to_path_buf(),
            source,
        })
}

/// Serialize `value` and atomically replace the file at `path`
///
/// The document is written and synced to `<path>.tmp` first, then renamed
/// over the target. Missing parent directories are created.
pub async fn write_document<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let contents = serde_json::to_vec_pretty(value).map_err(|source| StorageError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    let write_err = |source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let tmp_path = temp_path(path);
    {
        let mut tmp_file = tokio::fs::File::create(&tmp_path)
            .await
            .map_err(write_err)?;
        tmp_file.write_all(&contents).await.map_err(write_err)?;
        tmp_file.sync_all().await.map_err(write_err)?;
    }

    tokio::fs::rename(&tmp_path, path).await.map_err(write_err)?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
