use std::path::{Path, PathBuf};

use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub async fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

/// Writes through a synced sibling temp file and a rename, so readers only
/// ever see the previous or the new content, and the new content survives a
/// power loss once this returns.
pub async fn write_atomically(path: &Path, content: &[u8]) -> Result<()> {
    ensure_parent_dir(path).await?;
    let tmp_path = temp_path_for(path);
    if let Err(err) = write_synced(&tmp_path, content).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(err);
    }
    if let Err(err) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(err.into());
    }
    sync_parent_dir(path).await
}

async fn write_synced(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(content).await?;
    file.sync_all().await?;
    Ok(())
}

/// Makes a rename or a newly created file durable.
#[cfg(unix)]
pub async fn sync_parent_dir(path: &Path) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::File::open(parent).await?.sync_all().await?;
    Ok(())
}

#[cfg(not(unix))]
pub async fn sync_parent_dir(_path: &Path) -> Result<()> {
    Ok(())
}

/// `store.json` + `.journal` gives `store.json.journal` in the same directory.
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

fn temp_path_for(path: &Path) -> PathBuf {
    sibling_path(path, ".tmp")
}
