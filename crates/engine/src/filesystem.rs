use crate::config::Config;
use crate::error::{EngineError, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// List the log files under `config.log_dir`, sorted by path.
///
/// Only the top level is listed unless `config.recursive` is set. Hidden
/// files and ignore files are not special: every regular file whose name ends
/// with the configured suffix is returned. Symlinks count when they resolve to
/// a regular file; symlinked directories are never descended into.
///
/// # Errors
///
/// Fails if the directory is missing, is not a directory, or cannot be listed.
pub fn discover_log_files(config: &Config) -> Result<Vec<PathBuf>> {
    let root = &config.log_dir;
    let meta = std::fs::metadata(root).map_err(|e| EngineError::DirRead {
        path: root.clone(),
        source: e,
    })?;
    if !meta.is_dir() {
        return Err(EngineError::NotADirectory(root.clone()));
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(false);
    if !config.recursive {
        builder.max_depth(Some(1));
    }

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        if entry.depth() == 0 {
            continue;
        }
        let Some(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !config.is_log_file_name(&name) {
            continue;
        }

        let path = entry.path();
        if file_type.is_file() || (file_type.is_symlink() && resolves_to_file(path)) {
            tracing::debug!(path = %path.display(), "found log file");
            files.push(entry.into_path());
        } else {
            tracing::warn!(path = %path.display(), "skipping entry that is not a regular file");
        }
    }

    files.sort();
    Ok(files)
}

fn resolves_to_file(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|m| m.is_file())
}
