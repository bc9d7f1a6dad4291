use crate::error::AuditError;
use crate::search::manager::config::PATH_VALIDATION_TIMEOUT_MS;
use log::warn;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::time::{Duration, timeout};

/// Expand home directory (~) in file paths
fn expand_home(filepath: &str) -> String {
    if (filepath.starts_with("~/") || filepath == "~")
        && let Some(home_dir) = dirs::home_dir()
    {
        if filepath == "~" {
            return home_dir.to_string_lossy().to_string();
        }
        return home_dir.join(&filepath[2..]).to_string_lossy().to_string();
    }
    filepath.to_string()
}

/// Validates the root directory a search is anchored at
///
/// Expands `~`, resolves relative paths against the current directory and
/// resolves symlinks. The result is an absolute path to an existing directory.
///
/// # Errors
/// Returns error if the root doesn't exist, isn't a directory, can't be
/// inspected, or validation times out
pub async fn validate_root(requested_path: &str) -> Result<PathBuf, AuditError> {
    let validation_operation = async {
        let expanded_path = expand_home(requested_path);

        // Convert to absolute path
        let absolute = if Path::new(&expanded_path).is_absolute() {
            PathBuf::from(&expanded_path)
        } else {
            std::env::current_dir()
                .map_err(AuditError::Io)?
                .join(&expanded_path)
        };

        let metadata = match fs::metadata(&absolute).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Root directory not found: {requested_path}");
                return Err(AuditError::RootNotFound(absolute));
            }
            Err(e) => return Err(e.into()),
        };

        if !metadata.is_dir() {
            return Err(AuditError::NotADirectory(absolute));
        }

        // Resolve symlinks, fall back to the absolute path
        Ok::<_, AuditError>(fs::canonicalize(&absolute).await.unwrap_or(absolute))
    };

    if let Ok(result) = timeout(
        Duration::from_millis(PATH_VALIDATION_TIMEOUT_MS),
        validation_operation,
    )
    .await
    {
        result
    } else {
        warn!("Path validation timeout for: {requested_path}");
        Err(AuditError::Timeout(
            PATH_VALIDATION_TIMEOUT_MS,
            requested_path.to_string(),
        ))
    }
}
