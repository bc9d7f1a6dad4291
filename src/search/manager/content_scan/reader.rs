//! File content readers for the content scan

use std::future::Future;
use std::io;
use std::path::Path;

/// Source of file text for the content scan
///
/// Implementations must be shareable across tasks; the scanner calls
/// `read` concurrently for many paths.
pub trait ContentReader: Send + Sync + 'static {
    /// Read the whole file as text
    fn read(&self, path: &Path) -> impl Future<Output = io::Result<String>> + Send;
}

/// Reads from the local file system with `tokio::fs`
///
/// Invalid UTF-8 is replaced rather than treated as a failure, so a file
/// only fails to scan when it can't be opened or read.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl ContentReader for FsReader {
    fn read(&self, path: &Path) -> impl Future<Output = io::Result<String>> + Send {
        let path = path.to_path_buf();
        async move {
            let bytes = tokio::fs::read(&path).await?;
            Ok(match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(e) => {
                    log::debug!("Lossy UTF-8 decode for {}", path.display());
                    String::from_utf8_lossy(e.as_bytes()).into_owned()
                }
            })
        }
    }
}
