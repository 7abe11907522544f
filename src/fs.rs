//! Picture file discovery under a directory tree.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

const PICTURE_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

pub fn is_picture_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| PICTURE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Looks for picture files in a tree and returns their absolute paths.
pub struct TreeExplorer {
    directory: PathBuf,
}

impl TreeExplorer {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        let directory = std::path::absolute(&directory)
            .unwrap_or_else(|_| directory.as_ref().to_path_buf());
        Self { directory }
    }

    /// Paths of the picture files found under the directory.
    pub fn paths(&self) -> Vec<PathBuf> {
        let paths = self.explore();
        info!(
            "{} picture files found under {}",
            paths.len(),
            self.directory.display()
        );
        paths
    }

    fn explore(&self) -> Vec<PathBuf> {
        debug!("exploring {}...", self.directory.display());

        WalkDir::new(&self.directory)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                // skip broken symlinks and unreadable entries
                Err(err) => {
                    warn!("unable to access entry: {err}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| is_picture_file(path))
            .collect()
    }
}
