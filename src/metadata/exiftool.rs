use std::{path::PathBuf, process::Command};

use anyhow::{Context, anyhow};

use crate::{
    config,
    metadata::{
        error::MetadataError,
        raw::{GPS_TAGS, RawMetadata},
    },
};

/// Source of raw tag dictionaries for a chunk of picture files.
///
/// One call covers one partition of paths; a failed call fails the
/// whole partition.
pub trait TagSource {
    fn read_tags(&mut self, paths: &[PathBuf]) -> Result<Vec<RawMetadata>, MetadataError>;
}

/// Client handle for the external exiftool process.
///
/// The handle is opened once around the whole batch sequence and
/// invokes the tool once per partition, not per file.
pub struct ExifTool {
    command: String,
}

impl ExifTool {
    pub fn new(config: &config::Extractor) -> Self {
        Self {
            command: config.command.clone(),
        }
    }
}

impl TagSource for ExifTool {
    fn read_tags(&mut self, paths: &[PathBuf]) -> Result<Vec<RawMetadata>, MetadataError> {
        let output = Command::new(&self.command)
            // JSON output, one object per file, group-prefixed tag names,
            // numeric coordinate values
            .args(["-j", "-G", "-n"])
            .args(GPS_TAGS.iter().map(|tag| format!("-{tag}")))
            .args(paths)
            .output()
            .with_context(|| format!("failed to run {:?}", self.command))
            .map_err(MetadataError::Extraction)?;

        // exiftool exits non-zero when some files could not be read but
        // still reports the rest on stdout
        if !output.status.success() && output.stdout.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MetadataError::Extraction(anyhow!(
                "{:?} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        serde_json::from_slice(&output.stdout)
            .with_context(|| format!("unexpected output from {:?}", self.command))
            .map_err(MetadataError::Extraction)
    }
}
