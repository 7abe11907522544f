use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("metadata extraction failed: {0}")]
    Extraction(#[source] anyhow::Error),

    #[error("record is missing tag {tag}")]
    MissingTag { tag: &'static str },

    #[error("malformed GPS timestamp {value:?} in {filepath}")]
    Timestamp { filepath: String, value: String },
}
