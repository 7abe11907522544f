use std::path::PathBuf;

use log::{debug, info};

use crate::metadata::{
    error::MetadataError, exiftool::TagSource, raw::TaggedRecord, validate::validate,
};

/// Upper bound on the number of paths handed to the extractor per call.
pub const PATHS_PARTITION_SIZE: usize = 1000;

/// Finite, non-restartable producer of per-partition metadata batches.
///
/// Paths are split into partitions of [`PATHS_PARTITION_SIZE`] (the
/// last one may be smaller) and the extractor is invoked once per
/// partition, in order. Each yielded record carries its validation
/// result so callers can persist a batch before the next partition is
/// extracted. A failed partition ends the sequence; batches already
/// yielded stay valid.
pub struct MetadataBatches<'a, S: TagSource> {
    source: &'a mut S,
    paths: Vec<PathBuf>,
    next: usize,
    partition: usize,
}

pub fn extract_batches<S: TagSource>(
    source: &mut S,
    paths: Vec<PathBuf>,
) -> MetadataBatches<'_, S> {
    let partitions = paths.len().div_ceil(PATHS_PARTITION_SIZE);
    if partitions > 1 {
        info!(
            "extracting GPS metadata for {} files in {partitions} partitions",
            paths.len()
        );
    }
    MetadataBatches {
        source,
        paths,
        next: 0,
        partition: 0,
    }
}

impl<S: TagSource> Iterator for MetadataBatches<'_, S> {
    type Item = Result<Vec<TaggedRecord>, MetadataError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.paths.len() {
            return None;
        }
        let end = (self.next + PATHS_PARTITION_SIZE).min(self.paths.len());
        let chunk = &self.paths[self.next..end];
        self.next = end;
        self.partition += 1;

        let records = match self.source.read_tags(chunk) {
            Ok(records) => records,
            Err(e) => {
                self.next = self.paths.len();
                return Some(Err(e));
            }
        };

        let batch: Vec<TaggedRecord> = records
            .into_iter()
            .map(|raw| {
                let valid = validate(&raw);
                TaggedRecord { raw, valid }
            })
            .collect();

        debug!(
            "partition {}: {} of {} records carry GPS metadata",
            self.partition,
            batch.iter().filter(|record| record.valid).count(),
            batch.len()
        );

        Some(Ok(batch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::raw::{
        RawMetadata, TAG_LATITUDE, TAG_LATITUDE_REF, TAG_LONGITUDE, TAG_LONGITUDE_REF,
        TAG_SOURCE_FILE,
    };
    use anyhow::anyhow;
    use serde_json::{Map, json};
    use std::path::PathBuf;

    /// Yields one record per path; paths containing "geo" get full GPS
    /// tags, the rest only a source file.
    struct FakeSource {
        chunk_sizes: Vec<usize>,
        fail_on_call: Option<usize>,
    }

    impl FakeSource {
        fn new() -> Self {
            Self {
                chunk_sizes: Vec::new(),
                fail_on_call: None,
            }
        }
    }

    impl TagSource for FakeSource {
        fn read_tags(&mut self, paths: &[PathBuf]) -> Result<Vec<RawMetadata>, MetadataError> {
            self.chunk_sizes.push(paths.len());
            if Some(self.chunk_sizes.len()) == self.fail_on_call {
                return Err(MetadataError::Extraction(anyhow!("extractor unreachable")));
            }
            Ok(paths.iter().map(|path| fake_record(path)).collect())
        }
    }

    fn fake_record(path: &PathBuf) -> RawMetadata {
        let mut map = Map::new();
        map.insert(
            TAG_SOURCE_FILE.to_string(),
            json!(path.to_string_lossy().to_string()),
        );
        if path.to_string_lossy().contains("geo") {
            map.insert(TAG_LATITUDE.to_string(), json!(10.0));
            map.insert(TAG_LATITUDE_REF.to_string(), json!("N"));
            map.insert(TAG_LONGITUDE.to_string(), json!(20.0));
            map.insert(TAG_LONGITUDE_REF.to_string(), json!("E"));
        }
        RawMetadata(map)
    }

    fn paths(n: usize) -> Vec<PathBuf> {
        (0..n).map(|i| PathBuf::from(format!("/p/{i}.jpg"))).collect()
    }

    #[test]
    fn partitions_paths_into_fixed_size_chunks() {
        let mut source = FakeSource::new();
        let batches: Vec<_> = extract_batches(&mut source, paths(2500))
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            batches.iter().map(|batch| batch.len()).collect::<Vec<_>>(),
            vec![1000, 1000, 500]
        );
        assert_eq!(source.chunk_sizes, vec![1000, 1000, 500]);

        // partitions keep the original path order
        assert_eq!(batches[0][0].raw.source_file(), Some("/p/0.jpg"));
        assert_eq!(batches[1][0].raw.source_file(), Some("/p/1000.jpg"));
        assert_eq!(batches[2][0].raw.source_file(), Some("/p/2000.jpg"));
    }

    #[test]
    fn no_paths_means_no_batches() {
        let mut source = FakeSource::new();
        assert_eq!(extract_batches(&mut source, Vec::new()).count(), 0);
        assert!(source.chunk_sizes.is_empty());
    }

    #[test]
    fn annotates_records_with_validation_result() {
        let mut source = FakeSource::new();
        let input = vec![PathBuf::from("/p/geo.jpg"), PathBuf::from("/p/plain.jpg")];

        let batches: Vec<_> = extract_batches(&mut source, input)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(batches.len(), 1);
        assert!(batches[0][0].valid);
        assert!(!batches[0][1].valid);
    }

    #[test]
    fn extraction_failure_propagates_and_ends_the_sequence() {
        let mut source = FakeSource::new();
        source.fail_on_call = Some(2);

        let mut batches = extract_batches(&mut source, paths(2500));

        assert!(batches.next().unwrap().is_ok());
        assert!(batches.next().unwrap().is_err());
        assert!(batches.next().is_none());
    }
}
