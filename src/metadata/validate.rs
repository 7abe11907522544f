use log::debug;

use crate::metadata::raw::{
    RawMetadata, TAG_LATITUDE, TAG_LATITUDE_REF, TAG_LONGITUDE, TAG_LONGITUDE_REF,
};

/// Checks whether a raw record carries usable GPS metadata.
///
/// Latitude and longitude are required as non-negative numbers (the
/// hemisphere sign is applied later from the reference tags), the
/// references must be N/S and E/W, and the source file must be known.
/// Records without GPS tags are an expected outcome, not an error.
pub fn validate(raw: &RawMetadata) -> bool {
    let ok = non_negative_number(raw, TAG_LATITUDE)
        && non_negative_number(raw, TAG_LONGITUDE)
        && matches!(raw.str_tag(TAG_LATITUDE_REF), Some("N" | "S"))
        && matches!(raw.str_tag(TAG_LONGITUDE_REF), Some("E" | "W"))
        && raw.source_file().is_some_and(|path| !path.is_empty());

    if !ok {
        debug!("no GPS metadata found: {raw:?}");
    }
    ok
}

fn non_negative_number(raw: &RawMetadata, tag: &str) -> bool {
    raw.num_tag(tag).is_some_and(|value| value >= 0.0)
}
