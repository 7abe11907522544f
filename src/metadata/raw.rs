use serde::Deserialize;
use serde_json::{Map, Value};

pub const TAG_SOURCE_FILE: &str = "SourceFile";
pub const TAG_DATE_STAMP: &str = "EXIF:GPSDateStamp";
pub const TAG_LATITUDE: &str = "EXIF:GPSLatitude";
pub const TAG_LATITUDE_REF: &str = "EXIF:GPSLatitudeRef";
pub const TAG_LONGITUDE: &str = "EXIF:GPSLongitude";
pub const TAG_LONGITUDE_REF: &str = "EXIF:GPSLongitudeRef";
pub const TAG_TIME_STAMP: &str = "EXIF:GPSTimeStamp";

/// Tags requested from the extractor for every file.
pub const GPS_TAGS: &[&str] = &[
    TAG_DATE_STAMP,
    TAG_LATITUDE,
    TAG_LATITUDE_REF,
    TAG_LONGITUDE,
    TAG_LONGITUDE_REF,
    TAG_TIME_STAMP,
];

/// One unvalidated tag dictionary, as returned by the extractor for one
/// file. Tags absent from the file are missing keys, not nulls.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMetadata(pub Map<String, Value>);

impl RawMetadata {
    pub fn str_tag(&self, tag: &str) -> Option<&str> {
        self.0.get(tag).and_then(Value::as_str)
    }

    pub fn num_tag(&self, tag: &str) -> Option<f64> {
        self.0.get(tag).and_then(Value::as_f64)
    }

    pub fn source_file(&self) -> Option<&str> {
        self.str_tag(TAG_SOURCE_FILE)
    }
}

/// Raw metadata annotated with its validation result.
#[derive(Debug, Clone)]
pub struct TaggedRecord {
    pub raw: RawMetadata,
    pub valid: bool,
}
