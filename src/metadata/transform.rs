use chrono::NaiveDateTime;

use crate::{
    domain::location::NewLocation,
    metadata::{
        error::MetadataError,
        raw::{
            RawMetadata, TAG_DATE_STAMP, TAG_LATITUDE, TAG_LATITUDE_REF, TAG_LONGITUDE,
            TAG_LONGITUDE_REF, TAG_SOURCE_FILE, TAG_TIME_STAMP,
        },
    },
};

// exiftool writes GPS timestamps in this layout, with or without
// milliseconds
const TIMESTAMP_FORMATS: &[&str] = &["%Y:%m:%d %H:%M:%S%.3f", "%Y:%m:%d %H:%M:%S"];

/// Turns a validated raw record into a normalized location row.
///
/// The hemisphere references are folded into the coordinate signs here;
/// the store never re-derives them. A missing date or time stamp leaves
/// the timestamp empty, but tags that are present and unparsable are a
/// hard error for this record.
pub fn transform(album: &str, raw: &RawMetadata) -> Result<NewLocation, MetadataError> {
    let filepath = raw
        .source_file()
        .ok_or(MetadataError::MissingTag {
            tag: TAG_SOURCE_FILE,
        })?
        .to_string();

    let mut latitude = raw.num_tag(TAG_LATITUDE).ok_or(MetadataError::MissingTag {
        tag: TAG_LATITUDE,
    })?;
    let mut longitude = raw
        .num_tag(TAG_LONGITUDE)
        .ok_or(MetadataError::MissingTag {
            tag: TAG_LONGITUDE,
        })?;

    if raw.str_tag(TAG_LATITUDE_REF) == Some("S") {
        latitude = -latitude;
    }
    if raw.str_tag(TAG_LONGITUDE_REF) == Some("W") {
        longitude = -longitude;
    }

    let datetime = match (raw.str_tag(TAG_DATE_STAMP), raw.str_tag(TAG_TIME_STAMP)) {
        (Some(date), Some(time)) => Some(parse_timestamp(&filepath, &format!("{date} {time}"))?),
        _ => None,
    };

    Ok(NewLocation {
        album: album.to_string(),
        filepath,
        latitude,
        longitude,
        datetime,
    })
}

fn parse_timestamp(filepath: &str, value: &str) -> Result<NaiveDateTime, MetadataError> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| MetadataError::Timestamp {
            filepath: filepath.to_string(),
            value: value.to_string(),
        })
}
