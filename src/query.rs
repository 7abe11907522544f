//! Aggregation of stored locations for map display.

use serde::Serialize;

use crate::domain::location::LocationRecord;

// javascript and chrono don't agree on what %c, %x and %X are, so the
// exchange format is spelled out
pub const DATE_EXCHANGE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Arithmetic mean of the latitudes and longitudes in the record set,
/// used as the default map viewport center.
///
/// An empty set centers the map at (0, 0); the presentation layer
/// always needs a center, so this is a defined result, not an error.
pub fn centroid(records: &[LocationRecord]) -> (f64, f64) {
    if records.is_empty() {
        return (0.0, 0.0);
    }
    let n = records.len() as f64;
    let latitude = records.iter().map(|r| r.latitude).sum::<f64>() / n;
    let longitude = records.iter().map(|r| r.longitude).sum::<f64>() / n;
    (latitude, longitude)
}

/// A location record in the shape the map page consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayLocation {
    pub id: i64,
    pub album: String,
    pub filepath: String,
    pub latitude: f64,
    pub longitude: f64,
    pub datetime: Option<String>,
}

pub fn project(record: &LocationRecord) -> DisplayLocation {
    DisplayLocation {
        id: record.id,
        album: record.album.clone(),
        filepath: record.filepath.clone(),
        latitude: record.latitude,
        longitude: record.longitude,
        datetime: record
            .datetime
            .map(|dt| dt.format(DATE_EXCHANGE_FORMAT).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: i64, latitude: f64, longitude: f64) -> LocationRecord {
        LocationRecord {
            id,
            album: "trip".to_string(),
            filepath: format!("/pictures/{id}.jpg"),
            latitude,
            longitude,
            datetime: None,
        }
    }

    #[test]
    fn centroid_of_empty_set_is_origin() {
        assert_eq!(centroid(&[]), (0.0, 0.0));
    }

    #[test]
    fn centroid_is_the_arithmetic_mean() {
        let records = vec![record(1, 10.0, 20.0), record(2, 30.0, 40.0)];
        assert_eq!(centroid(&records), (20.0, 30.0));
    }

    #[test]
    fn centroid_of_single_record_is_the_record() {
        let records = vec![record(1, -33.9, 151.2)];
        assert_eq!(centroid(&records), (-33.9, 151.2));
    }

    #[test]
    fn project_formats_timestamp() {
        let mut r = record(1, 10.0, 20.0);
        r.datetime = NaiveDate::from_ymd_opt(2015, 6, 1).and_then(|d| d.and_hms_opt(9, 30, 0));

        let display = project(&r);

        assert_eq!(display.datetime.as_deref(), Some("2015/06/01 09:30:00"));
        assert_eq!(display.latitude, 10.0);
        assert_eq!(display.filepath, "/pictures/1.jpg");
    }

    #[test]
    fn project_keeps_missing_timestamp_empty() {
        let display = project(&record(1, 10.0, 20.0));
        assert_eq!(display.datetime, None);

        let json = serde_json::to_string(&display).unwrap();
        assert!(json.contains("\"datetime\":null"));
    }
}
