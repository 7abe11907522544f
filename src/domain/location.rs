use chrono::NaiveDateTime;

/// A persisted, sign-corrected location entry for one geotagged picture.
///
/// The (album, filepath) pair is unique across the whole store; the id
/// is assigned by the store and never reused.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRecord {
    pub id: i64,
    pub album: String,
    pub filepath: String,
    pub latitude: f64,
    pub longitude: f64,
    pub datetime: Option<NaiveDateTime>,
}

/// Location data for one picture before the store has assigned an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub album: String,
    pub filepath: String,
    pub latitude: f64,
    pub longitude: f64,
    pub datetime: Option<NaiveDateTime>,
}
