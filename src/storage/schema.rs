use rusqlite::Connection;

pub mod tables {
    pub const LOCATION: &str = "location";

    pub const ALL_TABLES: &[&str] = &[LOCATION];
}

pub mod columns {
    pub const ID: &str = "id";
    pub const ALBUM: &str = "album";
    pub const FILEPATH: &str = "filepath";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const DATETIME: &str = "datetime";
}

pub use columns::*;
pub use tables::*;

// AUTOINCREMENT keeps ids monotonic so they are never reused after a
// row is deleted
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS location (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    album TEXT NOT NULL,
    filepath TEXT NOT NULL,
    latitude REAL NOT NULL,
    longitude REAL NOT NULL,
    datetime TEXT,
    UNIQUE (album, filepath)
);
"#;

pub fn init(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA)
}
