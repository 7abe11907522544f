use anyhow::anyhow;
use log::debug;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

use crate::{
    config,
    domain::location::{LocationRecord, NewLocation},
    storage::{
        db,
        error::StorageError,
        schema::{columns, tables},
    },
};

use columns::*;
use tables::*;

/// Persistent, deduplicated set of picture locations.
///
/// The store owns the only connection to the backing database and is
/// the sole authority on id assignment; the schema enforces one row per
/// (album, filepath) pair.
pub struct LocationStore {
    pub(crate) db: Connection,
}

impl LocationStore {
    /// Opens (or creates) the backing database described by the config.
    pub fn new(db_config: &config::Database) -> Result<Self, StorageError> {
        Ok(Self::from_existing_conn(db::open(db_config)?))
    }

    pub fn from_existing_conn(db: Connection) -> Self {
        Self { db }
    }

    /// Batch insert. Rows whose (album, filepath) pair is already
    /// present are skipped silently; a duplicate is not an error and is
    /// never an overwrite. Returns the number of rows actually written.
    pub fn insert(&mut self, rows: &[NewLocation]) -> Result<usize, StorageError> {
        let tx = self.db.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT OR IGNORE INTO {LOCATION}
                 ({ALBUM}, {FILEPATH}, {LATITUDE}, {LONGITUDE}, {DATETIME})
                 VALUES (?1, ?2, ?3, ?4, ?5)"
            ))?;
            for row in rows {
                inserted += stmt.execute(params![
                    row.album,
                    row.filepath,
                    row.latitude,
                    row.longitude,
                    row.datetime,
                ])?;
            }
        }
        tx.commit()?;

        debug!("{inserted} rows inserted");
        Ok(inserted)
    }

    /// All stored records, or only those of the given albums when a
    /// non-empty filter is supplied. Row order is unspecified.
    pub fn select_all(&self, albums: Option<&[String]>) -> Result<Vec<LocationRecord>, StorageError> {
        let base = format!(
            "SELECT {ID}, {ALBUM}, {FILEPATH}, {LATITUDE}, {LONGITUDE}, {DATETIME} FROM {LOCATION}"
        );
        let records = match albums {
            Some(albums) if !albums.is_empty() => {
                let query = format!("{base} WHERE {ALBUM} IN ({})", placeholders(albums.len()));
                let mut stmt = self.db.prepare(&query)?;
                stmt.query_map(params_from_iter(albums), row_to_record)?
                    .collect::<Result<Vec<_>, _>>()?
            }
            _ => {
                let mut stmt = self.db.prepare(&base)?;
                stmt.query_map([], row_to_record)?
                    .collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(records)
    }

    /// Single record lookup by surrogate id.
    pub fn get_by_id(&self, id: i64) -> Result<Option<LocationRecord>, StorageError> {
        let record = self
            .db
            .query_row(
                &format!(
                    "SELECT {ID}, {ALBUM}, {FILEPATH}, {LATITUDE}, {LONGITUDE}, {DATETIME}
                     FROM {LOCATION} WHERE {ID} = ?1"
                ),
                params![id],
                row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    /// Whether any record, in any album, references this exact filepath.
    pub fn exists(&self, filepath: &str) -> Result<bool, StorageError> {
        let found: i64 = self.db.query_row(
            &format!("SELECT EXISTS (SELECT 1 FROM {LOCATION} WHERE {FILEPATH} = ?1)"),
            params![filepath],
            |row| row.get(0),
        )?;
        Ok(found != 0)
    }

    /// Removes every record of the album. Returns the number of rows
    /// removed; 0 when the album is unknown or already empty.
    pub fn delete(&mut self, album: &str) -> Result<usize, StorageError> {
        let removed = self.db.execute(
            &format!("DELETE FROM {LOCATION} WHERE {ALBUM} = ?1"),
            params![album],
        )?;
        debug!("{removed} rows deleted");
        Ok(removed)
    }

    /// Distinct album values currently present, optionally restricted
    /// to the given subset. Albums with no rows never appear, whether
    /// requested or not.
    pub fn list_albums(&self, albums: Option<&[String]>) -> Result<Vec<String>, StorageError> {
        let base = format!("SELECT DISTINCT {ALBUM} FROM {LOCATION}");
        let names = match albums {
            Some(albums) if !albums.is_empty() => {
                let query = format!("{base} WHERE {ALBUM} IN ({})", placeholders(albums.len()));
                let mut stmt = self.db.prepare(&query)?;
                stmt.query_map(params_from_iter(albums), |row| row.get(0))?
                    .collect::<Result<Vec<_>, _>>()?
            }
            _ => {
                let mut stmt = self.db.prepare(&base)?;
                stmt.query_map([], |row| row.get(0))?
                    .collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(names)
    }

    /// Number of records in exactly that album, 0 when it has none.
    pub fn count(&self, album: &str) -> Result<usize, StorageError> {
        let count: i64 = self.db.query_row(
            &format!("SELECT COUNT(*) FROM {LOCATION} WHERE {ALBUM} = ?1"),
            params![album],
            |row| row.get(0),
        )?;
        usize::try_from(count)
            .map_err(|e| StorageError::Internal(anyhow!("unexpected negative count: {e}")))
    }
}

fn placeholders(n: usize) -> String {
    (1..=n)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<LocationRecord> {
    Ok(LocationRecord {
        id: row.get(0)?,
        album: row.get(1)?,
        filepath: row.get(2)?,
        latitude: row.get(3)?,
        longitude: row.get(4)?,
        datetime: row.get(5)?,
    })
}
