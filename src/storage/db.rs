use std::path::Path;

use anyhow::anyhow;
use log::debug;
use rusqlite::Connection;

use crate::{
    config,
    storage::{error::StorageError, schema},
};

fn open_in_memory() -> Result<Connection, rusqlite::Error> {
    Connection::open_in_memory()
}

fn open_from_file(path: &Path) -> Result<Connection, rusqlite::Error> {
    Connection::open(path)
}

/// Open-or-create: a fresh database file gets the schema created before
/// any operation runs, an existing one is attached as-is and never
/// migrated.
pub fn open(config: &config::Database) -> Result<Connection, StorageError> {
    let db = if config.in_memory {
        open_in_memory()?
    } else {
        let path = config
            .path
            .as_ref()
            .ok_or_else(|| anyhow!("database path missing from config"))?;
        debug!("opening location database {}", path.display());
        open_from_file(path)?
    };
    schema::init(&db)?;
    Ok(db)
}

#[cfg(test)]
mod tests {
    use crate::{
        config,
        storage::{db::open, schema},
    };
    use tempfile::TempDir;

    #[test]
    fn open_in_memory_db_initializes_schema() {
        let db = open(&config::Database {
            in_memory: true,
            path: None,
        })
        .unwrap();

        let mut stmt = db
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap();

        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();

        for table in schema::tables::ALL_TABLES {
            assert!(tables.contains(&table.to_string()));
        }
    }

    #[test]
    fn reopening_an_existing_file_keeps_its_rows() {
        let tmp = TempDir::new().unwrap();
        let config = config::Database {
            in_memory: false,
            path: Some(tmp.path().join("location.db")),
        };

        {
            let db = open(&config).unwrap();
            db.execute(
                "INSERT INTO location (album, filepath, latitude, longitude)
                 VALUES ('trip', '/a.jpg', 1.0, 2.0)",
                [],
            )
            .unwrap();
        }

        let db = open(&config).unwrap();
        let count: i64 = db
            .query_row("SELECT COUNT(*) FROM location", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn missing_path_for_on_disk_db_is_an_error() {
        let result = open(&config::Database {
            in_memory: false,
            path: None,
        });
        assert!(result.is_err());
    }
}
