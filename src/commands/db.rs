use rusqlite::{params, Connection, OptionalExtension, Result};
use std::path::Path;

const DB_SCHEMA_VERSION: i64 = 2;
pub const DB_FILE_NAME: &str = "chorepoints.db";

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;

    let mut version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version < 1 {
        apply_migration_1(conn)?;
        version = 1;
        conn.pragma_update(None, "user_version", version)?;
    }

    if version < 2 {
        apply_migration_2(conn)?;
        version = 2;
        conn.pragma_update(None, "user_version", version)?;
    }

    if version > DB_SCHEMA_VERSION {
        log::warn!(
            "event=db_schema status=newer db_version={version} supported={DB_SCHEMA_VERSION}"
        );
    }

    Ok(())
}

fn apply_migration_1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS kv_entries (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL DEFAULT 0
        );
        ",
    )
}

fn apply_migration_2(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE INDEX IF NOT EXISTS idx_kv_entries_updated_at ON kv_entries(updated_at);
        ",
    )
}

pub fn get_db_connection(data_dir: &str) -> Result<Connection> {
    if let Err(e) = std::fs::create_dir_all(data_dir) {
        log::error!("event=db_open status=error data_dir={data_dir} error={e}");
    }
    let db_path = Path::new(data_dir).join(DB_FILE_NAME);
    let conn = Connection::open(db_path)?;
    initialize_schema(&conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    initialize_schema(&conn)?;
    Ok(conn)
}

pub fn load_kv(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM kv_entries WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
    .optional()
}

pub fn upsert_kv(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let now = chrono::Utc::now().timestamp_millis();
    conn.execute(
        "
        INSERT INTO kv_entries (key, value, updated_at) VALUES (?1, ?2, ?3)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        ",
        params![key, value, now],
    )?;
    Ok(())
}

/// Upserts every `Some` value and deletes every `None` key in one transaction.
pub fn write_kv_batch(conn: &Connection, writes: &[(&str, Option<String>)]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    for (key, value) in writes {
        match value {
            Some(value) => upsert_kv(&tx, key, value)?,
            None => delete_kv(&tx, key)?,
        }
    }
    tx.commit()
}

pub fn delete_kv(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM kv_entries WHERE key = ?1", params![key])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_initializes_with_expected_version() {
        let conn = Connection::open_in_memory().expect("in-memory db");
        initialize_schema(&conn).expect("schema init");
        let version: i64 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .expect("schema version");
        assert_eq!(version, DB_SCHEMA_VERSION);
    }

    #[test]
    fn schema_init_is_repeatable() {
        let conn = open_in_memory().expect("in-memory db");
        initialize_schema(&conn).expect("second init");
        upsert_kv(&conn, "children", "[]").expect("write after re-init");
    }

    #[test]
    fn kv_upsert_overwrites_and_delete_removes() {
        let conn = open_in_memory().expect("in-memory db");

        upsert_kv(&conn, "chores", "[1]").expect("insert");
        upsert_kv(&conn, "chores", "[2]").expect("overwrite");
        assert_eq!(load_kv(&conn, "chores").expect("load"), Some("[2]".to_string()));

        delete_kv(&conn, "chores").expect("delete");
        assert_eq!(load_kv(&conn, "chores").expect("load"), None);
    }

    #[test]
    fn batch_writes_and_removes_in_one_go() {
        let conn = open_in_memory().expect("in-memory db");
        upsert_kv(&conn, "selectedChildId", "\"2\"").expect("seed");

        write_kv_batch(
            &conn,
            &[
                ("children", Some("[]".to_string())),
                ("chores", Some("[]".to_string())),
                ("selectedChildId", None),
            ],
        )
        .expect("batch");

        assert_eq!(load_kv(&conn, "children").expect("load"), Some("[]".to_string()));
        assert_eq!(load_kv(&conn, "chores").expect("load"), Some("[]".to_string()));
        assert_eq!(load_kv(&conn, "selectedChildId").expect("load"), None);
    }

    #[test]
    fn file_database_persists_between_connections() {
        let dir = tempfile::tempdir().expect("temp dir");
        let data_dir = dir.path().join("nested").to_string_lossy().to_string();

        {
            let conn = get_db_connection(&data_dir).expect("open");
            upsert_kv(&conn, "selectedChildId", "\"1\"").expect("write");
        }

        let conn = get_db_connection(&data_dir).expect("reopen");
        assert_eq!(
            load_kv(&conn, "selectedChildId").expect("load"),
            Some("\"1\"".to_string())
        );
    }
}
