//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply pending migrations atomically.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - Migration SQL uses `IF NOT EXISTS`, so files created by earlier tools
//!   with the same `author`/`book` layout are adopted in place.
//! - Every open ends with a column check of both tables, since
//!   `IF NOT EXISTS` keeps a same-named table of any shape.

use crate::db::{DbError, DbResult};
use log::{info, warn};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

/// Columns each inventory table must expose, compared case-insensitively.
const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("author", &["ID", "Name", "Country"]),
    ("book", &["id", "title", "authorID", "quantity"]),
];

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version < latest {
        let tx = conn.transaction()?;
        for migration in MIGRATIONS {
            if migration.version <= current_version {
                continue;
            }

            tx.execute_batch(migration.sql)?;
            tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
        }
        verify_inventory_layout(&tx)?;
        tx.commit()?;

        info!(
            "event=db_migrate module=db status=ok from_version={} to_version={}",
            current_version, latest
        );
        return Ok(());
    }

    verify_inventory_layout(conn)
}

/// Checks that `author` and `book` expose every column inventory queries use.
pub fn verify_inventory_layout(conn: &Connection) -> DbResult<()> {
    for &(table, required) in REQUIRED_COLUMNS {
        let present = table_columns(conn, table)?;
        if let Some(missing) = required
            .iter()
            .copied()
            .find(|column| !present.iter().any(|name| name.eq_ignore_ascii_case(column)))
        {
            warn!(
                "event=db_migrate module=db status=error error_code=incompatible_table table={table} missing_column={missing}"
            );
            return Err(DbError::IncompatibleTable {
                table,
                missing_column: missing,
            });
        }
    }
    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
