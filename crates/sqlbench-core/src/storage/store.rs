use crate::errors::{QueryError, StoreError};
use crate::storage::query::{QueryExecutor, ResultSet};
use crate::storage::schema::{ColumnDescriptor, SchemaDescription, TableDescriptor};
use rusqlite::types::Value;
use rusqlite::{Batch, Connection, OpenFlags};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Read-only handle on the relational store.
///
/// Opened once per process and passed explicitly to every component that
/// needs it. Cloning shares the same connection.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn =
            Connection::open_with_flags(path, flags).map_err(|source| StoreError::Unavailable {
                path: path.to_path_buf(),
                source,
            })?;

        // SQLite opens lazily; touch the catalog so a missing or corrupt
        // file fails here instead of on the first query.
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |r| {
            r.get::<_, i64>(0)
        })
        .map_err(|source| StoreError::Unavailable {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(event = "store_open", path = %path.display());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Reads table and column metadata in catalog order.
    pub fn describe(&self) -> Result<SchemaDescription, StoreError> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
        let names = stmt
            .query_map([], |r| r.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut tables = Vec::with_capacity(names.len());
        for name in names {
            let pragma = format!("PRAGMA table_info(\"{}\")", name.replace('"', "\"\""));
            let mut info = conn.prepare(&pragma)?;
            let columns = info
                .query_map([], |r| {
                    Ok(ColumnDescriptor {
                        name: r.get(1)?,
                        declared_type: r.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            tables.push(TableDescriptor { name, columns });
        }

        Ok(SchemaDescription { tables })
    }
}

impl QueryExecutor for Store {
    fn execute(&self, sql: &str) -> Result<ResultSet, QueryError> {
        let sql = sql.trim();
        if sql.is_empty() {
            return Err(QueryError::Empty);
        }

        let conn = self.lock().map_err(|e| QueryError::Sql(e.to_string()))?;
        let mut batch = Batch::new(&conn, sql);
        let mut stmt = batch.next()?.ok_or(QueryError::Empty)?;
        if batch.next()?.is_some() {
            return Err(QueryError::Sql(
                "multiple statements are not allowed".to_string(),
            ));
        }

        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();

        let mut rows = Vec::new();
        let mut cursor = stmt.query([])?;
        while let Some(row) = cursor.next()? {
            let mut cells = Vec::with_capacity(width);
            for i in 0..width {
                cells.push(row.get::<_, Value>(i)?);
            }
            rows.push(cells);
        }

        Ok(ResultSet { columns, rows })
    }
}
