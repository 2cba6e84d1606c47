//! SQLite-backed client store

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use tracing::{debug, instrument};

use crate::domain::{Client, TaxId};
use crate::infrastructure::traits::{ClientStore, StoreConnector};
use crate::infrastructure::{StoreError, StoreResult};

/// Client table DDL. `tax_id` holds digits only.
pub const CLIENT_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS client (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    tax_id TEXT NOT NULL UNIQUE
)";

/// One open connection to the client database.
#[derive(Debug)]
pub struct SqliteClientStore {
    conn: Connection,
}

impl SqliteClientStore {
    /// Open (or create) the database file and ensure the schema.
    ///
    /// Missing parent directories are created.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("opened database {}", path.display());
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Private in-memory database, gone when dropped.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::Open {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }
}

fn to_client(id: i64, name: String, tax_id: String) -> StoreResult<Client> {
    let tax_id = TaxId::from_digits(&tax_id).map_err(|e| StoreError::CorruptRow {
        message: format!("client {id}: {e}"),
    })?;
    Ok(Client { id, name, tax_id })
}

impl ClientStore for SqliteClientStore {
    fn ensure_schema(&self) -> StoreResult<()> {
        self.conn
            .execute(CLIENT_SCHEMA, [])
            .map_err(|e| StoreError::sqlite("create client table", e))?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn exists(&self, tax_id: &TaxId) -> StoreResult<bool> {
        self.conn
            .prepare("SELECT 1 FROM client WHERE tax_id = ?1")
            .and_then(|mut stmt| stmt.exists([tax_id.as_str()]))
            .map_err(|e| StoreError::sqlite("check tax id", e))
    }

    #[instrument(level = "debug", skip(self))]
    fn find(&self, tax_id: &TaxId) -> StoreResult<Option<Client>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, tax_id FROM client WHERE tax_id = ?1",
                [tax_id.as_str()],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()
            .map_err(|e| StoreError::sqlite("find client", e))?;

        row.map(|(id, name, tax_id)| to_client(id, name, tax_id))
            .transpose()
    }

    #[instrument(level = "debug", skip(self))]
    fn insert(&self, name: &str, tax_id: &TaxId) -> StoreResult<Client> {
        let result = self.conn.execute(
            "INSERT INTO client (name, tax_id) VALUES (?1, ?2)",
            params![name, tax_id.as_str()],
        );
        match result {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                return Err(StoreError::UniqueConstraintViolation {
                    tax_id: tax_id.to_string(),
                });
            }
            Err(e) => return Err(StoreError::sqlite("insert client", e)),
        }

        let id = self.conn.last_insert_rowid();
        debug!("inserted client id={}", id);
        Ok(Client {
            id,
            name: name.to_string(),
            tax_id: tax_id.clone(),
        })
    }

    fn list(&self) -> StoreResult<Vec<Client>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, tax_id FROM client ORDER BY id")
            .map_err(|e| StoreError::sqlite("list clients", e))?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .map_err(|e| StoreError::sqlite("list clients", e))?;

        let mut clients = Vec::new();
        for row in rows {
            let (id, name, tax_id) = row.map_err(|e| StoreError::sqlite("read client row", e))?;
            clients.push(to_client(id, name, tax_id)?);
        }
        Ok(clients)
    }
}

/// Connector opening the configured database file for each cycle.
#[derive(Debug, Clone)]
pub struct SqliteConnector {
    path: PathBuf,
}

impl SqliteConnector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoreConnector for SqliteConnector {
    fn connect(&self) -> StoreResult<Box<dyn ClientStore>> {
        Ok(Box::new(SqliteClientStore::open(&self.path)?))
    }
}
