//! A SQLite-backed store for the bundle auction service.
//!
//! This crate implements the `bas-core` ports on top of rusqlite: tables
//! for providers, resources, customers, and bids, the consistent snapshot
//! read the solver consumes, and the write-back transaction that applies a
//! clearing run (capacity decrements, optional bid purge).

use bas_core::models::{ProviderId, ResourceId};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use std::path::PathBuf;

mod impls;

// This manages our database setup/migrations
mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("./migrations");
}

/// Database operations generate errors for multiple reasons, this is a
/// unified error type that our functions can return.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from the connection pool
    #[error("pool error: {0}")]
    ConnectionPool(#[from] r2d2::Error),

    /// Error during database migrations
    #[error("migration error: {0}")]
    Migration(#[from] refinery::Error),

    /// Error from SQLite operations
    #[error("sql error: {0}")]
    Sql(#[from] rusqlite::Error),

    /// A bid referenced a resource that does not exist
    #[error("bid references unknown resource {0}")]
    InvalidBundleReference(ResourceId),

    /// A bid was submitted with an empty bundle
    #[error("bid bundle must name at least one resource")]
    EmptyBundle,

    /// A resource was added against a provider that does not exist
    #[error("unknown provider {0}")]
    UnknownProvider(ProviderId),

    /// A stored bundle column could not be parsed
    #[error("malformed bundle column: {0:?}")]
    MalformedBundle(String),

    /// A stored capacity was out of range for the model
    #[error("stored capacity for resource {0} is out of range")]
    CapacityOutOfRange(ResourceId),

    /// Applying a clearing run would have taken a capacity negative.
    ///
    /// Capacities never go below zero; a run that implies otherwise was
    /// computed against a stale snapshot, and the whole apply is rolled
    /// back rather than clamped.
    #[error("applying the clearing run would underflow capacity of resource {0}")]
    CapacityUnderflow(ResourceId),
}

/// Storage configuration for the database.
pub enum Storage {
    /// Store data in a file at the specified path
    File(PathBuf),

    /// Store data in memory with the given identifier
    Memory(String),
}

/// Main database connection manager.
///
/// Sqlite does not have parallel writes, so we create two separate
/// connection pools. The reader has unlimited connections, while the writer
/// is capped to one. The single-connection writer also serializes clearing
/// write-backs, which the clearing algorithm requires.
#[derive(Clone)]
pub struct Database {
    reader: Pool<SqliteConnectionManager>,
    writer: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Opens the database, creating it and applying migrations as needed.
    pub fn open(storage: Storage) -> Result<Self, Error> {
        let writer = pool(&storage, Some(1), false)?;

        {
            let mut conn = writer.get()?;
            embedded::migrations::runner().run(&mut *conn)?;
        }

        let reader = pool(&storage, None, true)?;

        Ok(Self { reader, writer })
    }

    /// Obtains a connection from the pool.
    pub(crate) fn connect(
        &self,
        write: bool,
    ) -> Result<PooledConnection<SqliteConnectionManager>, Error> {
        let conn = if write {
            self.writer.get()
        } else {
            self.reader.get()
        };
        Ok(conn?)
    }
}

/// Constructs a connection pool.
fn pool(
    storage: &Storage,
    max_size: Option<u32>,
    readonly: bool,
) -> Result<Pool<SqliteConnectionManager>, Error> {
    let mut flags = OpenFlags::default();
    if readonly {
        flags.set(OpenFlags::SQLITE_OPEN_READ_WRITE, false);
        flags.set(OpenFlags::SQLITE_OPEN_READ_ONLY, true);
        flags.set(OpenFlags::SQLITE_OPEN_CREATE, false);
    }

    let db = match storage {
        Storage::File(path) => SqliteConnectionManager::file(path),
        Storage::Memory(name) => {
            // for in-memory databases, SQLITE_OPEN_CREATE seems to create errors
            SqliteConnectionManager::file(format!("file:/{}?vfs=memdb", name))
        }
    }
    .with_flags(flags)
    .with_init(|c| {
        c.execute_batch(
            r#"
            PRAGMA journal_mode = WAL;
            PRAGMA busy_timeout = 5000;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = true;
            PRAGMA cache_size = 2000;
            "#,
        )
    });

    let pool = if let Some(n) = max_size {
        r2d2::Pool::builder().max_size(n)
    } else {
        r2d2::Pool::builder()
    }
    .build(db)?;

    Ok(pool)
}
