use async_trait::async_trait;
use futures::lock::Mutex;
use rusqlite::types::ToSql;
use rusqlite::Connection;
use std::path::Path;
use tracing::{debug, info};

use crate::error::Result;
use crate::params::SqlQuery;
use crate::table::Row;
use crate::value::Value;

/// Statement execution as consumed by the repository operations.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run a statement that returns no rows. Returns the affected row count.
    async fn execute(&self, query: &SqlQuery) -> Result<usize>;

    /// Run a query and return every result row, keyed by result column name,
    /// in cursor order.
    async fn query(&self, query: &SqlQuery) -> Result<Vec<Row>>;
}

/// Executor over a single SQLite connection.
///
/// Statements are serialized through an async mutex: one statement runs at a
/// time and the connection stays open for the lifetime of the executor.
pub struct SqliteExecutor {
    connection: Mutex<Connection>,
}

impl SqliteExecutor {
    /// Open the database file at `path`, creating it and any missing parent
    /// directories if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let created = !path.exists();
        let connection = Connection::open(path)?;
        info!(path = %path.display(), created, "opened sqlite database");
        Ok(Self::from_connection(connection))
    }

    pub fn open_in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory()?;
        debug!("opened in-memory sqlite database");
        Ok(Self::from_connection(connection))
    }

    pub fn from_connection(connection: Connection) -> Self {
        Self {
            connection: Mutex::new(connection),
        }
    }
}

#[async_trait]
impl Executor for SqliteExecutor {
    async fn execute(&self, query: &SqlQuery) -> Result<usize> {
        let connection = self.connection.lock().await;
        execute_on(&connection, query)
    }

    async fn query(&self, query: &SqlQuery) -> Result<Vec<Row>> {
        let connection = self.connection.lock().await;
        query_on(&connection, query)
    }
}

fn named_params(query: &SqlQuery) -> Vec<(&str, &dyn ToSql)> {
    query
        .params
        .iter()
        .map(|p| (p.name.as_str(), &p.value as &dyn ToSql))
        .collect()
}

fn execute_on(connection: &Connection, query: &SqlQuery) -> Result<usize> {
    let mut statement = connection.prepare(&query.statement)?;
    let params = named_params(query);
    Ok(statement.execute(params.as_slice())?)
}

fn query_on(connection: &Connection, query: &SqlQuery) -> Result<Vec<Row>> {
    let mut statement = connection.prepare(&query.statement)?;
    let columns: Vec<String> = statement
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();

    let params = named_params(query);
    let mut rows = statement.query(params.as_slice())?;
    let mut result = Vec::new();
    while let Some(row) = rows.next()? {
        let mut mapped = Row::new();
        for (idx, name) in columns.iter().enumerate() {
            mapped.set(name.as_str(), Value::from(row.get_ref(idx)?));
        }
        result.push(mapped);
    }
    Ok(result)
}
