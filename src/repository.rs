//! Repository operations: create, read, insert and upsert typed records.

use tracing::{debug, info, warn};

use crate::codec::deserialize_row;
use crate::config::{ErrorMode, SqliteConfig};
use crate::error::{OrmError, Result};
use crate::filter::Filter;
use crate::params::{Params, SqlQuery};
use crate::sql::{generate_create_table, generate_insert, generate_update};
use crate::sqlite::{Executor, SqliteExecutor};
use crate::table::{Schema, Table, TableSchema};

/// Outcome of [`Database::add_or_update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOrUpdate {
    Inserted,
    Updated,
}

/// Typed access to the tables of one database.
pub struct Database<E = SqliteExecutor> {
    executor: E,
    error_mode: ErrorMode,
}

impl Database<SqliteExecutor> {
    /// Open (or create) the configured database file and create every table
    /// registered in the config's schema.
    ///
    /// Existing tables are left as they are: a changed column list is never
    /// applied to a table that already exists.
    pub async fn open(config: SqliteConfig) -> Result<Self> {
        config.validate()?;
        let executor = SqliteExecutor::open(&config.db_path)?;
        let database = Self::with_executor(executor, config.error_mode);
        database.create_all_tables(&config.schema).await?;
        Ok(database)
    }

    pub async fn open_in_memory(schema: &Schema, error_mode: ErrorMode) -> Result<Self> {
        let database = Self::with_executor(SqliteExecutor::open_in_memory()?, error_mode);
        database.create_all_tables(schema).await?;
        Ok(database)
    }
}

impl<E: Executor> Database<E> {
    pub fn with_executor(executor: E, error_mode: ErrorMode) -> Self {
        Self {
            executor,
            error_mode,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn error_mode(&self) -> ErrorMode {
        self.error_mode
    }

    pub async fn create_all_tables(&self, schema: &Schema) -> Result<()> {
        for table in &schema.tables {
            self.create_schema_table(table).await?;
        }
        Ok(())
    }

    pub async fn create_table<T: Table>(&self) -> Result<()> {
        self.create_schema_table(&T::schema()).await
    }

    async fn create_schema_table(&self, table: &TableSchema) -> Result<()> {
        info!(table = table.name, columns = table.columns.len(), "creating table");
        self.run_statement(SqlQuery::new(generate_create_table(table)))
            .await?;
        Ok(())
    }

    /// Records of `T` matching `filter`, in the order the engine returns them.
    pub async fn get_items<T: Table>(&self, filter: Option<&Filter>) -> Result<Vec<T>> {
        let query = match filter {
            Some(filter) => filter.build(T::TABLE_NAME),
            None => SqlQuery::new(format!("SELECT * FROM {}", T::TABLE_NAME)),
        };
        self.run_query(query).await
    }

    /// Whether at least one record of `T` matches `filter`.
    pub async fn exists<T: Table>(&self, filter: Option<&Filter>) -> Result<bool> {
        Ok(!self.get_items::<T>(filter).await?.is_empty())
    }

    /// Insert all `rows` with a single statement. An empty slice is a no-op.
    pub async fn insert_items<T: Table>(&self, rows: &[T]) -> Result<()> {
        let rows: Vec<_> = rows.iter().map(T::to_row).collect();
        match generate_insert(&T::schema(), &rows) {
            Some(query) => {
                self.run_statement(query).await?;
            }
            None => debug!(table = T::TABLE_NAME, "nothing to insert"),
        }
        Ok(())
    }

    /// Update the row matched by `match_filter(record)`, or insert `record`
    /// when nothing matches.
    ///
    /// Only `include_columns` are written on update; an empty list writes every
    /// column. Ordering clauses of the match filter are not applied to the
    /// `UPDATE`.
    ///
    /// A match filter without predicates is rejected with
    /// [`OrmError::UnrestrictedUpdate`] before anything runs, in either error mode.
    pub async fn add_or_update<T, F>(
        &self,
        record: &T,
        match_filter: F,
        include_columns: &[&str],
    ) -> Result<AddOrUpdate>
    where
        T: Table,
        F: FnOnce(&T) -> Filter,
    {
        let filter = match_filter(record);
        if !filter.has_predicates() {
            return Err(OrmError::UnrestrictedUpdate(T::TABLE_NAME));
        }

        if !self.exists::<T>(Some(&filter)).await? {
            self.insert_items(std::slice::from_ref(record)).await?;
            return Ok(AddOrUpdate::Inserted);
        }

        let schema = T::schema();
        let mut params = Params::new();
        let assignments = generate_update(&schema, &record.to_row(), include_columns, &mut params);
        if assignments.is_empty() {
            debug!(table = schema.name, ?include_columns, "no columns to update");
            return Ok(AddOrUpdate::Updated);
        }

        let mut statement = format!("UPDATE {} SET {}", schema.name, assignments);
        statement.push(' ');
        statement.push_str(&filter.build_where_into(&mut params));
        self.run_statement(SqlQuery::new(statement).with_params(params))
            .await?;
        Ok(AddOrUpdate::Updated)
    }

    async fn run_statement(&self, query: SqlQuery) -> Result<usize> {
        debug!(sql = %query.statement, params = query.params.len(), "execute");
        match self.executor.execute(&query).await {
            Err(e) if self.error_mode == ErrorMode::Lenient => {
                warn!(sql = %query.statement, error = %e, "statement failed, ignoring");
                Ok(0)
            }
            result => result,
        }
    }

    async fn run_query<T: Table>(&self, query: SqlQuery) -> Result<Vec<T>> {
        debug!(sql = %query.statement, params = query.params.len(), "query");
        let result: Result<Vec<T>> = self
            .executor
            .query(&query)
            .await
            .and_then(|rows| rows.iter().map(deserialize_row::<T>).collect());
        match result {
            Err(e) if self.error_mode == ErrorMode::Lenient => {
                warn!(sql = %query.statement, error = %e, "query failed, returning no rows");
                Ok(Vec::new())
            }
            result => result,
        }
    }
}
