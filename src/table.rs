//! The mapping contract between record types and tables.

use std::collections::HashMap;

use crate::codec::FromValue;
use crate::column::Column;
use crate::error::{OrmError, Result};
use crate::value::Value;

/// Column-name keyed values of one record or one result row.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Row {
    values: HashMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Typed read of `column`. Returns `None` when the column is absent or `NULL`.
    pub fn field<T: FromValue>(&self, column: &str) -> Result<Option<T>> {
        match self.values.get(column).filter(|v| !v.is_null()) {
            None => Ok(None),
            Some(value) => T::from_value(value.clone())
                .map(Some)
                .map_err(|source| OrmError::Mapping {
                    column: column.to_string(),
                    source,
                }),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A record type stored in its own table.
///
/// Implementations declare the table statically and convert explicitly to and
/// from a [`Row`]; nothing is discovered at runtime.
///
/// ```
/// use rust_sqlite_orm::{Column, Result, Row, Table};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Config {
///     key: String,
///     value: Option<String>,
/// }
///
/// impl Table for Config {
///     const TABLE_NAME: &'static str = "config";
///
///     fn columns() -> &'static [Column] {
///         const COLUMNS: &[Column] = &[Column::text("key"), Column::text("value")];
///         COLUMNS
///     }
///
///     fn to_row(&self) -> Row {
///         Row::new().with("key", &self.key).with("value", self.value.clone())
///     }
///
///     fn from_row(row: &Row) -> Result<Self> {
///         Ok(Self {
///             key: row.field("key")?.unwrap_or_default(),
///             value: row.field("value")?,
///         })
///     }
/// }
/// ```
pub trait Table: Sized + Send + Sync {
    const TABLE_NAME: &'static str;

    /// Columns in table order. `INSERT` binds values positionally in this order.
    fn columns() -> &'static [Column];

    fn to_row(&self) -> Row;

    /// Build a record from a decoded row. Columns may be missing from `row`.
    fn from_row(row: &Row) -> Result<Self>;

    fn schema() -> TableSchema {
        TableSchema::new(Self::TABLE_NAME, Self::columns())
    }
}

/// Table name plus ordered columns, detached from the record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [Column],
}

impl TableSchema {
    pub const fn new(name: &'static str, columns: &'static [Column]) -> Self {
        Self { name, columns }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Registry of the tables a database is expected to hold.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Schema {
    pub tables: Vec<TableSchema>,
}

impl Schema {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Register a table. A table name already present is left untouched.
    pub fn add_table(mut self, table: TableSchema) -> Self {
        if !self.tables.iter().any(|t| t.name == table.name) {
            self.tables.push(table);
        }
        self
    }

    pub fn with_table<T: Table>(self) -> Self {
        self.add_table(T::schema())
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
