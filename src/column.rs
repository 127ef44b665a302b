//! Column descriptors.
//!
//! A [`Column`] is plain `const` data so that a record type can declare its
//! schema as a `&'static [Column]`:
//!
//! ```
//! use rust_sqlite_orm::Column;
//!
//! const COLUMNS: &[Column] = &[
//!     Column::integer("id").primary_key().auto_increment(),
//!     Column::text("name").not_null(),
//!     Column::bit("active"),
//! ];
//! assert_eq!(COLUMNS[0].sql(), "id INTEGER PRIMARY KEY AUTOINCREMENT");
//! ```

use std::fmt;

/// Semantic column kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Text,
    Bit,
    Integer,
    /// Stored as `TEXT`.
    DateTime,
}

impl ColumnType {
    /// SQL type used in `CREATE TABLE`.
    pub fn sql_type(self) -> &'static str {
        match self {
            ColumnType::Text | ColumnType::DateTime => "TEXT",
            ColumnType::Bit => "BIT",
            ColumnType::Integer => "INTEGER",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Text => "TEXT",
            ColumnType::Bit => "BIT",
            ColumnType::Integer => "INTEGER",
            ColumnType::DateTime => "DATETIME",
        };
        f.write_str(name)
    }
}

/// One column of a table.
///
/// `primary_key` and `auto_increment` are only rendered for `INTEGER`
/// columns; on any other kind they are ignored by [`Column::sql`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub allow_null: bool,
}

impl Column {
    pub const fn new(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            primary_key: false,
            auto_increment: false,
            allow_null: true,
        }
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, ColumnType::Text)
    }

    pub const fn bit(name: &'static str) -> Self {
        Self::new(name, ColumnType::Bit)
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, ColumnType::Integer)
    }

    pub const fn datetime(name: &'static str) -> Self {
        Self::new(name, ColumnType::DateTime)
    }

    pub const fn primary_key(self) -> Self {
        Self {
            primary_key: true,
            ..self
        }
    }

    pub const fn auto_increment(self) -> Self {
        Self {
            auto_increment: true,
            ..self
        }
    }

    pub const fn not_null(self) -> Self {
        Self {
            allow_null: false,
            ..self
        }
    }

    /// Column definition as it appears inside `CREATE TABLE (...)`.
    pub fn sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.column_type.sql_type());

        if self.column_type == ColumnType::Integer && self.primary_key {
            sql.push_str(" PRIMARY KEY");
            // SQLite rejects AUTOINCREMENT on anything but an INTEGER PRIMARY KEY
            if self.auto_increment {
                sql.push_str(" AUTOINCREMENT");
            }
        }

        if !self.allow_null {
            sql.push_str(" NOT NULL");
        }

        sql
    }
}
