//! Minimal object-relational mapping over SQLite.
//!
//! # Intention
//!
//! - Map plain record types to tables through an explicit [`Table`] implementation.
//! - Generate `CREATE TABLE`, `INSERT`, `UPDATE` and filtered `SELECT` statements
//!   with named, bound parameters.
//! - Convert result rows back into typed records.
//!
//! # Architectural Boundaries
//!
//! - Only SQLite/database code belongs here.
//! - No schema migration: a table is created once and never altered.
//! - No transactions, joins or connection pooling.

pub mod codec;
pub mod column;
pub mod config;
pub mod error;
pub mod filter;
pub mod params;
pub mod repository;
pub mod sql;
pub mod sqlite;
pub mod table;
pub mod value;

pub use codec::FromValue;
pub use column::{Column, ColumnType};
pub use config::{ErrorMode, SqliteConfig};
pub use error::{ConversionError, OrmError, Result};
pub use filter::{Filter, Order, QueryOperator};
pub use params::{BoundParam, Params, SqlQuery};
pub use repository::{AddOrUpdate, Database};
pub use sqlite::{Executor, SqliteExecutor};
pub use table::{Row, Schema, Table, TableSchema};
pub use value::Value;
