#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDateTime;
use futures::lock::Mutex;
use rust_sqlite_orm::{Column, Executor, Result, Row, SqlQuery, Table};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub key: String,
    pub value: Option<String>,
}

impl Config {
    pub fn new(key: &str, value: Option<&str>) -> Self {
        Self {
            key: key.to_string(),
            value: value.map(str::to_string),
        }
    }
}

impl Table for Config {
    const TABLE_NAME: &'static str = "config";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[Column::text("key"), Column::text("value")];
        COLUMNS
    }

    fn to_row(&self) -> Row {
        Row::new()
            .with("key", &self.key)
            .with("value", self.value.clone())
    }

    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            key: row.field("key")?.unwrap_or_default(),
            value: row.field("value")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Account {
    pub id: Option<i64>,
    pub name: String,
    pub logins: i32,
    pub active: bool,
    pub created: Option<NaiveDateTime>,
}

impl Table for Account {
    const TABLE_NAME: &'static str = "accounts";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            Column::integer("id").primary_key().auto_increment(),
            Column::text("name").not_null(),
            Column::integer("logins"),
            Column::bit("active"),
            Column::datetime("created"),
        ];
        COLUMNS
    }

    fn to_row(&self) -> Row {
        Row::new()
            .with("id", self.id)
            .with("name", &self.name)
            .with("logins", self.logins)
            .with("active", self.active)
            .with("created", self.created)
    }

    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.field("id")?,
            name: row.field("name")?.unwrap_or_default(),
            logins: row.field("logins")?.unwrap_or_default(),
            active: row.field("active")?.unwrap_or_default(),
            created: row.field("created")?,
        })
    }
}

/// Executor that records statements and answers queries from a canned result.
#[derive(Default)]
pub struct RecordingExecutor {
    pub statements: Mutex<Vec<SqlQuery>>,
    pub rows: Vec<Row>,
}

impl RecordingExecutor {
    pub fn returning(rows: Vec<Row>) -> Self {
        Self {
            statements: Mutex::new(Vec::new()),
            rows,
        }
    }

    pub async fn recorded(&self) -> Vec<SqlQuery> {
        self.statements.lock().await.clone()
    }
}

#[async_trait]
impl Executor for RecordingExecutor {
    async fn execute(&self, query: &SqlQuery) -> Result<usize> {
        self.statements.lock().await.push(query.clone());
        Ok(1)
    }

    async fn query(&self, query: &SqlQuery) -> Result<Vec<Row>> {
        self.statements.lock().await.push(query.clone());
        Ok(self.rows.clone())
    }
}
