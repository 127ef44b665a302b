//! Fluent WHERE / ORDER BY builder.
//!
//! A [`Filter`] stores predicates and orderings unrendered. Placeholders are
//! only allocated when the filter is rendered against a [`Params`] binder, so
//! the same filter can be embedded after other bound values (the `SET` list of
//! an `UPDATE`) without reusing a placeholder name.

use crate::params::{Params, SqlQuery};
use crate::value::Value;

/// Table alias used by [`Filter::build`].
pub const TABLE_ALIAS: &str = "_t";

/// Query operators for building predicates
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOperator {
    Equal(Value),
    NotEqual(Value),
    GreaterThan(Value),
    GreaterThanOrEqual(Value),
    LessThan(Value),
    LessThanOrEqual(Value),
    Like(String),
    In(Vec<Value>),
    IsNull,
    IsNotNull,
}

impl QueryOperator {
    fn render(&self, column: &str, params: &mut Params) -> String {
        let compare = |op: &str, value: &Value, params: &mut Params| {
            format!("{column} {op} {}", params.bind(value.clone()))
        };

        match self {
            QueryOperator::Equal(v) => compare("=", v, params),
            QueryOperator::NotEqual(v) => compare("<>", v, params),
            QueryOperator::GreaterThan(v) => compare(">", v, params),
            QueryOperator::GreaterThanOrEqual(v) => compare(">=", v, params),
            QueryOperator::LessThan(v) => compare("<", v, params),
            QueryOperator::LessThanOrEqual(v) => compare("<=", v, params),
            QueryOperator::Like(pattern) => {
                format!("{column} LIKE {}", params.bind(pattern.as_str()))
            }
            // `IN ()` is a syntax error in SQLite; an empty set matches nothing.
            QueryOperator::In(values) if values.is_empty() => "0 = 1".to_string(),
            QueryOperator::In(values) => {
                let placeholders: Vec<String> =
                    values.iter().map(|v| params.bind(v.clone())).collect();
                format!("{column} IN ({})", placeholders.join(","))
            }
            QueryOperator::IsNull => format!("{column} IS NULL"),
            QueryOperator::IsNotNull => format!("{column} IS NOT NULL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    fn as_sql(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Predicate {
    column: String,
    op: QueryOperator,
}

#[derive(Debug, Clone, PartialEq)]
struct OrderClause {
    column: String,
    order: Order,
}

/// WHERE / ORDER BY description for one query.
///
/// ```
/// use rust_sqlite_orm::Filter;
///
/// let query = Filter::new().equal("key", "a").equal("value", "b").build("config");
/// assert_eq!(
///     query.statement,
///     "SELECT _t.* FROM config _t WHERE key = @p0 AND value = @p1"
/// );
/// assert_eq!(query.params.len(), 2);
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Filter {
    where_clauses: Vec<Predicate>,
    order_clauses: Vec<OrderClause>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate. Predicates are joined with `AND` in insertion order.
    pub fn condition(mut self, column: &str, op: QueryOperator) -> Self {
        self.where_clauses.push(Predicate {
            column: column.to_string(),
            op,
        });
        self
    }

    pub fn equal(self, column: &str, value: impl Into<Value>) -> Self {
        self.condition(column, QueryOperator::Equal(value.into()))
    }

    pub fn not_equal(self, column: &str, value: impl Into<Value>) -> Self {
        self.condition(column, QueryOperator::NotEqual(value.into()))
    }

    pub fn greater_than(self, column: &str, value: impl Into<Value>) -> Self {
        self.condition(column, QueryOperator::GreaterThan(value.into()))
    }

    pub fn less_than(self, column: &str, value: impl Into<Value>) -> Self {
        self.condition(column, QueryOperator::LessThan(value.into()))
    }

    pub fn like(self, column: &str, pattern: impl Into<String>) -> Self {
        self.condition(column, QueryOperator::Like(pattern.into()))
    }

    pub fn is_in<V: Into<Value>>(self, column: &str, values: impl IntoIterator<Item = V>) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.condition(column, QueryOperator::In(values))
    }

    pub fn is_null(self, column: &str) -> Self {
        self.condition(column, QueryOperator::IsNull)
    }

    pub fn is_not_null(self, column: &str) -> Self {
        self.condition(column, QueryOperator::IsNotNull)
    }

    pub fn order_by(mut self, column: &str, order: Order) -> Self {
        self.order_clauses.push(OrderClause {
            column: column.to_string(),
            order,
        });
        self
    }

    /// Whether any WHERE predicate has been added. Ordering alone does not count.
    pub fn has_predicates(&self) -> bool {
        !self.where_clauses.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.where_clauses.is_empty() && self.order_clauses.is_empty()
    }

    /// Full `SELECT` over `table`, aliased as [`TABLE_ALIAS`].
    pub fn build(&self, table: &str) -> SqlQuery {
        let mut params = Params::new();
        let mut statement = format!("SELECT {TABLE_ALIAS}.* FROM {table} {TABLE_ALIAS}");
        let fragment = self.build_fragment_into(&mut params);
        if !fragment.is_empty() {
            statement.push(' ');
            statement.push_str(&fragment);
        }
        SqlQuery::new(statement).with_params(params)
    }

    /// `WHERE … ORDER BY …` without the `SELECT` prefix. Empty when the filter is empty.
    pub fn build_fragment(&self) -> SqlQuery {
        let mut params = Params::new();
        let statement = self.build_fragment_into(&mut params);
        SqlQuery::new(statement).with_params(params)
    }

    /// Render `WHERE … ORDER BY …`, binding values into `params`.
    pub fn build_fragment_into(&self, params: &mut Params) -> String {
        let where_clause = self.build_where_into(params);
        let order_clause = self.build_order();
        match (where_clause.is_empty(), order_clause.is_empty()) {
            (true, _) => order_clause,
            (false, true) => where_clause,
            (false, false) => format!("{where_clause} {order_clause}"),
        }
    }

    /// Render only the `WHERE …` part, binding values into `params`.
    pub fn build_where_into(&self, params: &mut Params) -> String {
        if self.where_clauses.is_empty() {
            return String::new();
        }
        let predicates: Vec<String> = self
            .where_clauses
            .iter()
            .map(|p| p.op.render(&p.column, params))
            .collect();
        format!("WHERE {}", predicates.join(" AND "))
    }

    fn build_order(&self) -> String {
        if self.order_clauses.is_empty() {
            return String::new();
        }
        let orders: Vec<String> = self
            .order_clauses
            .iter()
            .map(|o| format!("{} {}", o.column, o.order.as_sql()))
            .collect();
        format!("ORDER BY {}", orders.join(" , "))
    }
}
