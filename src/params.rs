use crate::value::Value;

/// A named placeholder and the value bound to it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundParam {
    /// Placeholder as it appears in the statement text, prefix included (`@p0`).
    pub name: String,
    pub value: Value,
}

/// Parameter bindings for SQL queries.
///
/// Order is the order of binding, which is also the order placeholders appear
/// in every statement this crate generates.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Params {
    pub entries: Vec<BoundParam>,
}

impl Params {
    /// Create a new Params object
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` under the next free placeholder and return that placeholder.
    ///
    /// Placeholders are `@p<N>`. `N` starts at the number of values already
    /// bound and skips any name taken through [`Params::with_value`], so names
    /// never repeat within one statement.
    pub fn bind(&mut self, value: impl Into<Value>) -> String {
        let mut index = self.entries.len();
        let mut name = format!("@p{index}");
        while self.contains(&name) {
            index += 1;
            name = format!("@p{index}");
        }
        self.entries.push(BoundParam {
            name: name.clone(),
            value: value.into(),
        });
        name
    }

    /// Add a value under an explicit placeholder name, for hand-written statements.
    pub fn with_value(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.entries.push(BoundParam {
            name: name.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoundParam> {
        self.entries.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|p| &p.value)
    }
}

/// SQL statement with its bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub statement: String,
    pub params: Params,
}

impl SqlQuery {
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            params: Params::new(),
        }
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }
}
