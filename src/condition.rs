//! Plain value objects callers use to describe filters, projections and
//! assignments.

use std::fmt;
use std::str::FromStr;

use crate::error::DbError;
use crate::value::Value;

/// Comparison applied by a [Condition].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NotEqual,
}

impl Operator {
    /// Applies the operator to a stored value and the condition's value.
    pub fn eval(self, stored: &Value, expected: &Value) -> bool {
        match self {
            Operator::Equal => stored == expected,
            Operator::NotEqual => stored != expected,
        }
    }
}

impl FromStr for Operator {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(Operator::Equal),
            "!=" => Ok(Operator::NotEqual),
            other => Err(DbError::UnsupportedOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Equal => write!(f, "="),
            Operator::NotEqual => write!(f, "!="),
        }
    }
}

/// `column <op> value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub op: Operator,
    pub value: Value,
}

impl Condition {
    pub fn new(column: impl Into<String>, op: Operator, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    pub fn equal(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::Equal, value)
    }

    pub fn not_equal(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::NotEqual, value)
    }

    /// Builds a condition from a textual operator tag (`"="` or `"!="`).
    ///
    /// # Errors
    /// Returns [DbError::UnsupportedOperator] for any other tag.
    pub fn parse(
        column: impl Into<String>,
        op: &str,
        value: impl Into<Value>,
    ) -> Result<Self, DbError> {
        Ok(Self::new(column, op.parse()?, value))
    }
}

/// `SET column = value` in an update.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: String,
    pub value: Value,
}

impl Assignment {
    pub fn new(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// Which values a select returns for each matching row.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// `*`: every value of the row, in storage order.
    All,
    /// Named columns, returned in the order given.
    Columns(Vec<String>),
}

impl Projection {
    /// Builds a projection from a list of names, where a single `"*"` entry
    /// means [Projection::All].
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        match names {
            [only] if only.as_ref() == "*" => Projection::All,
            _ => Projection::Columns(names.iter().map(|n| n.as_ref().to_string()).collect()),
        }
    }
}
