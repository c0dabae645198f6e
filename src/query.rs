// Copyright (c) 2025 - Cowboy AI, Inc.
//! Queries and Selection Requests
//!
//! A [`Query`] is a single predicate `(operator, key, values)` over labels
//! or structured properties. A [`QueryRequest`] bundles the four selection
//! strategies a caller may use; at most one may be non-empty.
//!
//! # Arity Rules
//!
//! | Operator | Values |
//! |---|---|
//! | `Equal`, `NotEqual` | exactly one |
//! | `In`, `NotIn` | at least one |
//!
//! Operators travel as integer codes (`0..=3`). Unknown codes decode into
//! [`Operator::Unsupported`] so validation can report them instead of the
//! decoder.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{InventoryError, InventoryResult};

/// Comparison operator of a [`Query`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Operator {
    Equal,
    NotEqual,
    In,
    NotIn,
    /// Code outside the supported set
    Unsupported(i64),
}

impl Operator {
    /// Evaluate against a possibly absent value
    ///
    /// Absence never satisfies `Equal`/`In` and always satisfies
    /// `NotEqual`/`NotIn`.
    pub fn matches(&self, value: Option<&str>, values: &[String]) -> bool {
        let is_member = || value.is_some_and(|v| values.iter().any(|candidate| candidate == v));

        match self {
            Operator::Equal => value.is_some() && value == values.first().map(String::as_str),
            Operator::NotEqual => value.is_none() || value != values.first().map(String::as_str),
            Operator::In => is_member(),
            Operator::NotIn => !is_member(),
            Operator::Unsupported(_) => false,
        }
    }
}

impl From<i64> for Operator {
    fn from(code: i64) -> Self {
        match code {
            0 => Operator::Equal,
            1 => Operator::NotEqual,
            2 => Operator::In,
            3 => Operator::NotIn,
            other => Operator::Unsupported(other),
        }
    }
}

impl From<Operator> for i64 {
    fn from(op: Operator) -> Self {
        match op {
            Operator::Equal => 0,
            Operator::NotEqual => 1,
            Operator::In => 2,
            Operator::NotIn => 3,
            Operator::Unsupported(code) => code,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Equal => f.write_str("Equal"),
            Operator::NotEqual => f.write_str("NotEqual"),
            Operator::In => f.write_str("In"),
            Operator::NotIn => f.write_str("NotIn"),
            Operator::Unsupported(code) => write!(f, "Unsupported({code})"),
        }
    }
}

/// Single predicate over labels or properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    #[serde(alias = "Op")]
    pub op: Operator,

    #[serde(alias = "Key", default)]
    pub key: String,

    #[serde(alias = "Values", default)]
    pub values: Vec<String>,
}

impl Query {
    pub fn new<I, S>(op: Operator, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            op,
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Check the operator and its arity
    pub fn validate(&self) -> InventoryResult<()> {
        let actual = self.values.len();

        match self.op {
            Operator::Equal | Operator::NotEqual if actual != 1 => {
                Err(InventoryError::InvalidArity {
                    op: self.op,
                    expected: "exactly one value",
                    actual,
                })
            }
            Operator::In | Operator::NotIn if actual < 1 => Err(InventoryError::InvalidArity {
                op: self.op,
                expected: "at least one value",
                actual,
            }),
            Operator::Unsupported(_) => Err(InventoryError::InvalidOperator(self.op)),
            _ => Ok(()),
        }
    }
}

/// Validate every query, failing on the first invalid one
pub fn validate_queries(queries: &[Query]) -> InventoryResult<()> {
    queries.iter().try_for_each(Query::validate)
}

/// Selection request as received from the API layer
///
/// At most one of the four strategies may be non-empty; an empty request
/// selects everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryRequest {
    #[serde(alias = "IDs")]
    pub ids: Vec<String>,

    #[serde(alias = "Types")]
    pub types: Vec<String>,

    #[serde(alias = "Labels")]
    pub labels: Vec<Query>,

    #[serde(alias = "Properties")]
    pub properties: Vec<Query>,
}

/// The single strategy a validated request resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Ids(Vec<String>),
    Types(Vec<String>),
    /// Conjunction of label queries
    Labels(Vec<Query>),
    /// Conjunction of property queries
    Properties(Vec<Query>),
}

impl QueryRequest {
    /// Resolve to a [`Selection`]
    ///
    /// # Errors
    /// - [`InventoryError::ConflictingSelection`] when two or more strategies are set
    /// - the first query validation failure in `labels`/`properties`
    pub fn selection(self) -> InventoryResult<Selection> {
        let strategies = [
            !self.ids.is_empty(),
            !self.types.is_empty(),
            !self.labels.is_empty(),
            !self.properties.is_empty(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count();

        if strategies > 1 {
            return Err(InventoryError::ConflictingSelection(strategies));
        }

        if !self.ids.is_empty() {
            Ok(Selection::Ids(self.ids))
        } else if !self.types.is_empty() {
            Ok(Selection::Types(self.types))
        } else if !self.labels.is_empty() {
            validate_queries(&self.labels)?;
            Ok(Selection::Labels(self.labels))
        } else if !self.properties.is_empty() {
            validate_queries(&self.properties)?;
            Ok(Selection::Properties(self.properties))
        } else {
            Ok(Selection::All)
        }
    }
}
