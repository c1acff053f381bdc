//! # Presets Module
//!
//! Ready-made criteria.
//!
//! Type checks and pattern matches work on `serde_json::Value` leaves;
//! `equals` and `one_of` work on any leaf type with `PartialEq`. Factories
//! that can be handed bad input (an unknown type tag, an invalid pattern)
//! fail at construction with `NestError::InvalidPredicate`, never at
//! evaluation time.

use crate::criteria::Criterion;
use crate::structure::extract;
use crate::types::{Nest, NestError};
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// TYPE CHECKS
// =============================================================================

/// Runtime type of a JSON leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeTag {
    String,
    Number,
    Boolean,
    Null,
    Object,
}

impl TypeTag {
    /// The tag of a leaf. Arrays are sequences, not leaves, and never reach
    /// this; should one appear as a leaf value it is reported as `Object`.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => Self::String,
            Value::Number(_) => Self::Number,
            Value::Bool(_) => Self::Boolean,
            Value::Null => Self::Null,
            Value::Object(_) | Value::Array(_) => Self::Object,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Object => "object",
        }
    }
}

impl FromStr for TypeTag {
    type Err = NestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "boolean" | "bool" => Ok(Self::Boolean),
            "null" => Ok(Self::Null),
            "object" => Ok(Self::Object),
            other => Err(NestError::InvalidPredicate(format!(
                "unknown type tag '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Criterion matching leaves of one runtime type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeCheck(pub TypeTag);

impl Criterion<Value> for TypeCheck {
    fn test(
        &self,
        value: &Value,
        _index: usize,
        _container: &[Nest<Value>],
    ) -> Result<bool, NestError> {
        Ok(TypeTag::of(value) == self.0)
    }
}

/// Build a type-check criterion from a type tag such as `"string"`.
pub fn type_check_each(tag: &str) -> Result<TypeCheck, NestError> {
    tag.parse().map(TypeCheck)
}

/// Whether every leaf, at any depth, has the given type. Vacuously true
/// for a nest without leaves.
#[must_use]
pub fn type_check_all(items: &[Nest<Value>], tag: TypeTag) -> bool {
    extract(items).into_iter().all(|value| TypeTag::of(value) == tag)
}

// =============================================================================
// VALUE CHECKS
// =============================================================================

/// Criterion matching every non-null leaf.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotNull;

impl Criterion<Value> for NotNull {
    fn test(
        &self,
        value: &Value,
        _index: usize,
        _container: &[Nest<Value>],
    ) -> Result<bool, NestError> {
        Ok(!value.is_null())
    }
}

#[must_use]
pub const fn not_null() -> NotNull {
    NotNull
}

/// Criterion matching leaves equal to a fixed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Equals<T>(pub T);

impl<T: PartialEq> Criterion<T> for Equals<T> {
    fn test(&self, value: &T, _index: usize, _container: &[Nest<T>]) -> Result<bool, NestError> {
        Ok(*value == self.0)
    }
}

pub fn equals<T: PartialEq>(expected: T) -> Equals<T> {
    Equals(expected)
}

/// Criterion matching leaves equal to any of a set of values.
#[derive(Debug, Clone, PartialEq)]
pub struct OneOf<T>(pub Vec<T>);

impl<T: PartialEq> Criterion<T> for OneOf<T> {
    fn test(&self, value: &T, _index: usize, _container: &[Nest<T>]) -> Result<bool, NestError> {
        Ok(self.0.contains(value))
    }
}

pub fn one_of<T: PartialEq>(candidates: Vec<T>) -> OneOf<T> {
    OneOf(candidates)
}

// =============================================================================
// PATTERN MATCH
// =============================================================================

/// Criterion matching string leaves against a regular expression.
/// Non-string leaves never match.
#[derive(Debug, Clone)]
pub struct Matches(Regex);

impl Matches {
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.0.as_str()
    }
}

impl Criterion<Value> for Matches {
    fn test(
        &self,
        value: &Value,
        _index: usize,
        _container: &[Nest<Value>],
    ) -> Result<bool, NestError> {
        Ok(value.as_str().is_some_and(|s| self.0.is_match(s)))
    }
}

/// Build a pattern criterion.
pub fn matches(pattern: &str) -> Result<Matches, NestError> {
    Regex::new(pattern)
        .map(Matches)
        .map_err(|e| NestError::InvalidPredicate(format!("invalid pattern '{}': {}", pattern, e)))
}

// =============================================================================
// TESTS
// =============================================================================
