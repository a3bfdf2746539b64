//! Per-column filter predicates and state.

use std::fmt;
use std::sync::Arc;

use crate::record::{Record, Value};

type Predicate = Arc<dyn Fn(Option<&Value>) -> bool + Send + Sync>;

/// An active filter predicate for one column.
///
/// Predicates receive the field value resolved through the record's dotted
/// path, so filters are nested-field aware. Constructors cover the common
/// conditions; [`FilterExpression::custom`] accepts any closure.
#[derive(Clone)]
pub struct FilterExpression {
    /// Column key (also the resolution path).
    pub key: String,
    predicate: Predicate,
}

impl FilterExpression {
    /// Filter with an arbitrary predicate.
    pub fn custom(
        key: impl Into<String>,
        predicate: impl Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Value equals the given one.
    pub fn equals(key: impl Into<String>, expected: impl Into<Value>) -> Self {
        let expected = expected.into();
        Self::custom(key, move |v| v == Some(&expected))
    }

    /// Value differs from the given one.
    pub fn not_equals(key: impl Into<String>, expected: impl Into<Value>) -> Self {
        let expected = expected.into();
        Self::custom(key, move |v| v != Some(&expected))
    }

    /// String value contains the given term.
    pub fn contains(key: impl Into<String>, term: impl Into<String>, case_sensitive: bool) -> Self {
        let term = fold_case(term.into(), case_sensitive);
        Self::custom(key, move |v| {
            v.and_then(Value::as_str)
                .is_some_and(|s| fold_case(s.to_string(), case_sensitive).contains(&term))
        })
    }

    /// String value starts with the given term.
    pub fn starts_with(
        key: impl Into<String>,
        term: impl Into<String>,
        case_sensitive: bool,
    ) -> Self {
        let term = fold_case(term.into(), case_sensitive);
        Self::custom(key, move |v| {
            v.and_then(Value::as_str)
                .is_some_and(|s| fold_case(s.to_string(), case_sensitive).starts_with(&term))
        })
    }

    /// Numeric value greater than the given threshold.
    pub fn greater_than(key: impl Into<String>, threshold: f64) -> Self {
        Self::custom(key, move |v| {
            v.and_then(Value::as_f64).is_some_and(|n| n > threshold)
        })
    }

    /// Numeric value less than the given threshold.
    pub fn less_than(key: impl Into<String>, threshold: f64) -> Self {
        Self::custom(key, move |v| {
            v.and_then(Value::as_f64).is_some_and(|n| n < threshold)
        })
    }

    /// Value is missing or null.
    pub fn empty(key: impl Into<String>) -> Self {
        Self::custom(key, |v| v.is_none_or(Value::is_null))
    }

    /// Test a record against this predicate.
    pub fn matches(&self, record: &Record) -> bool {
        (self.predicate)(record.resolve(&self.key))
    }
}

impl fmt::Debug for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterExpression")
            .field("key", &self.key)
            .field("predicate", &"<fn>")
            .finish()
    }
}

fn fold_case(s: String, case_sensitive: bool) -> String {
    if case_sensitive { s } else { s.to_lowercase() }
}

/// Active filter state.
///
/// Holds at most one predicate per column plus the column whose filter
/// editor is currently open. A record passes the filter stage only if it
/// satisfies every active predicate.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    expressions: Vec<FilterExpression>,
    active_column: Option<String>,
}

impl FilterState {
    /// Create an empty filter state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active predicates.
    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    /// Check if no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// The column whose filter editor is open, if any.
    pub fn active_column(&self) -> Option<&str> {
        self.active_column.as_deref()
    }

    /// Open the filter editor for a column.
    ///
    /// Only one column may have an open editor; selecting a new column
    /// implicitly closes the previous one.
    pub fn set_active_column(&mut self, key: Option<impl Into<String>>) {
        self.active_column = key.map(Into::into);
    }

    /// Store or clear a per-column predicate.
    pub fn apply(&mut self, key: &str, expression: Option<FilterExpression>) {
        self.expressions.retain(|e| e.key != key);
        if let Some(expression) = expression {
            self.expressions.push(expression);
        }
    }

    /// Get the predicate for a column, if any.
    pub fn get(&self, key: &str) -> Option<&FilterExpression> {
        self.expressions.iter().find(|e| e.key == key)
    }

    /// Clear all predicates and close any open editor.
    pub fn clear(&mut self) {
        self.expressions.clear();
        self.active_column = None;
    }

    /// Test a record against every active predicate (logical AND).
    pub fn evaluate(&self, record: &Record) -> bool {
        self.expressions.iter().all(|e| e.matches(record))
    }
}
