//! Sort expressions, state and ordering.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::columns::ColumnConfig;
use crate::record::{Record, Value};

/// Custom ordering function overriding the default comparer.
pub type Comparer = Arc<dyn Fn(Option<&Value>, Option<&Value>) -> Ordering + Send + Sync>;

/// Tri-state sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
    /// Unsorted. Never stored in the sort state; setting it removes the
    /// expression.
    None,
}

impl SortDirection {
    /// Advance through the tri-state cycle
    /// `ascending -> descending -> none -> ascending`.
    pub fn advance(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::None,
            SortDirection::None => SortDirection::Ascending,
        }
    }
}

/// Sort mode for the whole grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// A new expression clears all others first.
    #[default]
    Single,
    /// Expressions accumulate; insertion order is priority order.
    Multiple,
}

/// A per-column sorting expression.
///
/// `case_sensitive` and `comparer` are frozen from the column's sort
/// options when the expression is created and keep their values until the
/// expression is re-derived.
#[derive(Clone)]
pub struct SortingExpression {
    /// Column key. Sortable columns use field-backed keys, so the key is
    /// also the resolution path.
    pub key: String,
    /// Current direction.
    pub direction: SortDirection,
    /// Compare string values case sensitively.
    pub case_sensitive: bool,
    /// Custom comparer, if the column configured one.
    pub comparer: Option<Comparer>,
}

impl SortingExpression {
    /// Create an ascending expression with default options.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
            case_sensitive: false,
            comparer: None,
        }
    }

    /// Set the direction.
    pub fn direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set case sensitivity.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    fn resolve_options(mut self, column: &ColumnConfig) -> Self {
        if let Some(options) = &column.sort {
            self.case_sensitive = options.case_sensitive;
            self.comparer = options.comparer.clone();
        } else {
            self.case_sensitive = false;
            self.comparer = None;
        }
        self
    }
}

impl fmt::Debug for SortingExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortingExpression")
            .field("key", &self.key)
            .field("direction", &self.direction)
            .field("case_sensitive", &self.case_sensitive)
            .field("comparer", &self.comparer.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Insertion-ordered sort state.
///
/// Insertion order is the multi-column tie-break priority: the first
/// inserted expression is the primary sort key. An expression with
/// direction `None` is never stored; re-sorting a removed column appends
/// it at the end of the priority order.
#[derive(Debug, Clone, Default)]
pub struct SortState {
    expressions: Vec<SortingExpression>,
}

impl SortState {
    /// Create an empty sort state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active expressions.
    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    /// Check if no expression is active.
    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Get the expression for a column key.
    pub fn get(&self, key: &str) -> Option<&SortingExpression> {
        self.expressions.iter().find(|e| e.key == key)
    }

    /// Check if a column key has an active expression.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Active expressions in priority order.
    pub fn expressions(&self) -> &[SortingExpression] {
        &self.expressions
    }

    /// Prepare the next expression for a column header interaction.
    ///
    /// If the column has no active expression, synthesizes an ascending
    /// one; otherwise advances the existing direction through the
    /// tri-state cycle in place. The state itself is not mutated; callers
    /// commit via [`SortState::sort`].
    pub fn prepare_expression(&self, column: &ColumnConfig) -> SortingExpression {
        match self.get(&column.key) {
            Some(existing) => {
                let mut expr = existing.clone().resolve_options(column);
                expr.direction = existing.direction.advance();
                expr
            }
            None => SortingExpression::new(&column.key).resolve_options(column),
        }
    }

    /// The prospective expression list if `candidate` were committed,
    /// in priority order.
    pub fn prospective(&self, candidate: &SortingExpression) -> Vec<SortingExpression> {
        let mut list = self.expressions.clone();
        match list.iter_mut().find(|e| e.key == candidate.key) {
            Some(existing) => *existing = candidate.clone(),
            None => list.push(candidate.clone()),
        }
        list
    }

    /// Merge one or more expressions into the state.
    ///
    /// An existing key is updated in place, keeping its priority
    /// position; a new key is appended. Direction `None` removes the key
    /// instead of storing it.
    pub fn sort(&mut self, expressions: impl IntoIterator<Item = SortingExpression>) {
        for expression in expressions {
            self.set(expression);
        }
    }

    fn set(&mut self, expression: SortingExpression) {
        if expression.direction == SortDirection::None {
            self.reset(Some(&expression.key));
            return;
        }
        match self.expressions.iter_mut().find(|e| e.key == expression.key) {
            Some(existing) => *existing = expression,
            None => self.expressions.push(expression),
        }
    }

    /// Clear one column's expression, or the entire state.
    pub fn reset(&mut self, key: Option<&str>) {
        match key {
            Some(key) => self.expressions.retain(|e| e.key != key),
            None => self.expressions.clear(),
        }
    }

    /// Stable-sort a view of `records` by the active expressions.
    ///
    /// Expressions apply in priority order; ties fall through to the next
    /// expression, and the final tie order preserves the incoming order.
    pub fn apply(&self, records: &[Record], indices: &mut [usize]) {
        if self.expressions.is_empty() {
            return;
        }
        indices.sort_by(|&a, &b| self.compare_rows(&records[a], &records[b]));
    }

    fn compare_rows(&self, a: &Record, b: &Record) -> Ordering {
        for expr in &self.expressions {
            let va = a.resolve(&expr.key);
            let vb = b.resolve(&expr.key);
            let ordering = match &expr.comparer {
                Some(comparer) => comparer(va, vb),
                None => default_compare(va, vb, expr.case_sensitive),
            };
            let ordering = match expr.direction {
                SortDirection::Descending => ordering.reverse(),
                _ => ordering,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Rank used when values of different types meet under one column.
fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::Float(_) => 2,
        Value::String(_) => 3,
        Value::DateTime(_) => 4,
        Value::Record(_) => 5,
    }
}

/// Default comparer.
///
/// Missing values and nulls sort first. Strings compare case-insensitively
/// unless `case_sensitive`; other types use their natural ordering. Values
/// of different types order by type rank so the result stays total and
/// deterministic.
pub fn default_compare(a: Option<&Value>, b: Option<&Value>, case_sensitive: bool) -> Ordering {
    let (a, b) = match (filter_null(a), filter_null(b)) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Less,
        (Some(_), None) => return Ordering::Greater,
        (Some(a), Some(b)) => (a, b),
    };

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => {
            if case_sensitive {
                x.cmp(y)
            } else {
                x.to_lowercase().cmp(&y.to_lowercase())
            }
        }
        (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => type_rank(a).cmp(&type_rank(b)),
        },
    }
}

fn filter_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}
