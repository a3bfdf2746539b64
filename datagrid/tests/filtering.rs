//! Tests for per-column filtering and the filter editor column.

use std::sync::Arc;

use datagrid::prelude::*;

fn person(name: &str, age: i64, city: &str) -> Record {
    Record::new()
        .set("name", name)
        .set("age", age)
        .set("address", Record::new().set("city", city))
}

fn grid() -> Grid {
    let grid = Grid::new(
        vec![
            ColumnConfig::new("name").filterable(),
            ColumnConfig::new("age").data_type(DataType::Number).filterable(),
            ColumnConfig::new("address.city").filterable(),
            ColumnConfig::new("notes"),
        ],
        Arc::new(Window::new(1)),
    )
    .unwrap();
    grid.set_records(vec![
        person("Alice", 30, "Paris"),
        person("Bob", 45, "Lyon"),
        person("Carol", 38, "Paris"),
        person("Dan", 22, "Nice"),
    ]);
    grid
}

fn names(grid: &Grid) -> Vec<String> {
    (0..grid.len())
        .map(|row| grid.render_cell(row, "name").unwrap())
        .collect()
}

#[test]
fn test_single_predicate() {
    let grid = grid();
    let cx = GridContext::new();
    grid.apply_filter(
        "address.city",
        Some(FilterExpression::equals("address.city", "Paris")),
        &cx,
    )
    .unwrap();
    assert_eq!(names(&grid), ["Alice", "Carol"]);
    assert!(cx.has_event(GridEventKind::Filtered));
}

#[test]
fn test_predicates_compose_with_and() {
    let grid = grid();
    let cx = GridContext::new();
    grid.apply_filter("age", Some(FilterExpression::greater_than("age", 30.0)), &cx)
        .unwrap();
    grid.apply_filter(
        "address.city",
        Some(FilterExpression::equals("address.city", "Paris")),
        &cx,
    )
    .unwrap();
    // Only rows satisfying every predicate survive.
    assert_eq!(names(&grid), ["Carol"]);
}

#[test]
fn test_equals_pair_selects_single_record() {
    let grid = Grid::new(
        vec![
            ColumnConfig::new("age").filterable(),
            ColumnConfig::new("city").filterable(),
        ],
        Arc::new(Window::new(1)),
    )
    .unwrap();
    let cx = GridContext::new();
    grid.set_records(vec![
        Record::new().set("age", 20i64).set("city", "NY"),
        Record::new().set("age", 30i64).set("city", "NY"),
        Record::new().set("age", 20i64).set("city", "LA"),
    ]);
    grid.apply_filter("age", Some(FilterExpression::equals("age", 20i64)), &cx)
        .unwrap();
    grid.apply_filter("city", Some(FilterExpression::equals("city", "NY")), &cx)
        .unwrap();
    assert_eq!(grid.view_indices(), [0]);
}

#[test]
fn test_replacing_a_columns_predicate() {
    let grid = grid();
    let cx = GridContext::new();
    grid.apply_filter("age", Some(FilterExpression::greater_than("age", 30.0)), &cx)
        .unwrap();
    assert_eq!(names(&grid), ["Bob", "Carol"]);

    // A second predicate on the same column replaces, not stacks.
    grid.apply_filter("age", Some(FilterExpression::less_than("age", 30.0)), &cx)
        .unwrap();
    assert_eq!(names(&grid), ["Dan"]);
}

#[test]
fn test_clearing_one_predicate() {
    let grid = grid();
    let cx = GridContext::new();
    grid.apply_filter("age", Some(FilterExpression::greater_than("age", 30.0)), &cx)
        .unwrap();
    grid.apply_filter("age", None, &cx).unwrap();
    assert_eq!(grid.len(), 4);
}

#[test]
fn test_clear_all_filters() {
    let grid = grid();
    let cx = GridContext::new();
    grid.apply_filter("age", Some(FilterExpression::greater_than("age", 30.0)), &cx)
        .unwrap();
    grid.set_filter_active_column(Some("age")).unwrap();

    grid.clear_filters(&cx);
    assert_eq!(grid.len(), 4);
    assert_eq!(grid.filter_active_column(), None);
}

#[test]
fn test_contains_case_insensitive() {
    let grid = grid();
    let cx = GridContext::new();
    grid.apply_filter(
        "name",
        Some(FilterExpression::contains("name", "AR", false)),
        &cx,
    )
    .unwrap();
    assert_eq!(names(&grid), ["Carol"]);
}

#[test]
fn test_starts_with_case_sensitive() {
    let grid = grid();
    let cx = GridContext::new();
    grid.apply_filter(
        "name",
        Some(FilterExpression::starts_with("name", "a", true)),
        &cx,
    )
    .unwrap();
    assert!(grid.is_empty());
}

#[test]
fn test_empty_predicate_matches_missing_and_null() {
    let grid = Grid::new(
        vec![ColumnConfig::new("name").filterable()],
        Arc::new(Window::new(1)),
    )
    .unwrap();
    let cx = GridContext::new();
    grid.set_records(vec![
        Record::new().set("name", "set"),
        Record::new().set("name", Value::Null),
        Record::new(),
    ]);
    grid.apply_filter("name", Some(FilterExpression::empty("name")), &cx)
        .unwrap();
    assert_eq!(grid.view_indices(), [1, 2]);
}

#[test]
fn test_non_filterable_column_rejected() {
    let grid = grid();
    let cx = GridContext::new();
    assert_eq!(
        grid.apply_filter("notes", Some(FilterExpression::empty("notes")), &cx),
        Err(GridError::NotFilterable("notes".to_string()))
    );
    assert_eq!(
        grid.apply_filter("missing", None, &cx),
        Err(GridError::UnknownColumn("missing".to_string()))
    );
}

#[test]
fn test_active_editor_column_is_exclusive() {
    let grid = grid();
    grid.set_filter_active_column(Some("name")).unwrap();
    assert_eq!(grid.filter_active_column().as_deref(), Some("name"));

    // Opening another editor implicitly closes the first.
    grid.set_filter_active_column(Some("age")).unwrap();
    assert_eq!(grid.filter_active_column().as_deref(), Some("age"));

    grid.set_filter_active_column(None).unwrap();
    assert_eq!(grid.filter_active_column(), None);
}

#[test]
fn test_active_editor_requires_filterable_column() {
    let grid = grid();
    assert_eq!(
        grid.set_filter_active_column(Some("notes")),
        Err(GridError::NotFilterable("notes".to_string()))
    );
    assert_eq!(grid.filter_active_column(), None);
}

#[test]
fn test_custom_predicate() {
    let grid = grid();
    let cx = GridContext::new();
    grid.apply_filter(
        "name",
        Some(FilterExpression::custom("name", |v| {
            v.and_then(Value::as_str).is_some_and(|s| s.len() == 3)
        })),
        &cx,
    )
    .unwrap();
    assert_eq!(names(&grid), ["Bob", "Dan"]);
}
