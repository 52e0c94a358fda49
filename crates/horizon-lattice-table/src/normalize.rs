//! Flattening of arbitrary JSON into rows and columns.

use serde_json::{Map, Value};

use crate::render::render_value;
use crate::table::TabularResult;
use crate::targets;

/// Column used for scalars that have no wrapping property name.
pub const SCALAR_COLUMN: &str = "value";

/// Flatten a JSON value into a table.
///
/// The shape of the table depends on the runtime type of `data`:
///
/// - **Array**: one row per element. Object elements contribute one cell per
///   property; any other element becomes a single [`SCALAR_COLUMN`] cell.
/// - **Object**: the first property (in document order) holding a non-empty
///   array is tabulated as above, with non-object elements placed in a
///   column named after that property. Sibling properties are dropped. An
///   object with a single object-valued property (a GraphQL root field
///   wrapper such as `{"user": {...}}`) is searched the same way, one level
///   at a time. If no array is found, the object becomes a single row of all
///   its own properties.
/// - **Scalar or null**: a single row with a single [`SCALAR_COLUMN`] cell.
///
/// Never fails. Nested arrays and objects inside cells are rendered as JSON
/// text, see [`render_value`].
///
/// # Example
///
/// ```
/// use horizon_lattice_table::to_table;
/// use serde_json::json;
///
/// let table = to_table(&json!({"user": {"id": 1}, "posts": [{"title": "x"}]}));
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.cell(0, "title"), "x");
/// ```
pub fn to_table(data: &Value) -> TabularResult {
    let mut table = TabularResult::new();

    match data {
        Value::Array(items) => {
            tracing::trace!(target: targets::TABLE, "Tabulating top-level array of {} items", items.len());
            push_items(&mut table, items, SCALAR_COLUMN);
        }
        Value::Object(fields) => match find_row_source(fields) {
            Some((name, items)) => {
                tracing::trace!(target: targets::TABLE, "Tabulating array property '{}' ({} items)", name, items.len());
                push_items(&mut table, items, name);
            }
            None => {
                tracing::trace!(target: targets::TABLE, "No array property, tabulating object as one row");
                push_object(&mut table, fields);
            }
        },
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            tracing::trace!(target: targets::TABLE, "Tabulating scalar");
            table.push_row([(SCALAR_COLUMN.to_string(), render_value(data))]);
        }
    }

    table
}

/// Locate the array to tabulate, looking through single-field wrappers.
fn find_row_source(fields: &Map<String, Value>) -> Option<(&str, &[Value])> {
    let mut current = fields;
    loop {
        if let Some(found) = first_non_empty_array(current) {
            return Some(found);
        }
        current = single_object_wrapper(current)?;
    }
}

/// The inner object of `{"name": {...}}`.
fn single_object_wrapper(fields: &Map<String, Value>) -> Option<&Map<String, Value>> {
    if fields.len() != 1 {
        return None;
    }
    fields.values().next()?.as_object()
}

/// The first property whose value is an array with at least one element.
fn first_non_empty_array(fields: &Map<String, Value>) -> Option<(&str, &[Value])> {
    fields.iter().find_map(|(name, value)| match value {
        Value::Array(items) if !items.is_empty() => Some((name.as_str(), items.as_slice())),
        _ => None,
    })
}

fn push_items(table: &mut TabularResult, items: &[Value], fallback_column: &str) {
    for item in items {
        match item {
            Value::Object(fields) => push_object(table, fields),
            other => table.push_row([(fallback_column.to_string(), render_value(other))]),
        }
    }
}

fn push_object(table: &mut TabularResult, fields: &Map<String, Value>) {
    table.push_row(
        fields
            .iter()
            .map(|(name, value)| (name.clone(), render_value(value))),
    );
}
