//! Row-wise concatenation of tables
//!
//! Column sets do not have to match. The result carries the union of all
//! columns in first-appearance order, and cells a source table did not have
//! are filled with [`Value::Null`](crate::table::Value::Null). No other
//! reconciliation (renaming, type coercion, joining) is attempted.

use crate::error::Error;
use crate::table::{Column, Table};
use eyre::Result;

/// Concatenate `tables` in order into one table with a fresh row index
///
/// # Errors
/// Returns [`Error::NoInputs`] when `tables` is empty.
///
/// # Example
/// ```
/// use tabmerge::merger;
/// use tabmerge::table::{Column, Table, Value};
///
/// let a = Table::from_columns(vec![Column::new("id", vec![Value::Int(1)])]).unwrap();
/// let b = Table::from_columns(vec![Column::new("id", vec![Value::Int(2), Value::Int(3)])]).unwrap();
///
/// let merged = merger::concat(vec![a, b]).unwrap();
/// assert_eq!(merged.height(), 3);
/// assert_eq!(merged.column_names(), vec!["id"]);
/// ```
pub fn concat(tables: Vec<Table>) -> Result<Table> {
    let mut tables = tables.into_iter();
    let Some(mut merged) = tables.next() else {
        return Err(Error::NoInputs.into());
    };

    for table in tables {
        append(&mut merged, &table);
    }

    Ok(merged)
}

fn append(merged: &mut Table, table: &Table) {
    let before = merged.height();

    for column in merged.columns_mut() {
        match table.column(column.name()) {
            Some(other) => column.extend_from(other),
            None => column.extend_nulls(table.height()),
        }
    }

    for other in table.columns() {
        if !merged.has_column(other.name()) {
            let mut column = Column::new(other.name(), Vec::with_capacity(before + other.len()));
            column.extend_nulls(before);
            column.extend_from(other);
            merged.push_column(column);
        }
    }

    merged.set_height(before + table.height());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    fn table(columns: &[&str], rows: usize, start: i64) -> Table {
        Table::from_columns(
            columns
                .iter()
                .map(|name| {
                    Column::new(
                        *name,
                        (0..rows).map(|i| Value::Int(start + i as i64)).collect(),
                    )
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_single_table_unchanged() {
        let input = table(&["id", "name"], 3, 0);
        let merged = concat(vec![input.clone()]).unwrap();
        assert_eq!(merged, input);
    }

    #[test]
    fn test_matching_columns_sum_rows() {
        let merged = concat(vec![
            table(&["id", "name"], 2, 0),
            table(&["id", "name"], 3, 10),
            table(&["id", "name"], 0, 0),
        ])
        .unwrap();

        assert_eq!(merged.height(), 5);
        assert_eq!(merged.column_names(), vec!["id", "name"]);
        let ids: Vec<_> = merged.column("id").unwrap().values().to_vec();
        assert_eq!(
            ids,
            vec![
                Value::Int(0),
                Value::Int(1),
                Value::Int(10),
                Value::Int(11),
                Value::Int(12)
            ]
        );
    }

    #[test]
    fn test_differing_columns_union_with_nulls() {
        let merged = concat(vec![table(&["id", "name"], 1, 0), table(&["email", "id"], 2, 5)]).unwrap();

        assert_eq!(merged.column_names(), vec!["id", "name", "email"]);
        assert_eq!(merged.height(), 3);
        assert_eq!(
            merged.column("name").unwrap().values(),
            &[Value::Int(0), Value::Null, Value::Null]
        );
        assert_eq!(
            merged.column("email").unwrap().values(),
            &[Value::Null, Value::Int(5), Value::Int(6)]
        );
        assert_eq!(
            merged.column("id").unwrap().values(),
            &[Value::Int(0), Value::Int(5), Value::Int(6)]
        );
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let err = concat(vec![]).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::NoInputs)));
    }
}
