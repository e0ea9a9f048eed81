//! In-memory columnar tables
//!
//! A [`Table`] is an ordered list of uniquely named [`Column`]s of equal
//! length. Row positions are implicit, so every table always has a
//! contiguous `0..height` row index.

mod value;

pub use value::{NA_TOKENS, Value, infer_column};

use crate::error::Error;
use eyre::Result;
use std::collections::HashSet;

/// A named column of cells
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn extend_nulls(&mut self, count: usize) {
        self.values.extend(std::iter::repeat_n(Value::Null, count));
    }

    pub(crate) fn extend_from(&mut self, other: &Column) {
        self.values.extend_from_slice(&other.values);
    }
}

/// Ordered columns plus an implicit contiguous row index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    height: usize,
}

impl Table {
    /// An empty table with no columns and no rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from columns, checking names are unique and lengths match
    ///
    /// # Example
    /// ```
    /// use tabmerge::table::{Column, Table, Value};
    ///
    /// let table = Table::from_columns(vec![
    ///     Column::new("id", vec![Value::Int(1), Value::Int(2)]),
    ///     Column::new("name", vec!["a".into(), Value::Null]),
    /// ])
    /// .unwrap();
    /// assert_eq!(table.height(), 2);
    /// assert_eq!(table.column_names(), vec!["id", "name"]);
    /// ```
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let height = columns.first().map(Column::len).unwrap_or(0);
        let mut seen = HashSet::new();

        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(Error::DuplicateColumn(column.name().to_string()).into());
            }
            if column.len() != height {
                eyre::bail!(
                    "Column {:?} has {} values, expected {}",
                    column.name(),
                    column.len(),
                    height
                );
            }
        }

        Ok(Self { columns, height })
    }

    /// Build a table from a header and rows of cells
    ///
    /// Short rows are padded with nulls. Long rows are an error.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let width = headers.len();
        let mut columns: Vec<Vec<Value>> = vec![Vec::with_capacity(rows.len()); width];

        for (index, row) in rows.into_iter().enumerate() {
            if row.len() > width {
                eyre::bail!("Expected {} fields in row {}, saw {}", width, index, row.len());
            }
            let padding = width - row.len();
            let cells = row
                .into_iter()
                .chain(std::iter::repeat_n(Value::Null, padding));
            for (column, cell) in columns.iter_mut().zip(cells) {
                column.push(cell);
            }
        }

        Self::from_columns(
            headers
                .into_iter()
                .zip(columns)
                .map(|(name, values)| Column::new(name, values))
                .collect(),
        )
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Names from `names` that are not columns of this table, in input order
    pub fn missing_columns<'a>(&self, names: &'a [String]) -> Vec<&'a String> {
        names.iter().filter(|n| !self.has_column(n)).collect()
    }

    /// Cells of row `index` in column order
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        (index < self.height).then(|| self.columns.iter().map(|c| &c.values[index]).collect())
    }

    /// Iterate rows in order
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> + '_ {
        (0..self.height).map(move |i| self.columns.iter().map(|c| &c.values[i]).collect())
    }

    /// Keep only `names`, in that order
    ///
    /// Fails with the list of absent names if any requested column is missing.
    pub fn project(mut self, names: &[String]) -> std::result::Result<Table, Vec<String>> {
        let missing: Vec<String> = self
            .missing_columns(names)
            .into_iter()
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            if let Some(pos) = self.columns.iter().position(|c| c.name() == name) {
                columns.push(self.columns.swap_remove(pos));
            }
        }

        Ok(Table {
            columns,
            height: self.height,
        })
    }

    /// Rename columns through `rename`, keeping names unique
    pub fn rename_with<F>(&mut self, rename: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let renamed: Vec<String> = self
            .columns
            .iter()
            .map(|c| rename(c.name()).unwrap_or_else(|| c.name().to_string()))
            .collect();

        let mut seen = HashSet::new();
        for name in &renamed {
            if !seen.insert(name.as_str()) {
                return Err(Error::DuplicateColumn(name.clone()).into());
            }
        }

        for (column, name) in self.columns.iter_mut().zip(renamed) {
            column.set_name(name);
        }
        Ok(())
    }

    pub(crate) fn push_column(&mut self, column: Column) {
        self.height = column.len();
        self.columns.push(column);
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub(crate) fn set_height(&mut self, height: usize) {
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            vec!["id".into(), "name".into(), "amount".into()],
            vec![
                vec![Value::Int(1), "ann".into(), Value::Float(1.5)],
                vec![Value::Int(2), "bob".into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        let table = sample();
        assert_eq!(table.height(), 2);
        assert_eq!(table.width(), 3);
        assert_eq!(table.row(1).unwrap()[2], &Value::Null);
        assert!(table.row(2).is_none());
    }

    #[test]
    fn test_from_rows_rejects_long_rows() {
        let result = Table::from_rows(vec!["a".into()], vec![vec![Value::Int(1), Value::Int(2)]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = Table::from_columns(vec![
            Column::new("a", vec![]),
            Column::new("a", vec![]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_project_reorders() {
        let table = sample()
            .project(&["amount".to_string(), "id".to_string()])
            .unwrap();
        assert_eq!(table.column_names(), vec!["amount", "id"]);
        assert_eq!(table.height(), 2);
        assert_eq!(table.row(0).unwrap(), vec![&Value::Float(1.5), &Value::Int(1)]);
    }

    #[test]
    fn test_project_reports_all_missing() {
        let missing = sample()
            .project(&["x".to_string(), "id".to_string(), "y".to_string()])
            .unwrap_err();
        assert_eq!(missing, vec!["x", "y"]);
    }

    #[test]
    fn test_rename_swap() {
        let mut table = sample();
        table
            .rename_with(|name| match name {
                "id" => Some("name".to_string()),
                "name" => Some("id".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(table.column_names(), vec!["name", "id", "amount"]);
    }

    #[test]
    fn test_rename_collision_fails_without_changes() {
        let mut table = sample();
        let result = table.rename_with(|name| (name == "id").then(|| "name".to_string()));
        assert!(result.is_err());
        assert_eq!(table.column_names(), vec!["id", "name", "amount"]);
    }
}
