//! Tagged scalar cell values and text type inference

use std::fmt;

/// Tokens read as a missing value in delimited text
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const TRUE_TOKENS: &[&str] = &["True", "true", "TRUE"];
const FALSE_TOKENS: &[&str] = &["False", "false", "FALSE"];

/// A single table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(f) => f.is_nan(),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// Text rendering used for delimited output
///
/// Null and NaN render empty, booleans as `True`/`False`, and integral floats
/// keep a trailing `.0` so a float column stays distinguishable from an int one.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) if x.is_nan() => Ok(()),
            Value::Float(x) if x.is_infinite() => {
                f.write_str(if *x > 0.0 { "inf" } else { "-inf" })
            }
            Value::Float(x) if x.fract() == 0.0 && x.abs() < 1e16 => write!(f, "{:.1}", x),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Inferred logical type of a text column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Int,
    Float,
    Bool,
    Text,
}

fn is_na(cell: &str) -> bool {
    NA_TOKENS.contains(&cell)
}

fn parse_bool(cell: &str) -> Option<bool> {
    if TRUE_TOKENS.contains(&cell) {
        Some(true)
    } else if FALSE_TOKENS.contains(&cell) {
        Some(false)
    } else {
        None
    }
}

fn parse_float(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    // Rust accepts "infinity"/"nan" spellings that are not numbers in a CSV
    match trimmed.to_ascii_lowercase().trim_start_matches(['+', '-']) {
        "inf" => trimmed.parse().ok(),
        s if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e') => None,
        _ => trimmed.parse().ok(),
    }
}

fn kind_of(cell: &str) -> Kind {
    if cell.trim().parse::<i64>().is_ok() {
        Kind::Int
    } else if parse_float(cell).is_some() {
        Kind::Float
    } else if parse_bool(cell).is_some() {
        Kind::Bool
    } else {
        Kind::Text
    }
}

fn widen(a: Kind, b: Kind) -> Kind {
    match (a, b) {
        (x, y) if x == y => x,
        (Kind::Int, Kind::Float) | (Kind::Float, Kind::Int) => Kind::Float,
        _ => Kind::Text,
    }
}

/// Convert one column of raw text cells into typed values
///
/// The whole column gets one type: all integers → `Int`, all numeric →
/// `Float`, all boolean tokens → `Bool`, anything else keeps the raw text.
/// Missing cells (`None` or an NA token) become `Null` in every case.
///
/// # Example
/// ```
/// use tabmerge::table::{infer_column, Value};
///
/// let values = infer_column(&[Some("1"), Some("2.5"), Some("NA")]);
/// assert_eq!(values, vec![Value::Float(1.0), Value::Float(2.5), Value::Null]);
/// ```
pub fn infer_column(cells: &[Option<&str>]) -> Vec<Value> {
    let kind = cells
        .iter()
        .flatten()
        .filter(|cell| !is_na(cell))
        .map(|cell| kind_of(cell))
        .reduce(widen)
        .unwrap_or(Kind::Text);

    cells
        .iter()
        .map(|cell| match cell {
            None => Value::Null,
            Some(cell) if is_na(cell) => Value::Null,
            Some(cell) => match kind {
                Kind::Int => cell.trim().parse().map(Value::Int).unwrap_or(Value::Null),
                Kind::Float => parse_float(cell).map(Value::Float).unwrap_or(Value::Null),
                Kind::Bool => parse_bool(cell).map(Value::Bool).unwrap_or(Value::Null),
                Kind::Text => Value::Text(cell.to_string()),
            },
        })
        .collect()
}
