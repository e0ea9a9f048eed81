//! Column rename transformer and `old:new` mapping parser

use super::MissingColumnPolicy;
use crate::error::Error;
use crate::etl::Transformer;
use crate::report::EventSink;
use crate::table::Table;
use eyre::Result;
use std::fmt;
use std::str::FromStr;

/// Ordered mapping from old column name to new column name
///
/// Parsed from `"old1:new1,old2:new2"`. Each pair must contain exactly one
/// `:`. Names are trimmed. A repeated old name keeps the last new name.
///
/// # Example
/// ```
/// use tabmerge::transform::ColumnMapping;
///
/// let mapping: ColumnMapping = "name:client, amount:value".parse().unwrap();
/// assert_eq!(mapping.get("name"), Some("client"));
/// assert_eq!(mapping.len(), 2);
///
/// assert!(ColumnMapping::parse("a:b:c").is_err());
/// assert!(ColumnMapping::parse("").unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pairs: Vec<(String, String)>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated list of `old:new` pairs
    ///
    /// # Errors
    /// Returns [`Error::Mapping`] for a pair without exactly one `:`
    pub fn parse(source: &str) -> std::result::Result<Self, Error> {
        let mut mapping = Self::new();
        if source.is_empty() {
            return Ok(mapping);
        }

        for pair in source.split(',') {
            let mut parts = pair.split(':');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(old), Some(new), None) => mapping.insert(old.trim(), new.trim()),
                _ => {
                    return Err(Error::Mapping {
                        pair: pair.to_string(),
                    });
                }
            }
        }

        Ok(mapping)
    }

    /// Add or replace the target for `old`
    pub fn insert(&mut self, old: impl Into<String>, new: impl Into<String>) {
        let (old, new) = (old.into(), new.into());
        match self.pairs.iter_mut().find(|(o, _)| *o == old) {
            Some(pair) => pair.1 = new,
            None => self.pairs.push((old, new)),
        }
    }

    pub fn get(&self, old: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(o, _)| o == old)
            .map(|(_, n)| n.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(o, _)| o.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Keep only pairs whose old name satisfies `keep`
    pub fn retain<F: FnMut(&str) -> bool>(&mut self, mut keep: F) {
        self.pairs.retain(|(o, _)| keep(o));
    }
}

impl FromStr for ColumnMapping {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ColumnMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (old, new)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}: {:?}", old, new)?;
        }
        f.write_str("}")
    }
}

/// Transformer that renames columns through a [`ColumnMapping`]
///
/// All renames apply at once, so `a:b,b:a` swaps two columns. A rename that
/// would leave two columns with the same name fails the run.
///
/// Old names that are not columns of the table:
/// - [`MissingColumnPolicy::Strict`]: dropped from the mapping with a warning
/// - [`MissingColumnPolicy::Lenient`]: silently have no effect
pub struct ColumnRenamer {
    mapping: ColumnMapping,
    policy: MissingColumnPolicy,
}

impl ColumnRenamer {
    pub fn new(mapping: ColumnMapping, policy: MissingColumnPolicy) -> Self {
        Self { mapping, policy }
    }

    /// Parse an `old:new` list and build a renamer from it
    ///
    /// # Errors
    /// Returns [`Error::Mapping`] for malformed pairs, before any table is touched
    pub fn parse(source: &str, policy: MissingColumnPolicy) -> Result<Self> {
        Ok(Self::new(ColumnMapping::parse(source)?, policy))
    }
}

impl Transformer for ColumnRenamer {
    type Input = Table;
    type Output = Table;

    fn name(&self) -> &'static str {
        "rename"
    }

    fn transform(&self, mut input: Self::Input, sink: &dyn EventSink) -> Result<Self::Output> {
        let mut mapping = self.mapping.clone();

        if self.policy == MissingColumnPolicy::Strict {
            let invalid: Vec<&str> = mapping.keys().filter(|k| !input.has_column(k)).collect();
            if !invalid.is_empty() {
                sink.warn(&format!("Cannot rename non-existent: {:?}", invalid));
                mapping.retain(|k| input.has_column(k));
            }
        }

        if !mapping.is_empty() {
            input.rename_with(|name| mapping.get(name).map(String::from))?;
            sink.info(&format!("Renamed: {}", mapping));
        }

        Ok(input)
    }
}
