//! File format dispatch by extension

use crate::error::Error;
use std::path::Path;

/// Tabular file formats understood by readers and writers
///
/// The extension is the only dispatch key; file contents are never sniffed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Delimited text (`.csv`)
    Csv,
    /// Spreadsheet workbook (`.xlsx`, `.xls`)
    Excel,
}

impl FileFormat {
    /// Pick the format for `path` from its lowercased extension
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedFormat`] for any other extension
    ///
    /// # Example
    /// ```
    /// use tabmerge::storage::FileFormat;
    ///
    /// assert_eq!(FileFormat::from_path("Report.XLSX").unwrap(), FileFormat::Excel);
    /// assert!(FileFormat::from_path("data.json").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(FileFormat::Csv),
            Some("xlsx") | Some("xls") => Ok(FileFormat::Excel),
            _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_is_case_insensitive() {
        assert_eq!(FileFormat::from_path("a.csv").unwrap(), FileFormat::Csv);
        assert_eq!(FileFormat::from_path("dir/B.CSV").unwrap(), FileFormat::Csv);
        assert_eq!(FileFormat::from_path("c.xls").unwrap(), FileFormat::Excel);
        assert_eq!(FileFormat::from_path("d.XlSx").unwrap(), FileFormat::Excel);
    }

    #[test]
    fn test_unknown_extensions() {
        for path in ["data.json", "data.tsv", "csv", "data.csv.gz", "no_extension"] {
            assert!(
                matches!(FileFormat::from_path(path), Err(Error::UnsupportedFormat(_))),
                "{} should be unsupported",
                path
            );
        }
    }
}
