use csv::StringRecord;

use crate::errors::{ParserError, RowError};
use crate::model::{FormatDescriptor, IngestReport, ParsedCatalog, SkippedRow, SourceFormat};
use crate::normalize::normalize_row;
use crate::registry::CatalogParser;

use super::common::{ensure_required_columns, HeaderIndex, IndexedRow};

/// Fixed column layout of the FK5-SAO-HD cross index export.
pub const FK5_COLUMNS: [&str; 11] = [
    "FK5", "RAJ2000", "pmRA", "DEJ2000", "pmDE", "Vmag", "Sp", "DM", "SAO", "HD", "name",
];

/// Pipe-delimited cross index table with sexagesimal coordinates.
///
/// Everything up to a line of dashes is header material. After it, blank
/// lines and lines starting with `#` or `FK5|` are ignored and every other
/// line is one star.
pub struct Fk5CrossIndexParser {
    descriptor: FormatDescriptor,
}

impl Default for Fk5CrossIndexParser {
    fn default() -> Self {
        Self::new(SourceFormat::Fk5CrossIndex.descriptor())
    }
}

impl Fk5CrossIndexParser {
    const NAME: &'static str = "FK5_CROSS_INDEX";

    pub fn new(descriptor: FormatDescriptor) -> Self {
        Self { descriptor }
    }

    fn is_separator(line: &str) -> bool {
        line.starts_with("----")
    }

    fn is_ignored(line: &str) -> bool {
        line.is_empty() || line.starts_with('#') || line.starts_with("FK5|")
    }

    fn validate_header(line: &str) -> Result<(), ParserError> {
        let found: Vec<&str> = line.split('|').map(str::trim).collect();
        let matches = found.len() >= FK5_COLUMNS.len()
            && found
                .iter()
                .zip(FK5_COLUMNS.iter())
                .all(|(found, expected)| found.eq_ignore_ascii_case(expected));
        if matches {
            Ok(())
        } else {
            Err(ParserError::FormatMismatch {
                parser: Self::NAME,
                reason: format!("unexpected column header '{line}'"),
            })
        }
    }
}

impl CatalogParser for Fk5CrossIndexParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn format(&self) -> SourceFormat {
        self.descriptor.format
    }

    fn parse(&self, content: &str) -> Result<ParsedCatalog, ParserError> {
        let index = HeaderIndex::new(FK5_COLUMNS);
        ensure_required_columns(Self::NAME, &self.descriptor, &index)?;

        let mut records = Vec::new();
        let mut report = IngestReport::default();
        let mut in_data = false;

        for (line_idx, raw_line) in content.lines().enumerate() {
            let line_number = line_idx + 1;
            let line = raw_line.trim();

            if !in_data {
                if Self::is_separator(line) {
                    in_data = true;
                } else if line.starts_with("FK5|") {
                    Self::validate_header(line)?;
                }
                continue;
            }

            if Self::is_ignored(line) || Self::is_separator(line) {
                continue;
            }

            let fields: Vec<&str> = line.split('|').map(str::trim).collect();
            if fields.len() < FK5_COLUMNS.len() {
                report.skipped.push(SkippedRow {
                    line: line_number,
                    reason: RowError::ColumnCount {
                        expected: FK5_COLUMNS.len(),
                        found: fields.len(),
                    },
                });
                continue;
            }

            let record = StringRecord::from(fields);
            let view = IndexedRow {
                index: &index,
                record: &record,
            };
            report.record(
                line_number,
                normalize_row(&self.descriptor, &view, line_number),
                &mut records,
            );
        }

        if !in_data {
            return Err(ParserError::FormatMismatch {
                parser: Self::NAME,
                reason: "no dashed separator between header and data".to_string(),
            });
        }

        if report.total_rows() == 0 {
            return Err(ParserError::EmptyData { parser: Self::NAME });
        }

        Ok(ParsedCatalog {
            descriptor: self.descriptor,
            records,
            report,
            seed: None,
        })
    }
}
