use std::collections::HashMap;

use csv::StringRecord;

use crate::errors::{ParserError, RowError};
use crate::model::{FormatDescriptor, IngestReport, ParsedCatalog, SkippedRow};
use crate::normalize::{normalize_row, RowView};

/// Case-insensitive column name to field position lookup.
#[derive(Debug, Clone)]
pub(crate) struct HeaderIndex {
    positions: HashMap<String, usize>,
    width: usize,
}

impl HeaderIndex {
    pub fn new<'a>(columns: impl IntoIterator<Item = &'a str>) -> Self {
        let mut positions = HashMap::new();
        let mut width = 0;
        for (idx, column) in columns.into_iter().enumerate() {
            positions
                .entry(column.trim().to_ascii_lowercase())
                .or_insert(idx);
            width = idx + 1;
        }
        Self { positions, width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(&column.to_ascii_lowercase()).copied()
    }

    pub fn missing(&self, columns: &[&'static str]) -> Vec<&'static str> {
        columns
            .iter()
            .copied()
            .filter(|column| self.position(column).is_none())
            .collect()
    }
}

pub(crate) struct IndexedRow<'a> {
    pub index: &'a HeaderIndex,
    pub record: &'a StringRecord,
}

impl RowView for IndexedRow<'_> {
    fn field(&self, column: &str) -> Option<&str> {
        self.index
            .position(column)
            .and_then(|idx| self.record.get(idx))
    }
}

pub(crate) fn ensure_required_columns(
    parser: &'static str,
    descriptor: &FormatDescriptor,
    index: &HeaderIndex,
) -> Result<(), ParserError> {
    let missing = index.missing(&descriptor.required_columns());
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ParserError::MissingColumns {
            parser,
            columns: missing,
        })
    }
}

/// Parses a comma separated table whose first row names its columns.
///
/// `signature` lists the header columns that identify the format; a header
/// lacking any of them is a [`ParserError::FormatMismatch`] so that format
/// detection can move on to the next parser.
pub(crate) fn parse_header_table(
    parser: &'static str,
    descriptor: &FormatDescriptor,
    signature: &[&'static str],
    content: &str,
) -> Result<ParsedCatalog, ParserError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut rows = reader.records();

    let header = rows
        .next()
        .ok_or(ParserError::FormatMismatch {
            parser,
            reason: "source is empty".to_string(),
        })?
        .map_err(|err| ParserError::Csv {
            parser,
            source: err,
        })?;

    let index = HeaderIndex::new(header.iter());
    let unmatched = index.missing(signature);
    if !unmatched.is_empty() {
        return Err(ParserError::FormatMismatch {
            parser,
            reason: format!("header lacks columns {}", unmatched.join(", ")),
        });
    }
    ensure_required_columns(parser, descriptor, &index)?;

    let mut records = Vec::new();
    let mut report = IngestReport::default();

    for (row_idx, row) in rows.enumerate() {
        // Header is line 1.
        let line = row_idx + 2;
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                report.skipped.push(SkippedRow {
                    line,
                    reason: RowError::Malformed {
                        message: err.to_string(),
                    },
                });
                continue;
            }
        };

        if row.len() != index.width() {
            report.skipped.push(SkippedRow {
                line,
                reason: RowError::ColumnCount {
                    expected: index.width(),
                    found: row.len(),
                },
            });
            continue;
        }

        let view = IndexedRow {
            index: &index,
            record: &row,
        };
        report.record(line, normalize_row(descriptor, &view, line), &mut records);
    }

    if report.total_rows() == 0 {
        return Err(ParserError::EmptyData { parser });
    }

    Ok(ParsedCatalog {
        descriptor: *descriptor,
        records,
        report,
        seed: None,
    })
}
