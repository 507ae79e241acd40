use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, instrument, warn};

use crate::itinerary::prettify::error::{LookupDefect, PrettifyError, Result};
use crate::itinerary::prettify::model::{CodeMapping, LookupRow, REQUIRED_COLUMNS};

/// Number of cells every lookup row must carry.
pub const LOOKUP_COLUMNS: usize = 6;

/// Loads the airport lookup table at `path` into code mappings.
#[instrument(level = "info", skip_all, fields(lookup = %path.display()))]
pub fn load_lookup(path: &Path) -> Result<CodeMapping> {
    let file = File::open(path)?;
    let mapping = parse_lookup(file)?;
    info!(
        airports = mapping.airport_count(),
        cities = mapping.city_count(),
        "airport lookup loaded"
    );
    Ok(mapping)
}

/// A lookup record tagged with the file row it starts on (1-based).
#[derive(Debug, Clone)]
pub struct NumberedRecord {
    pub row: usize,
    pub record: StringRecord,
}

impl NumberedRecord {
    /// Last file row the record occupies; quoted cells may span rows.
    fn last_row(&self) -> usize {
        let embedded: usize = self
            .record
            .iter()
            .map(|cell| cell.matches('\n').count())
            .sum();
        self.row + embedded
    }
}

/// Parses lookup CSV from any reader.
///
/// The whole table is validated before any mapping is built; every
/// defective row is reported at once.
pub fn parse_lookup<R: Read>(reader: R) -> Result<CodeMapping> {
    let records = read_records(reader)?;

    let defects = validate_records(&records);
    if !defects.is_empty() {
        warn!(defect_count = defects.len(), "airport lookup rejected");
        return Err(PrettifyError::MalformedLookup(defects));
    }

    let Some((headers, rows)) = records.split_first() else {
        return Err(PrettifyError::MalformedLookup(vec![
            LookupDefect::ColumnCount { row: 1, found: 0 },
        ]));
    };
    let headers = &headers.record;

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(PrettifyError::MissingColumn(column));
        }
    }

    let rows = rows
        .iter()
        .map(|numbered| numbered.record.deserialize::<LookupRow>(Some(headers)))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    debug!(row_count = rows.len(), "lookup rows deserialised");

    Ok(rows.into_iter().collect())
}

/// Checks every record for the fixed six-cell, no-blank-cell shape.
///
/// Rows are numbered by file row, header included. Blank rows between
/// records count as single-cell rows; trailing blank rows are ignored.
pub fn validate_records(records: &[NumberedRecord]) -> Vec<LookupDefect> {
    if records.is_empty() {
        return vec![LookupDefect::ColumnCount { row: 1, found: 0 }];
    }

    let mut defects = Vec::new();
    let mut next_row = 1;

    for numbered in records {
        defects.extend(
            (next_row..numbered.row).map(|row| LookupDefect::ColumnCount { row, found: 1 }),
        );

        let row = numbered.row;
        let record = &numbered.record;
        if record.len() != LOOKUP_COLUMNS {
            defects.push(LookupDefect::ColumnCount {
                row,
                found: record.len(),
            });
        } else if record.iter().any(|cell| cell.trim().is_empty()) {
            defects.push(LookupDefect::EmptyCell { row });
        }

        next_row = numbered.last_row() + 1;
    }

    defects
}

fn read_records<R: Read>(reader: R) -> Result<Vec<NumberedRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records: Vec<NumberedRecord> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = match record.position() {
            Some(position) => position.line() as usize,
            None => records.last().map_or(1, |previous| previous.last_row() + 1),
        };
        records.push(NumberedRecord { row, record });
    }
    Ok(records)
}
