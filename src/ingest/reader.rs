use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, warn};

use super::{
    parse_number, Field, IngestError, IngestStats, IngestedLog, RawReading, SpecimenMetadata,
    CELL_FALLBACK,
};

/// Reader for comma-separated triaxial vendor logs.
///
/// The reader is tolerant: rows may have differing widths, cells may be quoted,
/// and unrecognised columns are ignored. Bytes that are not valid UTF-8 (e.g. a
/// Latin-1 operator name) are replaced rather than rejected.
#[derive(Debug, Clone, Copy)]
pub struct VendorLogReader {
    delimiter: u8,
}

impl Default for VendorLogReader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl VendorLogReader {
    /// Create a reader for comma-separated logs
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different field delimiter (e.g. `b'\t'`).
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read a log from a file path
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<IngestedLog, IngestError> {
        let file = File::open(path)?;
        self.read(BufReader::new(file))
    }

    /// Read a log from any reader
    pub fn read<R: Read>(&self, reader: R) -> Result<IngestedLog, IngestError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut metadata = SpecimenMetadata::new();
        let mut columns: Option<Vec<Option<Field>>> = None;
        let mut readings = Vec::new();
        let mut stats = IngestStats::default();

        for record in csv_reader.byte_records() {
            let record = Self::decode(&record?);
            if record.iter().all(|cell| cell.is_empty()) {
                continue;
            }

            if columns.is_none() {
                if record.iter().any(|cell| Field::from_label(cell) == Some(Field::Stage)) {
                    columns = Some(Self::map_header(&record)?);
                    debug!("Header row found after {} metadata entries", metadata.len());
                } else if let (Some(label), Some(value)) = (record.get(0), record.get(1)) {
                    if !label.is_empty() {
                        metadata.insert_raw(label, value);
                        stats.metadata_entries += 1;
                    }
                }
                continue;
            }
            let Some(columns) = columns.as_ref() else {
                continue;
            };

            let reading = Self::parse_row(&record, columns, &mut stats);
            if let Some(previous) = readings.last().map(|r: &RawReading| r.stage) {
                if reading.stage < previous {
                    stats.stage_order_violations += 1;
                }
            }
            readings.push(reading);
        }

        if columns.is_none() {
            return Err(IngestError::MissingHeader);
        }

        stats.rows = readings.len();
        if stats.stage_order_violations > 0 {
            warn!(
                "Stage index decreased {} times; readings kept in file order",
                stats.stage_order_violations
            );
        }
        if stats.coerced_cells > 0 {
            debug!("{} cells could not be parsed and were set to {}", stats.coerced_cells, CELL_FALLBACK);
        }

        Ok(IngestedLog {
            metadata,
            readings,
            stats,
        })
    }

    /// Decode a raw row cell by cell, replacing invalid UTF-8 sequences.
    ///
    /// A damaged metadata value keeps its readable part; a damaged number no
    /// longer parses and falls back like any other bad cell.
    fn decode(record: &csv::ByteRecord) -> csv::StringRecord {
        record
            .iter()
            .map(String::from_utf8_lossy)
            .collect()
    }

    /// Map header cells to canonical fields, rejecting logs without required columns.
    fn map_header(record: &csv::StringRecord) -> Result<Vec<Option<Field>>, IngestError> {
        let mut seen = Vec::new();
        let columns: Vec<Option<Field>> = record
            .iter()
            .map(|cell| {
                let field = Field::from_label(cell).filter(|f| !seen.contains(f));
                if let Some(f) = field {
                    seen.push(f);
                }
                field
            })
            .collect();

        let missing: Vec<String> = Field::ALL
            .iter()
            .filter(|f| f.is_required() && !seen.contains(f))
            .map(|f| f.name().to_string())
            .collect();

        if !missing.is_empty() {
            return Err(IngestError::MissingColumns(missing));
        }

        Ok(columns)
    }

    fn parse_row(
        record: &csv::StringRecord,
        columns: &[Option<Field>],
        stats: &mut IngestStats,
    ) -> RawReading {
        let mut reading = RawReading::default();

        for (cell, field) in record.iter().zip(columns) {
            let Some(field) = field else { continue };
            match parse_number(cell) {
                Some(value) if *field == Field::Stage && value.fract() != 0.0 => {
                    stats.coerced_cells += 1;
                }
                Some(value) => reading.set(*field, value),
                None => {
                    stats.coerced_cells += 1;
                    reading.set(*field, CELL_FALLBACK);
                }
            }
        }

        reading
    }
}
