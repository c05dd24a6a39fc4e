// 📥 Ingestion - CSV → validated Dataset
// Schema errors abort the load; row-level problems drop the row and are reported.

use crate::dataset::Dataset;
use crate::error::{ClassifError, Result};
use crate::monkey::{is_hex_color, Monkey};
use csv::StringRecord;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Expected input columns (any order)
pub const COLUMNS: [&str; 4] = ["species", "size", "weight", "fur_color"];

/// Measurements are rounded to this many decimals before use
const ROUND_DECIMALS: i32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// Reject the whole table if any cell is missing
    pub strict: bool,
}

impl IngestOptions {
    pub fn strict() -> Self {
        IngestOptions { strict: true }
    }

    pub fn lenient() -> Self {
        IngestOptions { strict: false }
    }
}

// ============================================================================
// DROPPED ROWS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    MissingValue(&'static str),
    Unparseable(&'static str),
    NegativeSize,
    NegativeWeight,
    MalformedFurColor,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::MissingValue(column) => write!(f, "missing {}", column),
            DropReason::Unparseable(column) => write!(f, "{} is not a number", column),
            DropReason::NegativeSize => f.write_str("negative size"),
            DropReason::NegativeWeight => f.write_str("negative weight"),
            DropReason::MalformedFurColor => f.write_str("malformed fur_color"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    /// 1-based line in the source, header included
    pub line: u64,
    pub reason: DropReason,
}

#[derive(Debug, Clone)]
pub struct IngestReport {
    pub dataset: Dataset,
    pub dropped: Vec<DroppedRow>,
    pub total_rows: usize,
}

impl IngestReport {
    pub fn summary(&self) -> String {
        format!(
            "Loaded {} monkeys ({} labeled, {} unlabeled) from {} rows, dropped {}",
            self.dataset.len(),
            self.dataset.labeled_count(),
            self.dataset.unlabeled_count(),
            self.total_rows,
            self.dropped.len()
        )
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

struct ColumnIndex {
    species: usize,
    size: usize,
    weight: usize,
    fur_color: usize,
}

fn validate_headers(headers: &StringRecord) -> Result<ColumnIndex> {
    let err = || {
        ClassifError::schema(format!(
            "headers must be 'species', 'size', 'weight' and 'fur_color', got {:?}",
            headers.iter().collect::<Vec<_>>()
        ))
    };

    if headers.len() != COLUMNS.len() {
        return Err(err());
    }

    let position = |name: &str| -> Result<usize> {
        let mut matches = headers.iter().enumerate().filter(|(_, h)| *h == name);
        match (matches.next(), matches.next()) {
            (Some((i, _)), None) => Ok(i),
            _ => Err(err()),
        }
    };

    Ok(ColumnIndex {
        species: position("species")?,
        size: position("size")?,
        weight: position("weight")?,
        fur_color: position("fur_color")?,
    })
}

// ============================================================================
// ROW CLEANING
// ============================================================================

fn round_measurement(value: f64) -> f64 {
    let factor = 10f64.powi(ROUND_DECIMALS);
    let scaled = value * factor;
    // Values this large carry no decimals anyway
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Numeric cells tolerate surrounding blanks; text cells and headers are taken as written.
fn parse_measurement(raw: &str, column: &'static str, negative: DropReason) -> std::result::Result<f64, DropReason> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DropReason::MissingValue(column));
    }
    let value: f64 = raw.parse().map_err(|_| DropReason::Unparseable(column))?;
    if !value.is_finite() {
        return Err(DropReason::Unparseable(column));
    }
    if value < 0.0 {
        return Err(negative);
    }
    Ok(round_measurement(value))
}

fn clean_row(record: &StringRecord, columns: &ColumnIndex) -> std::result::Result<Monkey, DropReason> {
    let cell = |i: usize| record.get(i).unwrap_or("");

    let size = parse_measurement(cell(columns.size), "size", DropReason::NegativeSize)?;
    let weight = parse_measurement(cell(columns.weight), "weight", DropReason::NegativeWeight)?;

    let fur_color = cell(columns.fur_color);
    if fur_color.is_empty() {
        return Err(DropReason::MissingValue("fur_color"));
    }
    if !is_hex_color(fur_color) {
        return Err(DropReason::MalformedFurColor);
    }

    Monkey::new(size, weight, fur_color, cell(columns.species))
        .map_err(|_| DropReason::MalformedFurColor)
}

// ============================================================================
// LOADERS
// ============================================================================

/// Read monkeys from any CSV source.
///
/// Rows with a negative or missing measurement, or a malformed fur color, are
/// dropped. In strict mode any empty cell fails the whole load instead.
pub fn read_monkeys<R: Read>(reader: R, options: IngestOptions) -> Result<IngestReport> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = validate_headers(&headers)?;

    let mut dataset = Dataset::default();
    let mut dropped = Vec::new();
    let mut total_rows = 0;

    for result in rdr.records() {
        let record = result?;
        total_rows += 1;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(total_rows as u64 + 1);

        if options.strict {
            let missing = (0..COLUMNS.len()).any(|i| record.get(i).map_or(true, str::is_empty));
            if missing {
                return Err(ClassifError::validation(format!(
                    "dataframe contains missing values (line {})",
                    line
                )));
            }
        }

        match clean_row(&record, &columns) {
            Ok(monkey) => dataset.push(monkey),
            Err(reason) => {
                debug!("Dropping line {}: {}", line, reason);
                dropped.push(DroppedRow { line, reason });
            }
        }
    }

    if total_rows > 0 && dataset.is_empty() {
        warn!("Every one of {} rows was dropped during cleaning", total_rows);
    }

    let report = IngestReport {
        dataset,
        dropped,
        total_rows,
    };
    info!("{}", report.summary());
    Ok(report)
}

/// Read monkeys from a CSV file
pub fn load_monkeys<P: AsRef<Path>>(csv_path: P, options: IngestOptions) -> Result<IngestReport> {
    let file = File::open(csv_path.as_ref())?;
    read_monkeys(file, options)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn read(csv: &str, options: IngestOptions) -> Result<IngestReport> {
        read_monkeys(csv.as_bytes(), options)
    }

    #[test]
    fn test_reads_valid_rows() {
        let csv = "species,size,weight,fur_color\n\
                   capuchin,0.5,3.2,#a0522d\n\
                   ,0.6,3.0,#8b4513\n";

        let report = read(csv, IngestOptions::lenient()).unwrap();

        assert_eq!(report.total_rows, 2);
        assert_eq!(report.dataset.len(), 2);
        assert_eq!(report.dataset.labeled_count(), 1);
        assert_eq!(report.dataset.unlabeled_count(), 1);
        assert!(report.dropped.is_empty());
    }

    #[test]
    fn test_column_order_is_free() {
        let csv = "fur_color,weight,species,size\n#000000,2.5,howler,1.5\n";

        let report = read(csv, IngestOptions::lenient()).unwrap();
        let m = report.dataset.get(0).unwrap();

        assert_eq!(m.size(), 1.5);
        assert_eq!(m.weight(), 2.5);
        assert_eq!(m.species(), "howler");
    }

    #[test]
    fn test_schema_errors() {
        let cases = [
            "species,size,weight\nA,1,1\n",
            "species,size,weight,fur_color,tail\nA,1,1,#000000,2\n",
            "species,size,weight,color\nA,1,1,#000000\n",
            "species,size,size,fur_color\nA,1,1,#000000\n",
            "species, size,weight,fur_color\nA,1,1,#000000\n",
        ];

        for csv in cases {
            let err = read(csv, IngestOptions::lenient()).unwrap_err();
            assert!(matches!(err, ClassifError::Schema(_)), "expected schema error for {:?}", csv);
        }
    }

    #[test]
    fn test_negative_size_dropped() {
        let csv = "species,size,weight,fur_color\n\
                   A,-1,1,#000000\n\
                   A,1,1,#000000\n";

        let report = read(csv, IngestOptions::lenient()).unwrap();

        assert_eq!(report.dataset.len(), 1);
        assert_eq!(report.dataset.get(0).unwrap().size(), 1.0);
        assert_eq!(
            report.dropped,
            vec![DroppedRow { line: 2, reason: DropReason::NegativeSize }]
        );
    }

    #[test]
    fn test_zero_measurement_kept() {
        let csv = "species,size,weight,fur_color\nA,1,0,#000000\n";
        let report = read(csv, IngestOptions::lenient()).unwrap();
        assert_eq!(report.dataset.len(), 1);
    }

    #[test]
    fn test_dirty_rows_dropped_with_reasons() {
        let csv = "species,size,weight,fur_color\n\
                   A,1,-0.5,#000000\n\
                   A,1,1,#GGGGGG\n\
                   A,1,1,\n\
                   A,abc,1,#000000\n\
                   A,,1,#000000\n\
                   B,1,1,#ffffff\n";

        let report = read(csv, IngestOptions::lenient()).unwrap();

        assert_eq!(report.dataset.len(), 1);
        assert_eq!(report.dataset.get(0).unwrap().species(), "B");

        let reasons: Vec<DropReason> = report.dropped.iter().map(|d| d.reason.clone()).collect();
        assert_eq!(
            reasons,
            vec![
                DropReason::NegativeWeight,
                DropReason::MalformedFurColor,
                DropReason::MissingValue("fur_color"),
                DropReason::Unparseable("size"),
                DropReason::MissingValue("size"),
            ]
        );
    }

    #[test]
    fn test_strict_rejects_missing_cell() {
        let csv = "species,size,weight,fur_color\n\
                   A,1,1,#000000\n\
                   A,,1,#000000\n";

        let err = read(csv, IngestOptions::strict()).unwrap_err();
        assert!(matches!(err, ClassifError::Validation(_)));

        let report = read(csv, IngestOptions::lenient()).unwrap();
        assert_eq!(report.dataset.len(), 1);
        assert_eq!(report.dropped.len(), 1);
    }

    #[test]
    fn test_strict_rejects_missing_species() {
        let csv = "species,size,weight,fur_color\n,1,1,#000000\n";
        assert!(read(csv, IngestOptions::strict()).is_err());
    }

    #[test]
    fn test_strict_still_drops_negative_values() {
        let csv = "species,size,weight,fur_color\n\
                   A,-2,1,#000000\n\
                   B,1,1,#ffffff\n";

        let report = read(csv, IngestOptions::strict()).unwrap();
        assert_eq!(report.dataset.len(), 1);
    }

    #[test]
    fn test_short_row_is_missing_value() {
        let csv = "species,size,weight,fur_color\nA,1,1\n";

        let report = read(csv, IngestOptions::lenient()).unwrap();
        assert_eq!(report.dropped[0].reason, DropReason::MissingValue("fur_color"));

        assert!(read(csv, IngestOptions::strict()).is_err());
    }

    #[test]
    fn test_measurements_rounded() {
        let csv = "species,size,weight,fur_color\nA,0.123456789012345,1,#000000\n";

        let report = read(csv, IngestOptions::lenient()).unwrap();
        assert_eq!(report.dataset.get(0).unwrap().size(), 0.1234567890);
    }

    #[test]
    fn test_huge_measurement_not_rounded_to_infinity() {
        let csv = "species,size,weight,fur_color\nA,1e300,1.5e308,#000000\n";

        let report = read(csv, IngestOptions::lenient()).unwrap();
        let m = report.dataset.get(0).unwrap();
        assert_eq!(m.size(), 1e300);
        assert_eq!(m.weight(), 1.5e308);
    }

    #[test]
    fn test_whitespace_only_tolerated_around_numbers() {
        let csv = "species,size,weight,fur_color\n\
                   A, 1.5 ,2,#000000\n\
                   A,1,1, #000000\n\
                   A,1,  ,#000000\n";

        let report = read(csv, IngestOptions::lenient()).unwrap();

        assert_eq!(report.dataset.len(), 1);
        assert_eq!(report.dataset.get(0).unwrap().size(), 1.5);
        let reasons: Vec<DropReason> = report.dropped.iter().map(|d| d.reason.clone()).collect();
        assert_eq!(
            reasons,
            vec![DropReason::MalformedFurColor, DropReason::MissingValue("weight")]
        );
    }

    #[test]
    fn test_summary() {
        let csv = "species,size,weight,fur_color\nA,1,1,#000000\nA,-1,1,#000000\n";
        let report = read(csv, IngestOptions::lenient()).unwrap();

        assert_eq!(
            report.summary(),
            "Loaded 1 monkeys (1 labeled, 0 unlabeled) from 2 rows, dropped 1"
        );
    }
}
