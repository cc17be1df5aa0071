use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use encoding_rs::SHIFT_JIS;
use thiserror::Error;

use super::model::{ColumnKey, Dataset, Row};

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Everything that can go wrong while turning the source file into a
/// [`Dataset`]. All variants are fatal at startup; there is nothing to
/// retry.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid Shift_JIS text")]
    Decode { path: String },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("schema mismatch: {0}")]
    Schema(String),

    #[error("row {row} ({cause}), column {column}: '{text}' is not a number")]
    Value {
        row: usize,
        cause: String,
        column: ColumnKey,
        text: String,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Header cells accepted as the cause-label column.
const CAUSE_HEADERS: [&str; 2] = ["死因", "cause"];

/// Load the death-cause probability table from a Shift_JIS encoded CSV.
///
/// The header row must contain the cause-label column (`死因` or `cause`)
/// and at least one value column named by a sex tag plus an age bracket
/// (`男性0歳`, `female65`, …). Unrecognized columns are skipped with a
/// warning. Empty cells are treated as missing values.
pub fn load(path: &Path) -> Result<Dataset, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let text = decode_shift_jis(&bytes).ok_or_else(|| LoadError::Decode {
        path: path.display().to_string(),
    })?;
    parse_csv(&text)
}

/// Decode Shift_JIS bytes, refusing input with malformed sequences.
/// Plain ASCII (and BOM'd UTF-8, which the decoder sniffs) pass through.
fn decode_shift_jis(bytes: &[u8]) -> Option<String> {
    let (text, _, had_errors) = SHIFT_JIS.decode(bytes);
    (!had_errors).then(|| text.into_owned())
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// What each header cell turned out to be.
enum HeaderSlot {
    Cause,
    Value(ColumnKey),
    Ignored,
}

fn parse_csv(text: &str) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    // Classify the header once; all later cell access is positional.
    let mut slots: Vec<HeaderSlot> = Vec::new();
    let mut cause_idx: Option<usize> = None;
    let mut columns: Vec<ColumnKey> = Vec::new();

    for (idx, cell) in reader.headers()?.iter().enumerate() {
        let cell = cell.trim();
        if CAUSE_HEADERS.iter().any(|h| cell.eq_ignore_ascii_case(h)) {
            if cause_idx.is_some() {
                return Err(LoadError::Schema("more than one cause column".into()));
            }
            cause_idx = Some(idx);
            slots.push(HeaderSlot::Cause);
        } else if let Some(key) = ColumnKey::parse(cell) {
            if columns.contains(&key) {
                return Err(LoadError::Schema(format!("duplicate column '{key}'")));
            }
            columns.push(key);
            slots.push(HeaderSlot::Value(key));
        } else {
            log::warn!("ignoring unrecognized column '{cell}'");
            slots.push(HeaderSlot::Ignored);
        }
    }

    let cause_idx = cause_idx
        .ok_or_else(|| LoadError::Schema("no cause column (死因 / cause) in header".into()))?;
    if columns.is_empty() {
        return Err(LoadError::Schema(
            "no (sex, age-bracket) value columns in header".into(),
        ));
    }

    let mut rows: Vec<Row> = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();

    for (row_no, record) in reader.records().enumerate() {
        let record = record?;
        let cause = record.get(cause_idx).unwrap_or("").trim().to_string();
        if cause.is_empty() {
            return Err(LoadError::Schema(format!("row {row_no}: empty cause label")));
        }
        if !seen.insert(cause.clone()) {
            return Err(LoadError::Schema(format!("duplicate cause '{cause}'")));
        }

        let mut values: BTreeMap<ColumnKey, f64> = BTreeMap::new();
        for (idx, slot) in slots.iter().enumerate() {
            let HeaderSlot::Value(key) = slot else {
                continue;
            };
            let cell = record.get(idx).unwrap_or("").trim();
            if cell.is_empty() {
                continue; // missing value for this (cause, sex, bracket)
            }
            let value = cell.parse::<f64>().map_err(|_| LoadError::Value {
                row: row_no,
                cause: cause.clone(),
                column: *key,
                text: cell.to_string(),
            })?;
            values.insert(*key, value);
        }

        rows.push(Row { cause, values });
    }

    Ok(Dataset { rows, columns })
}

/// Parse an in-memory CSV, panicking on failure. Test fixture helper for
/// the sibling modules.
#[cfg(test)]
pub(crate) fn parse_for_tests(text: &str) -> Dataset {
    parse_csv(text).expect("test CSV must parse")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{AgeBracket, Sex};

    fn key(sex: Sex, age: AgeBracket) -> ColumnKey {
        ColumnKey::new(sex, age)
    }

    #[test]
    fn parses_english_table() {
        let ds = parse_csv("cause,male0,male20,female0\nCancer,1.0,2.0,1.5\nStroke,0.5,,0.7\n")
            .unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(
            ds.columns,
            vec![
                key(Sex::Male, AgeBracket::Age0),
                key(Sex::Male, AgeBracket::Age20),
                key(Sex::Female, AgeBracket::Age0),
            ]
        );
        assert_eq!(ds.rows[0].cause, "Cancer");
        assert_eq!(ds.rows[0].value(key(Sex::Male, AgeBracket::Age20)), Some(2.0));
        // Empty cell is a missing value, not zero.
        assert_eq!(ds.rows[1].value(key(Sex::Male, AgeBracket::Age20)), None);
    }

    #[test]
    fn parses_japanese_table() {
        let ds = parse_csv("死因,男性0歳,女性0歳\n悪性新生物,28.2,20.0\n心疾患,14.2,17.3\n")
            .unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[0].cause, "悪性新生物");
        assert_eq!(ds.rows[1].value(key(Sex::Female, AgeBracket::Age0)), Some(17.3));
    }

    #[test]
    fn decodes_shift_jis_bytes() {
        let (bytes, _, _) = SHIFT_JIS.encode("死因,男性0歳\n悪性新生物,28.2\n");
        let text = decode_shift_jis(&bytes).unwrap();
        let ds = parse_csv(&text).unwrap();
        assert_eq!(ds.rows[0].cause, "悪性新生物");
    }

    #[test]
    fn rejects_malformed_shift_jis() {
        // 0x85 starts a two-byte sequence; 0xff is not a valid trailer here.
        assert!(decode_shift_jis(&[0x85, 0xff, 0xff, 0xfe]).is_none());
    }

    #[test]
    fn rejects_missing_cause_column() {
        let err = parse_csv("male0,female0\n1.0,2.0\n").unwrap_err();
        assert!(matches!(err, LoadError::Schema(_)));
    }

    #[test]
    fn rejects_header_without_value_columns() {
        let err = parse_csv("cause,notes\nCancer,high\n").unwrap_err();
        assert!(matches!(err, LoadError::Schema(_)));
    }

    #[test]
    fn rejects_duplicate_cause() {
        let err = parse_csv("cause,male0\nCancer,1.0\nCancer,2.0\n").unwrap_err();
        assert!(matches!(err, LoadError::Schema(_)));
    }

    #[test]
    fn rejects_non_numeric_cell() {
        let err = parse_csv("cause,male0\nCancer,lots\n").unwrap_err();
        match err {
            LoadError::Value { cause, text, .. } => {
                assert_eq!(cause, "Cancer");
                assert_eq!(text, "lots");
            }
            other => panic!("expected Value error, got {other:?}"),
        }
    }

    #[test]
    fn ignores_unrecognized_columns() {
        let ds = parse_csv("cause,male0,source\nCancer,1.0,e-Stat\n").unwrap();
        assert_eq!(ds.columns, vec![key(Sex::Male, AgeBracket::Age0)]);
        assert_eq!(ds.rows[0].values.len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load(Path::new("/nonexistent/00003.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
