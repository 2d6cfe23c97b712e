use crate::error::Result;
use crate::types::ResultRecord;
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Columns the pipeline interprets; every other header is preserved
/// verbatim in `ResultRecord::extra`. Names follow the upstream extraction
/// (`pt_cse` for course points, `pdf_file` for the source sheet).
const KNOWN_COLUMNS: [&str; 12] = [
    "person",
    "discipline",
    "season",
    "event",
    "medal",
    "status",
    "pt_cse",
    "rank",
    "participants_count",
    "station",
    "event_date",
    "pdf_file",
];

fn non_empty(cell: Option<&str>) -> Option<String> {
    let cell = cell?.trim();
    if cell.is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}

// NaN/inf renderings degrade to None like any other unparseable cell
fn parse_f64(cell: Option<&str>) -> Option<f64> {
    non_empty(cell)?.parse().ok().filter(|f: &f64| f.is_finite())
}

// Integer columns sometimes arrive as float renderings ("12.0")
fn parse_u32(cell: Option<&str>) -> Option<u32> {
    let text = non_empty(cell)?;
    if let Ok(n) = text.parse::<u32>() {
        return Some(n);
    }
    text.parse::<f64>().ok().and_then(|f| {
        if f >= 0.0 {
            Some(f.trunc() as u32)
        } else {
            None
        }
    })
}

/// Reads raw result records from CSV bytes. Known columns are parsed
/// leniently (malformed numeric cells degrade to `None`); rows without a
/// person are skipped; unknown columns land in `extra` untouched.
#[instrument(skip(reader))]
pub fn parse_results_csv<R: Read>(reader: R) -> Result<Vec<ResultRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in csv_reader.records() {
        let row = row?;
        let cell = |name: &str| -> Option<&str> {
            headers
                .iter()
                .position(|h| h == name)
                .and_then(|idx| row.get(idx))
        };

        let Some(person) = non_empty(cell("person")) else {
            skipped += 1;
            continue;
        };

        let mut extra = BTreeMap::new();
        for (idx, header) in headers.iter().enumerate() {
            if KNOWN_COLUMNS.contains(&header) {
                continue;
            }
            if let Some(value) = row.get(idx) {
                extra.insert(header.to_string(), value.to_string());
            }
        }

        records.push(ResultRecord {
            person,
            discipline: non_empty(cell("discipline")),
            season: non_empty(cell("season")),
            event: non_empty(cell("event")),
            medal: non_empty(cell("medal")),
            status: non_empty(cell("status")),
            points: parse_f64(cell("pt_cse")),
            rank: parse_u32(cell("rank")),
            participants_count: parse_u32(cell("participants_count")),
            station: non_empty(cell("station")),
            event_date: non_empty(cell("event_date")),
            source_file: non_empty(cell("pdf_file")).unwrap_or_default(),
            extra,
        });
    }

    if skipped > 0 {
        warn!(skipped, "Skipped rows without a person");
    }
    info!(count = records.len(), "Parsed raw result records");
    Ok(records)
}

/// Reads raw result records from a CSV file on disk.
pub fn read_results_csv(path: &Path) -> Result<Vec<ResultRecord>> {
    let bytes = fs::read(path)?;
    parse_results_csv(bytes.as_slice())
}
