use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Competition status as reported on the raw result sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Finished,
    /// Did not finish
    Dnf,
    /// Did not start
    Dns,
    /// Disqualified
    Dsq,
    Unknown,
}

impl Status {
    /// Case-insensitive parse; absent or blank input yields `None`, any
    /// unrecognized token is preserved as `Unknown`.
    pub fn from_raw(raw: Option<&str>) -> Option<Status> {
        let raw = raw?.trim();
        if raw.is_empty() {
            return None;
        }
        Some(match raw.to_uppercase().as_str() {
            "FINISHED" => Status::Finished,
            "DNF" => Status::Dnf,
            "DNS" => Status::Dns,
            "DSQ" => Status::Dsq,
            _ => Status::Unknown,
        })
    }
}

/// Raw per-event result record as supplied by ingestion.
///
/// Every field other than `person` and `source_file` is optional; unknown
/// input columns ride along untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub person: String,
    pub discipline: Option<String>,
    pub season: Option<String>,
    pub event: Option<String>,
    pub medal: Option<String>,
    pub status: Option<String>,
    /// Course points, lower is better (original column `pt_cse`).
    pub points: Option<f64>,
    pub rank: Option<u32>,
    pub participants_count: Option<u32>,
    pub station: Option<String>,
    /// Explicit event date as raw text; parsed by the temporal resolver.
    pub event_date: Option<String>,
    /// Opaque tie-break key identifying the source sheet (original `pdf_file`).
    pub source_file: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ResultRecord {
    pub fn status(&self) -> Option<Status> {
        Status::from_raw(self.status.as_deref())
    }
}

/// A raw record augmented with every derived field of the enrichment
/// pipeline. Construction happens in `enrich`; nothing mutates the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub record: ResultRecord,

    /// Numeric parse of `season`; None sorts last.
    pub season_num: Option<i32>,
    /// 0 = Flèche family, 1 = Chamois family, 99 = unknown.
    pub discipline_ord: u8,
    pub event_num: u32,
    pub event_suf: String,

    /// Monotonic tier score, 0 (Rien) through 5 (Or).
    pub medal_score: u8,
    pub medal_simple: String,
    /// Discipline-qualified display label ("Chamois d'or", ...).
    pub medal_label: String,
    /// Cross-discipline merged label, one of six fixed values.
    pub medal_label_merged: String,

    /// Resolved event instant; explicit date when present, deterministic
    /// fallback otherwise. Never null.
    pub event_dt: NaiveDateTime,
    pub birth_dt: Option<NaiveDate>,
    pub age_years: Option<f64>,

    pub course_id: String,
    /// Dense zero-based rank over distinct course ids.
    pub course_order: usize,
    /// Human-readable course rendering; not guaranteed unique.
    pub course_label: String,
}

impl EnrichedRecord {
    pub fn status(&self) -> Option<Status> {
        self.record.status()
    }

    /// Relative-rank fraction as a percentage, read leniently from the
    /// preserved `rank_relative` column when the source carried one.
    pub fn centile(&self) -> Option<f64> {
        let raw = self.record.extra.get("rank_relative")?;
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v * 100.0)
    }
}
