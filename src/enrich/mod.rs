pub mod course;
pub mod discipline;
pub mod event;
pub mod medal;
pub mod temporal;

use crate::config::Config;
use crate::types::{EnrichedRecord, ResultRecord};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Summary of a completed enrichment run.
#[derive(Debug, Serialize)]
pub struct EnrichmentReport {
    pub total_records: usize,
    /// Records kept after the roster filter.
    pub kept_records: usize,
    pub explicit_dates: usize,
    pub fallback_dates: usize,
    pub unknown_disciplines: usize,
    pub distinct_courses: usize,
}

/// Numeric parse of a season string; tolerates float-ish renderings like
/// "2020.0". Anything else degrades to `None`.
pub fn parse_season(season: Option<&str>) -> Option<i32> {
    let raw = season?.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(n) = raw.parse::<i32>() {
        return Some(n);
    }
    raw.parse::<f64>().ok().map(|f| f.trunc() as i32)
}

/// Per-record derivation: everything that needs no knowledge of the other
/// records. Pure and order-independent.
fn derive_record(record: ResultRecord, config: &Config) -> EnrichedRecord {
    let season_num = parse_season(record.season.as_deref());
    let discipline_ord = discipline::discipline_order(record.discipline.as_deref());
    let (event_num, event_suf) = event::parse_event(record.event.as_deref());

    let medal_score = medal::medal_score(record.medal.as_deref());
    let medal_simple = medal::medal_simple(record.medal.as_deref());
    let medal_label =
        medal::medal_label_discipline(record.discipline.as_deref(), record.medal.as_deref());
    let medal_label_merged = medal::medal_label_merged(record.medal.as_deref());

    let event_dt = temporal::resolve_event_dt(
        record.event_date.as_deref(),
        season_num,
        event_num,
        discipline_ord,
    );
    let birth_dt = config.birth_date(&record.person);
    let age_years = temporal::age_years(event_dt, birth_dt);

    let course_id = course::course_id(&record);
    let course_label = course::course_label(&record);

    EnrichedRecord {
        record,
        season_num,
        discipline_ord,
        event_num,
        event_suf,
        medal_score,
        medal_simple,
        medal_label,
        medal_label_merged,
        event_dt,
        birth_dt,
        age_years,
        course_id,
        // Placeholder until the global ordering barrier runs
        course_order: 0,
        course_label,
    }
}

/// Runs the full enrichment pass: roster filter, per-record derivation,
/// then the course-ordering barrier over the complete derived set.
///
/// Pure in (records, config); re-running on identical input produces
/// field-for-field identical output.
#[instrument(skip(records, config), fields(total = records.len()))]
pub fn enrich_records(
    records: Vec<ResultRecord>,
    config: &Config,
) -> (Vec<EnrichedRecord>, EnrichmentReport) {
    let total_records = records.len();

    let kept: Vec<ResultRecord> = records
        .into_iter()
        .filter(|r| {
            let known = config.knows(&r.person);
            if !known {
                debug!(person = %r.person, "Dropping record for person outside the roster");
            }
            known
        })
        .collect();
    let kept_records = kept.len();

    let explicit_dates = kept
        .iter()
        .filter(|r| temporal::parse_event_date(r.event_date.as_deref()).is_some())
        .count();

    let mut enriched: Vec<EnrichedRecord> = kept
        .into_iter()
        .map(|record| derive_record(record, config))
        .collect();

    let unknown_disciplines = enriched
        .iter()
        .filter(|r| r.discipline_ord == discipline::DISCIPLINE_UNKNOWN)
        .count();

    // Ordering barrier: needs every record derived before it runs
    let distinct_courses = course::assign_course_order(&mut enriched);

    let report = EnrichmentReport {
        total_records,
        kept_records,
        explicit_dates,
        fallback_dates: kept_records - explicit_dates,
        unknown_disciplines,
        distinct_courses,
    };

    info!(
        kept = report.kept_records,
        dropped = report.total_records - report.kept_records,
        courses = report.distinct_courses,
        "Enrichment pass complete"
    );

    (enriched, report)
}
