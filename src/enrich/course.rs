use crate::types::{EnrichedRecord, ResultRecord};
use std::collections::{HashMap, HashSet};

/// Composite course identity: every record of the same physical event
/// (same season, discipline, event label, and source sheet) collapses to
/// the same id, whoever the participant is.
pub fn course_id(record: &ResultRecord) -> String {
    format!(
        "{} | {}-{} | {}",
        record.season.as_deref().unwrap_or(""),
        record.discipline.as_deref().unwrap_or(""),
        record.event.as_deref().unwrap_or(""),
        record.source_file
    )
}

/// Human-readable course rendering; unlike `course_id` it omits the
/// source sheet and is not guaranteed unique.
pub fn course_label(record: &ResultRecord) -> String {
    format!(
        "{} {}-{}",
        record.season.as_deref().unwrap_or(""),
        record.discipline.as_deref().unwrap_or(""),
        record.event.as_deref().unwrap_or("")
    )
}

/// Chronological-ish sort key over distinct courses. Missing seasons sort
/// last; the course id itself is the final tie-break so the ordering is
/// deterministic even when two distinct courses share every other field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct CourseKey {
    season_missing: bool,
    season_num: i32,
    event_num: u32,
    discipline_ord: u8,
    event_suf: String,
    source_file: String,
    course_id: String,
}

impl CourseKey {
    fn of(record: &EnrichedRecord) -> Self {
        Self {
            season_missing: record.season_num.is_none(),
            season_num: record.season_num.unwrap_or(0),
            event_num: record.event_num,
            discipline_ord: record.discipline_ord,
            event_suf: record.event_suf.clone(),
            source_file: record.record.source_file.clone(),
            course_id: record.course_id.clone(),
        }
    }
}

/// Global ordering barrier: collects the distinct course ids, sorts them,
/// and assigns each a dense zero-based order inherited by every record
/// that shares the id. Requires all per-record derivation to be complete.
///
/// Returns the number of distinct courses.
pub fn assign_course_order(records: &mut [EnrichedRecord]) -> usize {
    let mut distinct: Vec<CourseKey> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for record in records.iter() {
        if seen.insert(record.course_id.clone()) {
            distinct.push(CourseKey::of(record));
        }
    }

    distinct.sort();

    let order_by_id: HashMap<&str, usize> = distinct
        .iter()
        .enumerate()
        .map(|(order, key)| (key.course_id.as_str(), order))
        .collect();

    for record in records.iter_mut() {
        if let Some(order) = order_by_id.get(record.course_id.as_str()) {
            record.course_order = *order;
        }
    }

    distinct.len()
}
