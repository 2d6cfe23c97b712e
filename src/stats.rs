use crate::types::EnrichedRecord;
use chrono::NaiveDateTime;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Number of best results kept by the "Score OPEN" style averages.
pub const DEFAULT_TOP_K: usize = 5;

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn total_cmp(a: &f64, b: &f64) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Average of the k smallest values (lower is better). Fewer than k
/// available averages what is there; nothing available yields `None`.
pub fn top_k_average(values: &[f64], k: usize) -> Option<f64> {
    if values.is_empty() || k == 0 {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(total_cmp);
    let take = k.min(sorted.len());
    mean(&sorted[..take])
}

/// Average of `field` over the records whose resolved timestamp is at or
/// after the cutoff. `None` when no record in the window carries a value.
pub fn windowed_average<F>(
    records: &[&EnrichedRecord],
    cutoff: NaiveDateTime,
    field: F,
) -> Option<f64>
where
    F: Fn(&EnrichedRecord) -> Option<f64>,
{
    let values: Vec<f64> = records
        .iter()
        .filter(|r| r.event_dt >= cutoff)
        .filter_map(|r| field(r))
        .collect();
    mean(&values)
}

/// Selects the k records with the smallest `primary` value, then averages
/// `secondary` over exactly that subset. The coupling matters: the
/// secondary statistic summarizes the same events that won the primary
/// ranking, not its own independent top-k.
pub fn aligned_top_k_secondary<P, S>(
    records: &[&EnrichedRecord],
    primary: P,
    secondary: S,
    k: usize,
) -> Option<f64>
where
    P: Fn(&EnrichedRecord) -> Option<f64>,
    S: Fn(&EnrichedRecord) -> Option<f64>,
{
    if k == 0 {
        return None;
    }
    let mut ranked: Vec<(f64, &EnrichedRecord)> = records
        .iter()
        .filter_map(|r| primary(r).map(|p| (p, *r)))
        .collect();
    ranked.sort_by(|a, b| total_cmp(&a.0, &b.0));

    let values: Vec<f64> = ranked
        .iter()
        .take(k)
        .filter_map(|(_, r)| secondary(r))
        .collect();
    mean(&values)
}

/// Successive personal improvements: orders records by resolved timestamp
/// and keeps each one whose points equal the running minimum so far.
/// Records without points are ignored.
pub fn personal_records<'a>(records: &[&'a EnrichedRecord]) -> Vec<&'a EnrichedRecord> {
    let mut with_points: Vec<&EnrichedRecord> = records
        .iter()
        .copied()
        .filter(|r| r.record.points.is_some())
        .collect();
    with_points.sort_by(|a, b| {
        (a.event_dt, a.discipline_ord, a.record.person.as_str())
            .cmp(&(b.event_dt, b.discipline_ord, b.record.person.as_str()))
    });

    let mut best_so_far = f64::INFINITY;
    let mut improvements = Vec::new();
    for record in with_points {
        // points presence guaranteed by the filter above
        let Some(points) = record.record.points else {
            continue;
        };
        if points <= best_so_far {
            best_so_far = points;
            improvements.push(record);
        }
    }
    improvements
}

/// Best result per season: within each parseable season, keeps the record
/// with the smallest points (first occurrence wins a tie). Records without
/// points or a season are excluded. Callers pass one person/discipline
/// group at a time.
pub fn best_per_season<'a>(records: &[&'a EnrichedRecord]) -> Vec<&'a EnrichedRecord> {
    let mut best: BTreeMap<i32, &EnrichedRecord> = BTreeMap::new();
    for record in records.iter().copied() {
        let (Some(season), Some(points)) = (record.season_num, record.record.points) else {
            continue;
        };
        match best.get(&season) {
            Some(current) if current.record.points.map_or(false, |p| p <= points) => {}
            _ => {
                best.insert(season, record);
            }
        }
    }
    best.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::enrich::enrich_records;
    use crate::types::ResultRecord;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    #[test]
    fn top_k_average_excludes_the_worst() {
        let values = [5.1, 4.9, 6.0, 4.5, 7.2, 3.9];
        let avg = top_k_average(&values, 5).unwrap();
        // average of {5.1, 4.9, 6.0, 4.5, 3.9}; 7.2 is dropped
        assert!((avg - 4.88).abs() < 1e-9, "avg was {avg}");
    }

    #[test]
    fn top_k_average_with_fewer_than_k() {
        let avg = top_k_average(&[10.0, 20.0], 5).unwrap();
        assert!((avg - 15.0).abs() < 1e-9);
        assert_eq!(top_k_average(&[], 5), None);
        assert_eq!(top_k_average(&[1.0], 0), None);
    }

    fn record(person: &str, season: &str, points: Option<f64>, rank_relative: Option<&str>) -> ResultRecord {
        let mut extra = BTreeMap::new();
        if let Some(rr) = rank_relative {
            extra.insert("rank_relative".to_string(), rr.to_string());
        }
        ResultRecord {
            person: person.to_string(),
            discipline: Some("Flèche".to_string()),
            season: Some(season.to_string()),
            event: Some("1".to_string()),
            medal: None,
            status: None,
            points,
            rank: None,
            participants_count: None,
            station: None,
            event_date: None,
            source_file: format!("{season}.pdf"),
            extra,
        }
    }

    fn enriched(records: Vec<ResultRecord>) -> Vec<crate::types::EnrichedRecord> {
        let config = Config {
            people: vec!["Lucas".to_string()],
            birthdates: BTreeMap::new(),
        };
        enrich_records(records, &config).0
    }

    #[test]
    fn windowed_average_respects_cutoff() {
        let records = enriched(vec![
            record("Lucas", "2019", Some(50.0), None),
            record("Lucas", "2023", Some(30.0), None),
            record("Lucas", "2024", Some(20.0), None),
        ]);
        let refs: Vec<&crate::types::EnrichedRecord> = records.iter().collect();
        let cutoff = NaiveDate::from_ymd_opt(2022, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let avg = windowed_average(&refs, cutoff, |r| r.record.points).unwrap();
        assert!((avg - 25.0).abs() < 1e-9);
    }

    #[test]
    fn windowed_average_empty_window_is_none() {
        let records = enriched(vec![record("Lucas", "2019", Some(50.0), None)]);
        let refs: Vec<&crate::types::EnrichedRecord> = records.iter().collect();
        let cutoff = NaiveDate::from_ymd_opt(2022, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(windowed_average(&refs, cutoff, |r| r.record.points), None);
    }

    #[test]
    fn aligned_secondary_follows_primary_selection() {
        // Best two by points are 2021 (10.0, centile 40) and 2022 (12.0, centile 80).
        // The 2023 record has the best centile but is excluded by the primary ranking.
        let records = enriched(vec![
            record("Lucas", "2021", Some(10.0), Some("0.4")),
            record("Lucas", "2022", Some(12.0), Some("0.8")),
            record("Lucas", "2023", Some(99.0), Some("0.01")),
        ]);
        let refs: Vec<&crate::types::EnrichedRecord> = records.iter().collect();
        let avg = aligned_top_k_secondary(&refs, |r| r.record.points, |r| r.centile(), 2).unwrap();
        assert!((avg - 60.0).abs() < 1e-9, "avg was {avg}");
    }

    #[test]
    fn aligned_secondary_without_primary_values_is_none() {
        let records = enriched(vec![record("Lucas", "2021", None, Some("0.4"))]);
        let refs: Vec<&crate::types::EnrichedRecord> = records.iter().collect();
        assert_eq!(
            aligned_top_k_secondary(&refs, |r| r.record.points, |r| r.centile(), 5),
            None
        );
    }

    #[test]
    fn best_per_season_keeps_one_minimum_per_season() {
        let records = enriched(vec![
            record("Lucas", "2020", Some(52.0), None),
            record("Lucas", "2020", Some(48.0), None),
            record("Lucas", "2021", Some(45.0), None),
            record("Lucas", "2021", Some(45.0), None),
            record("Lucas", "2021", None, None),
            record("Lucas", "", Some(1.0), None),
        ]);
        let refs: Vec<&crate::types::EnrichedRecord> = records.iter().collect();
        let bests = best_per_season(&refs);

        let points: Vec<f64> = bests.iter().filter_map(|r| r.record.points).collect();
        assert_eq!(points, vec![48.0, 45.0]);
        // rows without a parseable season or without points never qualify
        assert!(bests.iter().all(|r| r.season_num.is_some()));
        // first occurrence wins a points tie
        assert!(std::ptr::eq(bests[1], &records[2]));
    }

    #[test]
    fn personal_records_keep_successive_improvements() {
        let records = enriched(vec![
            record("Lucas", "2019", Some(50.0), None),
            record("Lucas", "2020", Some(60.0), None),
            record("Lucas", "2021", Some(40.0), None),
            record("Lucas", "2022", Some(40.0), None),
            record("Lucas", "2023", Some(45.0), None),
        ]);
        let refs: Vec<&crate::types::EnrichedRecord> = records.iter().collect();
        let bests = personal_records(&refs);
        let points: Vec<f64> = bests.iter().filter_map(|r| r.record.points).collect();
        // 50 opens, 60 is worse, 40 improves, the tying 40 is kept, 45 is worse
        assert_eq!(points, vec![50.0, 40.0, 40.0]);
    }
}
