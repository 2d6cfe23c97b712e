//! Per-person reporting statistics over the enriched dataset. These are
//! the pure aggregates behind the comparison views: participation cards,
//! status breakdowns, and points/centile summaries.

use crate::stats::{aligned_top_k_secondary, top_k_average, windowed_average, DEFAULT_TOP_K};
use crate::types::{EnrichedRecord, Status};
use chrono::NaiveDateTime;
use serde::Serialize;

/// Headline card for one person within one discipline.
#[derive(Debug, Clone, Serialize)]
pub struct DisciplineCard {
    pub participations: usize,
    /// Share of finished events in percent, DNS excluded from the base.
    /// `None` when every participation was a DNS. A dataset without any
    /// status information counts as fully finished.
    pub finished_rate: Option<f64>,
    pub best_medal: String,
    pub best_points: Option<f64>,
}

/// Raw status counts for one person within one discipline.
#[derive(Debug, Clone, Serialize)]
pub struct StatusBreakdown {
    pub total: usize,
    pub finished: usize,
    pub dnf: usize,
    pub dsq: usize,
    pub dns: usize,
}

/// Mean/top-k/windowed/record summary over a numeric performance field.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceSummary {
    pub mean_all: Option<f64>,
    pub mean_top_k: Option<f64>,
    pub mean_recent: Option<f64>,
    /// Best single value (smallest, lower is better).
    pub record: Option<f64>,
}

pub fn discipline_card(records: &[&EnrichedRecord]) -> DisciplineCard {
    let participations = records.len();

    let has_status = records.iter().any(|r| r.status().is_some());
    let finished_rate = if has_status {
        let ran: Vec<&&EnrichedRecord> = records
            .iter()
            .filter(|r| r.status() != Some(Status::Dns))
            .collect();
        if ran.is_empty() {
            None
        } else {
            let finished = ran
                .iter()
                .filter(|r| r.status() == Some(Status::Finished))
                .count();
            Some(100.0 * finished as f64 / ran.len() as f64)
        }
    } else if participations > 0 {
        Some(100.0)
    } else {
        None
    };

    let best_medal = records
        .iter()
        .max_by_key(|r| r.medal_score)
        .map(|r| r.medal_simple.clone())
        .unwrap_or_else(|| "Rien".to_string());

    let best_points = records
        .iter()
        .filter_map(|r| r.record.points)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    DisciplineCard {
        participations,
        finished_rate,
        best_medal,
        best_points,
    }
}

pub fn status_breakdown(records: &[&EnrichedRecord]) -> StatusBreakdown {
    let count = |status: Status| records.iter().filter(|r| r.status() == Some(status)).count();
    // Same convention as the card: no status information means everyone finished
    let has_status = records.iter().any(|r| r.status().is_some());
    StatusBreakdown {
        total: records.len(),
        finished: if has_status {
            count(Status::Finished)
        } else {
            records.len()
        },
        dnf: count(Status::Dnf),
        dsq: count(Status::Dsq),
        dns: count(Status::Dns),
    }
}

/// Points summary: overall mean, top-5 mean, mean inside the recent
/// window, and the single best value.
pub fn points_summary(records: &[&EnrichedRecord], cutoff: NaiveDateTime) -> PerformanceSummary {
    let points: Vec<f64> = records.iter().filter_map(|r| r.record.points).collect();

    PerformanceSummary {
        mean_all: if points.is_empty() {
            None
        } else {
            Some(points.iter().sum::<f64>() / points.len() as f64)
        },
        mean_top_k: top_k_average(&points, DEFAULT_TOP_K),
        mean_recent: windowed_average(records, cutoff, |r| r.record.points),
        record: points
            .iter()
            .copied()
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)),
    }
}

/// Centile summary. The top-k mean is aligned on the points ranking: it
/// averages the centiles of the k best-scoring courses, not the k best
/// centiles.
pub fn centile_summary(records: &[&EnrichedRecord], cutoff: NaiveDateTime) -> PerformanceSummary {
    let centiles: Vec<f64> = records.iter().filter_map(|r| r.centile()).collect();

    PerformanceSummary {
        mean_all: if centiles.is_empty() {
            None
        } else {
            Some(centiles.iter().sum::<f64>() / centiles.len() as f64)
        },
        mean_top_k: aligned_top_k_secondary(
            records,
            |r| r.record.points,
            |r| r.centile(),
            DEFAULT_TOP_K,
        ),
        mean_recent: windowed_average(records, cutoff, |r| r.centile()),
        record: centiles
            .iter()
            .copied()
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::enrich::enrich_records;
    use crate::types::ResultRecord;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn record(
        season: &str,
        medal: Option<&str>,
        status: Option<&str>,
        points: Option<f64>,
    ) -> ResultRecord {
        ResultRecord {
            person: "Lucas".to_string(),
            discipline: Some("Chamois".to_string()),
            season: Some(season.to_string()),
            event: Some("1".to_string()),
            medal: medal.map(str::to_string),
            status: status.map(str::to_string),
            points,
            rank: None,
            participants_count: None,
            station: None,
            event_date: None,
            source_file: format!("{season}.pdf"),
            extra: BTreeMap::new(),
        }
    }

    fn enriched(records: Vec<ResultRecord>) -> Vec<EnrichedRecord> {
        let config = Config {
            people: vec!["Lucas".to_string()],
            birthdates: BTreeMap::new(),
        };
        enrich_records(records, &config).0
    }

    #[test]
    fn finished_rate_excludes_dns_from_base() {
        let records = enriched(vec![
            record("2020", None, Some("FINISHED"), None),
            record("2021", None, Some("DNF"), None),
            record("2022", None, Some("DNS"), None),
        ]);
        let refs: Vec<&EnrichedRecord> = records.iter().collect();
        let card = discipline_card(&refs);
        assert_eq!(card.participations, 3);
        // 1 finished out of 2 that actually ran
        assert!((card.finished_rate.unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn missing_status_counts_as_all_finished() {
        let records = enriched(vec![record("2020", None, None, None)]);
        let refs: Vec<&EnrichedRecord> = records.iter().collect();
        assert_eq!(discipline_card(&refs).finished_rate, Some(100.0));
    }

    #[test]
    fn all_dns_yields_no_rate() {
        let records = enriched(vec![record("2020", None, Some("DNS"), None)]);
        let refs: Vec<&EnrichedRecord> = records.iter().collect();
        assert_eq!(discipline_card(&refs).finished_rate, None);
    }

    #[test]
    fn best_medal_follows_score_not_recency() {
        let records = enriched(vec![
            record("2022", Some("Bronze"), None, None),
            record("2020", Some("Or"), None, None),
            record("2021", Some("Cabri"), None, None),
        ]);
        let refs: Vec<&EnrichedRecord> = records.iter().collect();
        let card = discipline_card(&refs);
        assert_eq!(card.best_medal, "Or");
    }

    #[test]
    fn card_without_medals_reports_rien() {
        let records = enriched(vec![record("2020", None, None, Some(55.0))]);
        let refs: Vec<&EnrichedRecord> = records.iter().collect();
        let card = discipline_card(&refs);
        assert_eq!(card.best_medal, "Rien");
        assert_eq!(card.best_points, Some(55.0));
    }

    #[test]
    fn status_breakdown_counts_each_bucket() {
        let records = enriched(vec![
            record("2019", None, Some("FINISHED"), None),
            record("2020", None, Some("FINISHED"), None),
            record("2021", None, Some("DNF"), None),
            record("2022", None, Some("DSQ"), None),
            record("2023", None, Some("DNS"), None),
            record("2024", None, None, None),
        ]);
        let refs: Vec<&EnrichedRecord> = records.iter().collect();
        let breakdown = status_breakdown(&refs);
        assert_eq!(breakdown.total, 6);
        assert_eq!(breakdown.finished, 2);
        assert_eq!(breakdown.dnf, 1);
        assert_eq!(breakdown.dsq, 1);
        assert_eq!(breakdown.dns, 1);
    }

    #[test]
    fn status_breakdown_without_statuses_counts_all_finished() {
        let records = enriched(vec![
            record("2020", None, None, Some(48.0)),
            record("2021", None, None, Some(45.0)),
        ]);
        let refs: Vec<&EnrichedRecord> = records.iter().collect();
        let breakdown = status_breakdown(&refs);
        assert_eq!(breakdown.total, 2);
        assert_eq!(breakdown.finished, 2);
        assert_eq!(breakdown.dnf, 0);
        assert_eq!(breakdown.dsq, 0);
        assert_eq!(breakdown.dns, 0);
    }

    #[test]
    fn points_summary_reports_all_four_statistics() {
        let records = enriched(vec![
            record("2018", None, None, Some(60.0)),
            record("2023", None, None, Some(40.0)),
            record("2024", None, None, Some(20.0)),
        ]);
        let refs: Vec<&EnrichedRecord> = records.iter().collect();
        let cutoff = NaiveDate::from_ymd_opt(2022, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let summary = points_summary(&refs, cutoff);
        assert!((summary.mean_all.unwrap() - 40.0).abs() < 1e-9);
        assert!((summary.mean_top_k.unwrap() - 40.0).abs() < 1e-9);
        assert!((summary.mean_recent.unwrap() - 30.0).abs() < 1e-9);
        assert_eq!(summary.record, Some(20.0));
    }
}
