use crate::types::EnrichedRecord;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Read-only queryable view over an enriched record set.
///
/// The roster carried at construction time fixes the default person
/// iteration order for grouped views. Filters return borrowed subsets;
/// nothing here mutates the records.
#[derive(Debug, Clone)]
pub struct EnrichedDataset {
    records: Vec<EnrichedRecord>,
    roster: Vec<String>,
}

impl EnrichedDataset {
    pub fn new(records: Vec<EnrichedRecord>, roster: Vec<String>) -> Self {
        Self { records, roster }
    }

    pub fn records(&self) -> &[EnrichedRecord] {
        &self.records
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose parsed season falls in the inclusive range; records
    /// without a parseable season are excluded.
    pub fn filter_seasons(&self, range: RangeInclusive<i32>) -> Vec<&EnrichedRecord> {
        self.records
            .iter()
            .filter(|r| r.season_num.is_some_and(|s| range.contains(&s)))
            .collect()
    }

    pub fn filter_disciplines(&self, disciplines: &[&str]) -> Vec<&EnrichedRecord> {
        self.records
            .iter()
            .filter(|r| {
                r.record
                    .discipline
                    .as_deref()
                    .is_some_and(|d| disciplines.contains(&d))
            })
            .collect()
    }

    pub fn filter_people(&self, people: &[&str]) -> Vec<&EnrichedRecord> {
        self.records
            .iter()
            .filter(|r| people.contains(&r.record.person.as_str()))
            .collect()
    }

    /// Groups by person in roster order; people without records are
    /// omitted, people outside the roster (none, post-filter) would sort
    /// after it.
    pub fn group_by_person(&self) -> Vec<(&str, Vec<&EnrichedRecord>)> {
        let mut by_person: BTreeMap<&str, Vec<&EnrichedRecord>> = BTreeMap::new();
        for record in &self.records {
            by_person
                .entry(record.record.person.as_str())
                .or_default()
                .push(record);
        }

        let mut groups = Vec::new();
        for person in &self.roster {
            if let Some(records) = by_person.remove(person.as_str()) {
                groups.push((person.as_str(), records));
            }
        }
        groups.extend(by_person);
        groups
    }

    /// Groups by raw discipline string; records without a discipline key
    /// under the empty string.
    pub fn group_by_discipline(&self) -> BTreeMap<&str, Vec<&EnrichedRecord>> {
        let mut groups: BTreeMap<&str, Vec<&EnrichedRecord>> = BTreeMap::new();
        for record in &self.records {
            groups
                .entry(record.record.discipline.as_deref().unwrap_or(""))
                .or_default()
                .push(record);
        }
        groups
    }

    /// Groups by parsed season; `None` (unparseable seasons) groups first.
    pub fn group_by_season(&self) -> BTreeMap<Option<i32>, Vec<&EnrichedRecord>> {
        let mut groups: BTreeMap<Option<i32>, Vec<&EnrichedRecord>> = BTreeMap::new();
        for record in &self.records {
            groups.entry(record.season_num).or_default().push(record);
        }
        groups
    }

    /// Records in dense course order, person as tie-break within a course.
    pub fn iter_course_order(&self) -> impl Iterator<Item = &EnrichedRecord> {
        let mut ordered: Vec<&EnrichedRecord> = self.records.iter().collect();
        ordered.sort_by(|a, b| {
            (a.course_order, a.record.person.as_str())
                .cmp(&(b.course_order, b.record.person.as_str()))
        });
        ordered.into_iter()
    }
}
