use super::domain::{CategoryCount, ClosureDimension, ClosureRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Closure counts grouped by year, facility type and region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureAggregates {
    /// Ascending by year key.
    pub by_year: Vec<CategoryCount>,
    /// Descending by count, ties in first-seen order.
    pub by_type: Vec<CategoryCount>,
    /// Descending by count, ties in first-seen order.
    pub by_region: Vec<CategoryCount>,
}

impl ClosureAggregates {
    pub fn bucket(&self, dimension: ClosureDimension) -> &[CategoryCount] {
        match dimension {
            ClosureDimension::Year => &self.by_year,
            ClosureDimension::FacilityType => &self.by_type,
            ClosureDimension::Region => &self.by_region,
        }
    }

    /// Number of dated records that went into the aggregates.
    pub fn total(&self) -> usize {
        self.by_year.iter().map(|entry| entry.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_year.is_empty()
    }
}

/// Counts keys while remembering the order they were first seen in, so a
/// stable sort can break ties by encounter order.
#[derive(Debug, Default)]
struct Tally {
    index: HashMap<String, usize>,
    entries: Vec<CategoryCount>,
}

impl Tally {
    fn increment(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&position) => self.entries[position].count += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push(CategoryCount::new(key, 1));
            }
        }
    }

    fn sorted_by_key(mut self) -> Vec<CategoryCount> {
        self.entries.sort_by(|a, b| a.key.cmp(&b.key));
        self.entries
    }

    fn sorted_by_count_desc(mut self) -> Vec<CategoryCount> {
        self.entries.sort_by(|a, b| b.count.cmp(&a.count));
        self.entries
    }
}

/// Groups closure records by year, facility type and region.
///
/// Records without a closure date are skipped entirely. Missing facility
/// types and regions are counted under [`super::domain::OTHER_CATEGORY`].
/// The year is the first four characters of the date taken verbatim, so a
/// malformed date produces a bucket of its own rather than being dropped.
pub fn aggregate(records: &[ClosureRecord]) -> ClosureAggregates {
    let mut years = Tally::default();
    let mut types = Tally::default();
    let mut regions = Tally::default();

    for record in records {
        let Some(year) = record.year_key() else {
            continue;
        };

        years.increment(&year);
        types.increment(record.facility_type_key());
        regions.increment(record.region_key());
    }

    ClosureAggregates {
        by_year: years.sorted_by_key(),
        by_type: types.sorted_by_count_desc(),
        by_region: regions.sorted_by_count_desc(),
    }
}
