use super::super::aggregate::ClosureAggregates;
use super::super::domain::{CategoryCount, ClosureDimension, OTHER_CATEGORY};
use super::views::{CategoryShare, ClosureReport, YearCount};

/// Knobs for the derived report. Defaults mirror the published dashboard:
/// six named slices in the type breakdown, the three leading types in the
/// concentration figure and a six-year recent window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub top_n: usize,
    pub top_share_count: usize,
    pub recent_window: usize,
    pub reference_year: Option<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_n: 6,
            top_share_count: 3,
            recent_window: 6,
            reference_year: None,
        }
    }
}

impl ClosureReport {
    pub fn from_aggregates(aggregates: &ClosureAggregates, options: &ReportOptions) -> Self {
        let total_closures = aggregates.total();

        let yearly_average = if aggregates.by_year.is_empty() {
            None
        } else {
            Some((total_closures as f64 / aggregates.by_year.len() as f64).round() as usize)
        };

        let mut report = Self {
            total_closures,
            yearly_average,
            peak_year: peak_year(&aggregates.by_year),
            latest_year: latest_year(&aggregates.by_year, options.reference_year.as_deref()),
            leading_type: leading_share(&aggregates.by_type),
            leading_region: leading_share(&aggregates.by_region),
            top_type_share_pct: top_share(&aggregates.by_type, options.top_share_count),
            type_breakdown: breakdown_with_remainder(&aggregates.by_type, options.top_n),
            recent_years: trailing(&aggregates.by_year, options.recent_window),
            observations: Vec::new(),
        };
        report.observations = super::generate_observations(&report, aggregates, options);
        report
    }
}

impl ClosureAggregates {
    pub fn report(&self, options: &ReportOptions) -> ClosureReport {
        ClosureReport::from_aggregates(self, options)
    }

    /// Share of all dated closures held by `key` in the given bucket, as a
    /// percentage with one decimal place.
    pub fn share_of(&self, dimension: ClosureDimension, key: &str) -> Option<f64> {
        let entry = self
            .bucket(dimension)
            .iter()
            .find(|entry| entry.key == key)?;
        percent(entry.count, self.total())
    }
}

pub(crate) fn percent(part: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    let pct = part as f64 / total as f64 * 100.0;
    Some((pct * 10.0).round() / 10.0)
}

fn peak_year(by_year: &[CategoryCount]) -> Option<YearCount> {
    by_year
        .iter()
        .fold(None::<&CategoryCount>, |max, current| match max {
            Some(max) if max.count >= current.count => Some(max),
            _ => Some(current),
        })
        .map(|entry| YearCount {
            year: entry.key.clone(),
            count: entry.count,
        })
}

fn latest_year(by_year: &[CategoryCount], reference: Option<&str>) -> Option<YearCount> {
    match reference {
        Some(year) => {
            let count = by_year
                .iter()
                .find(|entry| entry.key == year)
                .map_or(0, |entry| entry.count);
            Some(YearCount {
                year: year.to_string(),
                count,
            })
        }
        None => by_year.last().map(|entry| YearCount {
            year: entry.key.clone(),
            count: entry.count,
        }),
    }
}

fn leading_share(bucket: &[CategoryCount]) -> Option<CategoryShare> {
    let total = bucket.iter().map(|entry| entry.count).sum();
    let first = bucket.first()?;
    Some(CategoryShare {
        key: first.key.clone(),
        count: first.count,
        share_pct: percent(first.count, total)?,
    })
}

fn top_share(bucket: &[CategoryCount], take: usize) -> f64 {
    let total = bucket.iter().map(|entry| entry.count).sum();
    let top = bucket.iter().take(take).map(|entry| entry.count).sum();
    percent(top, total).unwrap_or(0.0)
}

/// The first `top_n` entries followed by a single remainder entry labelled
/// [`OTHER_CATEGORY`] when anything is left over.
pub fn breakdown_with_remainder(bucket: &[CategoryCount], top_n: usize) -> Vec<CategoryCount> {
    let split = top_n.min(bucket.len());
    let (head, rest) = bucket.split_at(split);
    let mut breakdown = head.to_vec();
    if !rest.is_empty() {
        let remainder = rest.iter().map(|entry| entry.count).sum();
        breakdown.push(CategoryCount::new(OTHER_CATEGORY, remainder));
    }
    breakdown
}

fn trailing(by_year: &[CategoryCount], window: usize) -> Vec<CategoryCount> {
    let start = by_year.len().saturating_sub(window);
    by_year[start..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::closures::aggregate::aggregate;
    use crate::workflows::closures::domain::ClosureRecord;

    fn bucket(entries: &[(&str, usize)]) -> Vec<CategoryCount> {
        entries
            .iter()
            .map(|(key, count)| CategoryCount::new(*key, *count))
            .collect()
    }

    fn sample() -> ClosureAggregates {
        ClosureAggregates {
            by_year: bucket(&[("2019", 4), ("2020", 6), ("2021", 6), ("2022", 4)]),
            by_type: bucket(&[
                ("약국", 7),
                ("의원", 5),
                ("치과의원", 3),
                ("한의원", 2),
                ("병원", 1),
                ("요양병원", 1),
                ("종합병원", 1),
            ]),
            by_region: bucket(&[("서울특별시", 8), ("경기도", 7), ("부산광역시", 5)]),
        }
    }

    #[test]
    fn headline_figures() {
        let report = sample().report(&ReportOptions::default());

        assert_eq!(report.total_closures, 20);
        assert_eq!(report.yearly_average, Some(5));
        assert_eq!(
            report.peak_year,
            Some(YearCount {
                year: "2020".to_string(),
                count: 6
            })
        );
        assert_eq!(
            report.latest_year,
            Some(YearCount {
                year: "2022".to_string(),
                count: 4
            })
        );
    }

    #[test]
    fn leading_categories_carry_their_share() {
        let report = sample().report(&ReportOptions::default());

        let leading_type = report.leading_type.expect("type present");
        assert_eq!(leading_type.key, "약국");
        assert_eq!(leading_type.share_pct, 35.0);

        let leading_region = report.leading_region.expect("region present");
        assert_eq!(leading_region.key, "서울특별시");
        assert_eq!(leading_region.share_pct, 40.0);

        assert_eq!(report.top_type_share_pct, 75.0);
    }

    #[test]
    fn type_breakdown_rolls_up_the_tail() {
        let report = sample().report(&ReportOptions::default());

        assert_eq!(report.type_breakdown.len(), 7);
        assert_eq!(
            report.type_breakdown.last(),
            Some(&CategoryCount::new(OTHER_CATEGORY, 1))
        );
        let total: usize = report.type_breakdown.iter().map(|entry| entry.count).sum();
        assert_eq!(total, report.total_closures);
    }

    #[test]
    fn breakdown_without_tail_has_no_remainder_entry() {
        let entries = bucket(&[("약국", 2), ("의원", 1)]);
        assert_eq!(breakdown_with_remainder(&entries, 6), entries);
        assert_eq!(
            breakdown_with_remainder(&entries, 1),
            bucket(&[("약국", 2), (OTHER_CATEGORY, 1)])
        );
    }

    #[test]
    fn recent_window_takes_trailing_years() {
        let options = ReportOptions {
            recent_window: 2,
            ..ReportOptions::default()
        };
        let report = sample().report(&options);
        assert_eq!(report.recent_years, bucket(&[("2021", 6), ("2022", 4)]));

        let wide = ReportOptions {
            recent_window: 10,
            ..ReportOptions::default()
        };
        assert_eq!(sample().report(&wide).recent_years.len(), 4);
    }

    #[test]
    fn reference_year_overrides_latest() {
        let options = ReportOptions {
            reference_year: Some("2024".to_string()),
            ..ReportOptions::default()
        };
        let report = sample().report(&options);
        assert_eq!(
            report.latest_year,
            Some(YearCount {
                year: "2024".to_string(),
                count: 0
            })
        );
    }

    #[test]
    fn share_of_rounds_to_one_decimal() {
        let aggregates = aggregate(&[
            ClosureRecord::new(Some("20200101"), Some("의원"), Some("서울")),
            ClosureRecord::new(Some("20200101"), Some("약국"), Some("서울")),
            ClosureRecord::new(Some("20200101"), Some("약국"), Some("부산")),
        ]);

        assert_eq!(
            aggregates.share_of(ClosureDimension::FacilityType, "약국"),
            Some(66.7)
        );
        assert_eq!(
            aggregates.share_of(ClosureDimension::Region, "부산"),
            Some(33.3)
        );
        assert_eq!(aggregates.share_of(ClosureDimension::Region, "대구"), None);
    }

    #[test]
    fn empty_aggregates_produce_an_empty_report() {
        let report = ClosureAggregates::default().report(&ReportOptions::default());

        assert_eq!(report.total_closures, 0);
        assert!(report.yearly_average.is_none());
        assert!(report.peak_year.is_none());
        assert!(report.latest_year.is_none());
        assert!(report.leading_type.is_none());
        assert!(report.leading_region.is_none());
        assert_eq!(report.top_type_share_pct, 0.0);
        assert!(report.type_breakdown.is_empty());
        assert!(report.recent_years.is_empty());
        assert!(report.observations.is_empty());
    }

    #[test]
    fn empty_observations_are_left_out_of_json() {
        let report = ClosureAggregates::default().report(&ReportOptions::default());
        let json = serde_json::to_value(&report).expect("report serializes");

        assert!(json.get("observations").is_none());
        assert_eq!(json["total_closures"], 0);

        let populated = sample().report(&ReportOptions::default());
        let json = serde_json::to_value(&populated).expect("report serializes");
        assert!(json["observations"].as_array().is_some_and(|lines| !lines.is_empty()));
    }
}
