use super::super::aggregate::ClosureAggregates;
use super::summary::{percent, ReportOptions};
use super::views::ClosureReport;

pub(crate) fn generate_observations(
    report: &ClosureReport,
    aggregates: &ClosureAggregates,
    options: &ReportOptions,
) -> Vec<String> {
    let mut observations = Vec::new();
    if report.total_closures == 0 {
        return observations;
    }

    if let (Some(first), Some(last)) = (aggregates.by_year.first(), aggregates.by_year.last()) {
        let mut line = if first.key == last.key {
            format!("{} facilities closed in {}", report.total_closures, first.key)
        } else {
            format!(
                "{} facilities closed between {} and {}",
                report.total_closures, first.key, last.key
            )
        };
        if let Some(average) = report.yearly_average {
            line.push_str(&format!(", about {average} per year"));
        }
        line.push('.');
        observations.push(line);
    }

    if let Some(peak) = &report.peak_year {
        observations.push(format!(
            "Closures peaked in {} with {} facilities.",
            peak.year, peak.count
        ));
    }

    if let (Some(start), Some(end)) = (report.recent_years.first(), report.recent_years.last()) {
        if start.key != end.key {
            let direction = match end.count.cmp(&start.count) {
                std::cmp::Ordering::Greater => "rose",
                std::cmp::Ordering::Less => "fell",
                std::cmp::Ordering::Equal => "held",
            };
            let mut line = format!(
                "Closures {direction} from {} in {} to {} in {}",
                start.count, start.key, end.count, end.key
            );
            if start.count > 0 && start.count != end.count {
                let change = (end.count as f64 - start.count as f64) / start.count as f64 * 100.0;
                line.push_str(&format!(" ({change:+.1}%)"));
            }
            line.push('.');
            observations.push(line);
        }
    }

    if let Some(leading) = &report.leading_type {
        let mut line = format!(
            "{} is the most common closed facility type at {:.1}% of closures",
            leading.key, leading.share_pct
        );
        let counted = options.top_share_count.min(aggregates.by_type.len());
        if counted > 1 {
            line.push_str(&format!(
                "; the top {counted} types account for {:.1}%",
                report.top_type_share_pct
            ));
        }
        line.push('.');
        observations.push(line);
    }

    if let Some(leading) = &report.leading_region {
        let mut line = format!(
            "{} leads regional closures with {} facilities ({:.1}%)",
            leading.key, leading.count, leading.share_pct
        );
        if let Some(runner_up) = aggregates.by_region.get(1) {
            if let Some(share) = percent(runner_up.count, report.total_closures) {
                line.push_str(&format!(", followed by {} ({share:.1}%)", runner_up.key));
            }
        }
        line.push('.');
        observations.push(line);
    }

    observations
}
