use crate::infra::{ClosureDataSource, ClosureReportPayload};
use clap::Args;
use closure_stats::config::{AppConfig, DEFAULT_DATASET_ENCODING};
use closure_stats::error::AppError;
use closure_stats::telemetry;
use closure_stats::workflows::closures::{CategoryCount, ClosureImporter, ReportOptions};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ClosureReportArgs {
    /// Closure export to read (HIRA 요양기관 폐업 현황 CSV)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Text encoding of the export
    #[arg(long, default_value = DEFAULT_DATASET_ENCODING)]
    pub(crate) encoding: String,
    /// Facility types shown by name in the breakdown before the remainder
    #[arg(long, default_value_t = 6)]
    pub(crate) top: usize,
    /// Number of trailing years in the recent-trend window
    #[arg(long, default_value_t = 6)]
    pub(crate) recent: usize,
    /// Year reported as the latest year instead of the last year present
    #[arg(long)]
    pub(crate) reference_year: Option<String>,
    /// Print the payload as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

impl ClosureReportArgs {
    fn options(&self) -> ReportOptions {
        ReportOptions {
            top_n: self.top,
            recent_window: self.recent,
            reference_year: self.reference_year.clone(),
            ..ReportOptions::default()
        }
    }
}

pub(crate) fn run_closure_report(args: ClosureReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let dataset = ClosureImporter::from_path(&args.csv, &args.encoding)?;
    let payload = ClosureReportPayload::build(&dataset, ClosureDataSource::Dataset, &args.options());

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&payload).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        print!("{}", render_closure_report(&payload));
    }

    Ok(())
}

pub(crate) fn render_closure_report(payload: &ClosureReportPayload) -> String {
    let report = &payload.report;
    let mut out = String::new();

    out.push_str("Facility closure report\n");
    out.push_str(&format!(
        "Rows read: {} ({} without a closure date, excluded)\n",
        payload.rows, payload.undated_rows
    ));
    out.push_str(&format!("Total closures: {}\n", report.total_closures));
    if let Some(average) = report.yearly_average {
        out.push_str(&format!("Yearly average: {average}\n"));
    }
    if let Some(peak) = &report.peak_year {
        out.push_str(&format!("Peak year: {} ({})\n", peak.year, peak.count));
    }
    if let Some(latest) = &report.latest_year {
        out.push_str(&format!("Latest year: {} ({})\n", latest.year, latest.count));
    }

    push_bucket(&mut out, "Closures by year", &payload.by_year);
    push_bucket(&mut out, "Closures by facility type", &payload.by_type);
    push_bucket(&mut out, "Closures by region", &payload.by_region);
    push_bucket(&mut out, "Facility type breakdown", &report.type_breakdown);

    if !report.observations.is_empty() {
        out.push_str("\nObservations\n");
        for observation in &report.observations {
            out.push_str(&format!("- {observation}\n"));
        }
    }

    out
}

fn push_bucket(out: &mut String, title: &str, bucket: &[CategoryCount]) {
    if bucket.is_empty() {
        out.push_str(&format!("\n{title}: none\n"));
        return;
    }

    out.push_str(&format!("\n{title}\n"));
    for entry in bucket {
        out.push_str(&format!("- {}: {}\n", entry.key, entry.count));
    }
}
