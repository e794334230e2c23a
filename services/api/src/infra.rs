use chrono::{Local, NaiveDate};
use closure_stats::config::DatasetConfig;
use closure_stats::workflows::closures::{
    CategoryCount, ClosureDataset, ClosureReport, ReportOptions,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) dataset: Arc<DatasetConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ClosureDataSource {
    Upload,
    Dataset,
}

/// Everything a dashboard needs to draw the closure charts.
#[derive(Debug, Serialize)]
pub(crate) struct ClosureReportPayload {
    pub(crate) generated_on: NaiveDate,
    pub(crate) data_source: ClosureDataSource,
    pub(crate) rows: usize,
    pub(crate) undated_rows: usize,
    pub(crate) by_year: Vec<CategoryCount>,
    pub(crate) by_type: Vec<CategoryCount>,
    pub(crate) by_region: Vec<CategoryCount>,
    pub(crate) report: ClosureReport,
}

impl ClosureReportPayload {
    pub(crate) fn build(
        dataset: &ClosureDataset,
        data_source: ClosureDataSource,
        options: &ReportOptions,
    ) -> Self {
        let aggregates = dataset.aggregates();
        let report = aggregates.report(options);

        Self {
            generated_on: Local::now().date_naive(),
            data_source,
            rows: dataset.records().len(),
            undated_rows: dataset.undated_count(),
            by_year: aggregates.by_year,
            by_type: aggregates.by_type,
            by_region: aggregates.by_region,
            report,
        }
    }
}
