mod insights;
pub mod summary;
pub mod views;

pub(crate) use insights::generate_observations;
pub use summary::{breakdown_with_remainder, ReportOptions};
pub use views::{CategoryShare, ClosureReport, YearCount};
