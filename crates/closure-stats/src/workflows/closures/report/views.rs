use super::super::domain::CategoryCount;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearCount {
    pub year: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub key: String,
    pub count: usize,
    pub share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosureReport {
    pub total_closures: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yearly_average: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_year: Option<YearCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_year: Option<YearCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leading_type: Option<CategoryShare>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leading_region: Option<CategoryShare>,
    pub top_type_share_pct: f64,
    pub type_breakdown: Vec<CategoryCount>,
    pub recent_years: Vec<CategoryCount>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
}
