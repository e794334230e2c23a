use serde::{Deserialize, Serialize};

/// Label used when a categorical field is missing, and for the remainder
/// slice of a breakdown.
pub const OTHER_CATEGORY: &str = "기타";

/// One facility closure event as read from the export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosureRecord {
    pub closure_date: Option<String>,
    pub facility_type: Option<String>,
    pub region_name: Option<String>,
    pub facility_name: Option<String>,
    pub district_name: Option<String>,
}

impl ClosureRecord {
    pub fn new(
        closure_date: Option<&str>,
        facility_type: Option<&str>,
        region_name: Option<&str>,
    ) -> Self {
        Self {
            closure_date: closure_date.map(str::to_string),
            facility_type: facility_type.map(str::to_string),
            region_name: region_name.map(str::to_string),
            ..Self::default()
        }
    }

    /// First four characters of the closure date, `None` when the date is
    /// absent or empty. The prefix is not checked for digits.
    pub fn year_key(&self) -> Option<String> {
        self.closure_date
            .as_deref()
            .filter(|date| !date.is_empty())
            .map(|date| date.chars().take(4).collect())
    }

    pub fn facility_type_key(&self) -> &str {
        category_or_other(self.facility_type.as_deref())
    }

    pub fn region_key(&self) -> &str {
        category_or_other(self.region_name.as_deref())
    }
}

fn category_or_other(value: Option<&str>) -> &str {
    match value {
        Some(label) if !label.is_empty() => label,
        _ => OTHER_CATEGORY,
    }
}

/// A single bucket entry: category key and how many records fell into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub key: String,
    pub count: usize,
}

impl CategoryCount {
    pub fn new(key: impl Into<String>, count: usize) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }
}

/// The three groupings a closure export is summarised by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosureDimension {
    Year,
    FacilityType,
    Region,
}

impl ClosureDimension {
    pub const fn ordered() -> [Self; 3] {
        [Self::Year, Self::FacilityType, Self::Region]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Year => "Year",
            Self::FacilityType => "Facility type",
            Self::Region => "Region",
        }
    }
}
