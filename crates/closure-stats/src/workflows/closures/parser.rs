use super::domain::ClosureRecord;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<ClosureRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<ClosureRow>() {
        records.push(record?.into());
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct ClosureRow {
    #[serde(rename = "폐업일자", default, deserialize_with = "empty_string_as_none")]
    closure_date: Option<String>,
    #[serde(rename = "요양종별", default, deserialize_with = "empty_string_as_none")]
    facility_type: Option<String>,
    #[serde(rename = "시도명", default, deserialize_with = "empty_string_as_none")]
    region_name: Option<String>,
    #[serde(rename = "요양기관명", default, deserialize_with = "empty_string_as_none")]
    facility_name: Option<String>,
    #[serde(rename = "시군구명", default, deserialize_with = "empty_string_as_none")]
    district_name: Option<String>,
}

impl From<ClosureRow> for ClosureRecord {
    fn from(row: ClosureRow) -> Self {
        Self {
            closure_date: row.closure_date,
            facility_type: row.facility_type,
            region_name: row.region_name,
            facility_name: row.facility_name,
            district_name: row.district_name,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
