//! Public JSON shape of report records.
//!
//! Each record becomes a flat object: the fixed fields (`notice` for the legacy version,
//! `id`, `date`, `report_name`, `report_agency`) followed by every key of `data`, in that
//! order. Keys from `data` are applied last and win on collision, keeping the fixed field's
//! position.

use analytics_core::models::{AnalyticsRecord, ApiVersion};
use serde_json::{Map, Value};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn shape_record(record: AnalyticsRecord, version: &ApiVersion) -> Value {
    let mut object = Map::new();

    if let Some(notice) = version.notice() {
        object.insert("notice".to_string(), Value::from(notice));
    }
    object.insert("id".to_string(), Value::from(record.id));
    object.insert(
        "date".to_string(),
        record
            .date
            .map(|d| Value::from(d.format(DATE_FORMAT).to_string()))
            .unwrap_or(Value::Null),
    );
    object.insert("report_name".to_string(), Value::from(record.report_name));
    object.insert(
        "report_agency".to_string(),
        record.report_agency.map(Value::from).unwrap_or(Value::Null),
    );

    if let Some(Value::Object(data)) = record.data {
        object.extend(data);
    }

    Value::Object(object)
}

/// Shape every record, keeping query order.
pub fn shape_records(records: Vec<AnalyticsRecord>, version: &ApiVersion) -> Vec<Value> {
    records
        .into_iter()
        .map(|record| shape_record(record, version))
        .collect()
}
