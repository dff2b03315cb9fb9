// Record extractor - turns a stored document into a chronological series
use crate::domain::metric::{FieldPath, MetricRecord};
use crate::domain::series::{Series, SeriesPoint};
use serde_json::Value;

/// Pull `field` out of every scored record in `document`.
///
/// An absent document, or one without a `records` array, yields an empty
/// series. Records are ordered by parsed timestamp; records whose timestamp
/// does not parse come first, in their stored order.
pub fn extract_series(document: Option<&Value>, field: &FieldPath, divide_by: f64) -> Series {
    let Some(records) = document
        .and_then(|doc| doc.get("records"))
        .and_then(Value::as_array)
    else {
        return Series::default();
    };

    let mut records: Vec<MetricRecord> = records.iter().filter_map(MetricRecord::from_json).collect();
    records.sort_by_key(MetricRecord::sort_key);

    let divisor = if divide_by == 0.0 { 1.0 } else { divide_by };
    let points = records
        .iter()
        .map(|record| SeriesPoint::new(record.label(), record.value(field) / divisor))
        .collect();

    Series::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn recovery_doc() -> Value {
        json!({
            "records": [
                {"created_at": "2024-01-03T08:00:00.000Z", "score": {"recovery_score": 100}},
                {"created_at": "2024-01-01T08:00:00.000Z", "score": {"recovery_score": 50}},
                {"created_at": "2024-01-02T08:00:00.000Z", "score": {"recovery_score": 75}}
            ]
        })
    }

    #[test]
    fn test_absent_document_is_empty() {
        let field = FieldPath::parse("recovery_score");
        assert!(extract_series(None, &field, 1.0).is_empty());
        assert!(extract_series(Some(&json!({"next_token": null})), &field, 1.0).is_empty());
        assert!(extract_series(Some(&json!({"records": []})), &field, 1.0).is_empty());
    }

    #[test]
    fn test_sorted_chronologically() {
        let doc = recovery_doc();
        let series = extract_series(Some(&doc), &FieldPath::parse("recovery_score"), 1.0);

        let labels: Vec<&str> = series.points().iter().map(|p| p.label.as_str()).collect();
        let values: Vec<f64> = series.points().iter().map(|p| p.value).collect();
        assert_eq!(labels, vec!["01/01", "01/02", "01/03"]);
        assert_eq!(values, vec![50.0, 75.0, 100.0]);
    }

    #[test]
    fn test_sort_does_not_depend_on_string_order() {
        // Lexicographically the UTC record sorts first, but the offset one is
        // 20:00 UTC on the 1st.
        let doc = json!({
            "records": [
                {"created_at": "2024-01-01T23:00:00Z", "score": {"strain": 2.0}},
                {"created_at": "2024-01-02T01:00:00+05:00", "score": {"strain": 1.0}}
            ]
        });
        let series = extract_series(Some(&doc), &FieldPath::parse("strain"), 1.0);
        let values: Vec<f64> = series.points().iter().map(|p| p.value).collect();
        assert_eq!(values, vec![1.0, 2.0]);

        // Ordered by instant, labelled by the date each record was written on
        let labels: Vec<&str> = series.points().iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["01/02", "01/01"]);
    }

    #[test]
    fn test_missing_field_defaults_to_zero_and_unscored_is_skipped() {
        let doc = json!({
            "records": [
                {"created_at": "2024-01-01T08:00:00Z", "score": {"strain": 9.5}},
                {"created_at": "2024-01-02T08:00:00Z", "score": {}},
                {"created_at": "2024-01-03T08:00:00Z", "score_state": "PENDING_SCORE"}
            ]
        });
        let series = extract_series(Some(&doc), &FieldPath::parse("strain"), 1.0);
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[1].value, 0.0);
    }

    #[test]
    fn test_divisor_converts_units() {
        let doc = json!({
            "records": [
                {"created_at": "2024-01-01T08:00:00Z",
                 "score": {"stage_summary": {"total_in_bed_time_milli": 27_000_000}}}
            ]
        });
        let field = FieldPath::parse("stage_summary.total_in_bed_time_milli");
        let series = extract_series(Some(&doc), &field, 3_600_000.0);
        assert_eq!(series.points()[0].value, 7.5);
    }

    #[test]
    fn test_malformed_timestamp_falls_back_to_raw_prefix() {
        let doc = json!({
            "records": [
                {"created_at": "2024-01-05T08:00:00Z", "score": {"strain": 3.0}},
                {"created_at": "not a date", "score": {"strain": 4.0}}
            ]
        });
        let series = extract_series(Some(&doc), &FieldPath::parse("strain"), 1.0);
        assert_eq!(series.points()[0].label, "not a");
        assert_eq!(series.points()[1].label, "01/05");
    }
}
