//! Parsing of raw record arrays.
//!
//! The external fetch layer hands this crate JSON arrays of loosely-shaped
//! records. The envelope (valid JSON, an array of objects) is a caller
//! contract and fails fast with path context; the *contents* of each record
//! stay untrusted and are only vetted later by the normalizer.

use log::debug;
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::models::RawRecord;

/// Parse a JSON array of raw records from text.
///
/// Fails with [`CoreError::InvalidRecordJson`] when the text is not valid
/// JSON or does not deserialize as an array of record objects. The error
/// carries the path to the first offending element.
pub fn records_from_json_str(json_str: &str) -> CoreResult<Vec<RawRecord>> {
    let deserializer = &mut serde_json::Deserializer::from_str(json_str);
    serde_path_to_error::deserialize(deserializer).map_err(|e| CoreError::InvalidRecordJson {
        path: e.path().to_string(),
        message: e.inner().to_string(),
    })
}

/// Tolerant variant for callers that already hold parsed JSON.
///
/// Elements that are not record-shaped objects are skipped with a debug log
/// instead of failing the batch, matching the pipeline's posture toward
/// partially corrupt feeds.
pub fn records_from_values(values: Vec<Value>) -> Vec<RawRecord> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("skipping malformed record at index {idx}: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_from_json_str() {
        let records = records_from_json_str(
            r#"[
                {"Region": "Pacific", "Timestamp": "2023-06-01", "Data": {"temperature": 28.4}},
                {"Region": "Indian Ocean", "Timestamp": "garbage", "Data": {}}
            ]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].region, "Pacific");
        // A bad timestamp is not an envelope error; normalization handles it.
        assert_eq!(records[1].timestamp, "garbage");
    }

    #[test]
    fn test_invalid_envelope_reports_path() {
        let err = records_from_json_str(r#"[{"Region": "Pacific", "ID": "not-a-number"}]"#)
            .unwrap_err();
        match err {
            CoreError::InvalidRecordJson { path, .. } => assert!(path.contains("ID")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_not_an_array_fails() {
        assert!(records_from_json_str(r#"{"Region": "Pacific"}"#).is_err());
        assert!(records_from_json_str("not json at all").is_err());
    }

    #[test]
    fn test_records_from_values_skips_non_objects() {
        let records = records_from_values(vec![
            json!({"Region": "Pacific", "Timestamp": "2023-06-01", "Data": {}}),
            json!("just a string"),
            json!(42),
            json!({"Region": "Atlantic", "Timestamp": "2023-06-02", "Data": {}}),
        ]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].region, "Atlantic");
    }
}
