use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Structured model output. One shape covers both sources: image inference
/// reports `confidence` and per-class `probabilities`, the tabular predictor
/// reports `probability` plus evaluation metrics. Absent fields stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub prediction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recall: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confusion_matrix: Option<[[u32; 2]; 2]>,
}

/// A persisted detection as returned by the history endpoint. Read-only on
/// the client; `image` holds the base64 scan payload when the record came
/// from an image upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    #[serde(deserialize_with = "crate::auth::lenient_id")]
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub prediction: Option<Prediction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RecordKind {
    #[strum(serialize = "Image scan")]
    Image,
    #[strum(serialize = "Clinical data")]
    Tabular,
}

impl DetectionRecord {
    /// A record is image-based iff the image payload is present. This is the
    /// sole partition rule for history display.
    pub fn kind(&self) -> RecordKind {
        if self.image.is_some() {
            RecordKind::Image
        } else {
            RecordKind::Tabular
        }
    }
}

/// Splits a history listing into (image-based, tabular-based) in input order.
pub fn partition_by_kind(records: &[DetectionRecord]) -> (Vec<&DetectionRecord>, Vec<&DetectionRecord>) {
    records
        .iter()
        .partition(|record| record.kind() == RecordKind::Image)
}

/// Envelope of the upload-and-analyze endpoint. Anything other than
/// `status == "success"` is a failed analysis even on a 2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<UploadData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadData {
    pub prediction: Prediction,
}

impl UploadResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionsResponse {
    pub data: DetectionList,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionList {
    pub detections: Vec<DetectionRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, image: Option<&str>) -> DetectionRecord {
        DetectionRecord {
            id: id.to_string(),
            created_at: "2024-03-01T10:30:00Z".parse().unwrap(),
            image: image.map(str::to_string),
            prediction: None,
        }
    }

    #[test]
    fn image_payload_presence_decides_kind() {
        assert_eq!(record("a", Some("aGVsbG8=")).kind(), RecordKind::Image);
        assert_eq!(record("b", None).kind(), RecordKind::Tabular);
    }

    #[test]
    fn partitions_mixed_history_into_both_groups() {
        let records = vec![record("a", Some("aGVsbG8=")), record("b", None)];
        let (scans, tabular) = partition_by_kind(&records);

        assert_eq!(scans.len(), 1);
        assert_eq!(scans[0].id, "a");
        assert_eq!(tabular.len(), 1);
        assert_eq!(tabular[0].id, "b");
    }

    #[test]
    fn parses_successful_upload_envelope() {
        let body = r#"{
            "status": "success",
            "data": {
                "prediction": {
                    "prediction": "Tumor",
                    "confidence": 0.92,
                    "probabilities": {"Tumor": 0.92, "Normal": 0.08}
                }
            }
        }"#;
        let envelope: UploadResponse = serde_json::from_str(body).unwrap();

        assert!(envelope.is_success());
        let prediction = envelope.data.unwrap().prediction;
        assert_eq!(prediction.prediction, "Tumor");
        assert_eq!(prediction.confidence, Some(0.92));
        assert_eq!(
            prediction.probabilities.unwrap().get("Normal").copied(),
            Some(0.08)
        );
        assert!(prediction.confusion_matrix.is_none());
    }

    #[test]
    fn error_status_is_not_success_even_without_message() {
        let envelope: UploadResponse = serde_json::from_str(r#"{"status":"error"}"#).unwrap();

        assert!(!envelope.is_success());
        assert!(envelope.data.is_none());
    }

    #[test]
    fn serializing_omits_absent_prediction_fields() {
        let prediction = Prediction {
            prediction: "ckd".to_string(),
            confidence: None,
            probability: Some(0.97),
            probabilities: None,
            precision: None,
            recall: None,
            confusion_matrix: None,
        };

        let json = serde_json::to_value(&prediction).unwrap();
        let object = json.as_object().unwrap();

        assert!(object.contains_key("probability"));
        assert!(!object.contains_key("confidence"));
        assert!(!object.contains_key("probabilities"));
        assert!(!object.contains_key("confusion_matrix"));
    }

    #[test]
    fn parses_history_with_sparse_prediction_fields() {
        let body = r#"{"data":{"detections":[
            {"id":"658f","createdAt":"2024-02-11T08:00:00Z","image":"aGVsbG8=",
             "prediction":{"prediction":"Normal","confidence":0.81}},
            {"id":2,"createdAt":"2024-02-12T09:15:00Z",
             "prediction":{"prediction":"ckd","probability":0.97,
                           "confusion_matrix":[[40,2],[3,35]],"precision":0.95,"recall":0.92}}
        ]}}"#;
        let listing: DetectionsResponse = serde_json::from_str(body).unwrap();
        let records = listing.data.detections;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind(), RecordKind::Image);
        assert!(records[0].prediction.as_ref().unwrap().probability.is_none());
        assert_eq!(records[1].kind(), RecordKind::Tabular);
        assert_eq!(records[1].id, "2");
        let metrics = records[1].prediction.as_ref().unwrap();
        assert_eq!(metrics.confusion_matrix.unwrap()[1][1], 35);
    }
}
