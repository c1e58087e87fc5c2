pub mod auth;
pub mod detection;

pub use auth::{AuthPayload, AuthResponse, User};
pub use detection::{
    DetectionList, DetectionRecord, DetectionsResponse, Prediction, RecordKind, UploadResponse,
    partition_by_kind,
};
