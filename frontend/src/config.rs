//! Deployment endpoints, overridable at build time.

pub const APP_NAME: &str = "Kidney Cancer Detection";

/// Authentication and persistence service.
pub const API_BASE_URL: &str = match option_env!("API_BASE_URL") {
    Some(url) => url,
    None => "http://localhost:5000/api/v1",
};

/// Tabular inference service.
pub const INFERENCE_BASE_URL: &str = match option_env!("INFERENCE_BASE_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};
