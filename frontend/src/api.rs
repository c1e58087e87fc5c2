//! Central HTTP client for every remote collaborator.
//!
//! All methods return `Result<T, ApiError>` where the error renders to a
//! user-displayable message; nothing in here panics on remote data. Session
//! credentials ride on a cookie, so every request is sent with credentials
//! included and no Authorization header is managed manually.

use std::collections::BTreeMap;

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use shared::{AuthResponse, DetectionRecord, DetectionsResponse, Prediction, UploadResponse, User};
use thiserror::Error;
use web_sys::RequestCredentials;

use crate::config::{API_BASE_URL, INFERENCE_BASE_URL};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Message supplied (or substituted) for a rejected request.
    #[error("{0}")]
    Remote(String),
    #[error("Network error. Please check your connection and try again.")]
    Network,
    #[error("Received an unexpected response from the server.")]
    Decode,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignupRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    #[serde(rename = "passwordConfirm")]
    password_confirm: &'a str,
}

#[derive(Serialize)]
struct ProfileRequest<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct PasswordRequest<'a> {
    #[serde(rename = "passwordCurrent")]
    password_current: &'a str,
    password: &'a str,
    #[serde(rename = "passwordConfirm")]
    password_confirm: &'a str,
}

#[derive(Serialize)]
struct ResetPasswordRequest<'a> {
    token: &'a str,
    password: &'a str,
    #[serde(rename = "passwordConfirm")]
    password_confirm: &'a str,
}

#[derive(Serialize)]
struct SavePredictionRequest<'a> {
    #[serde(rename = "formData")]
    form_data: &'a BTreeMap<String, String>,
    #[serde(flatten)]
    prediction: &'a Prediction,
}

fn api_url(path: &str) -> String {
    format!("{API_BASE_URL}{path}")
}

fn with_credentials(builder: RequestBuilder) -> RequestBuilder {
    builder.credentials(RequestCredentials::Include)
}

/// Sends a built request without the authorization safety net. The session
/// lifecycle calls (bootstrap, login, signup, logout) go through here: a 401
/// on those is an ordinary "not authenticated" outcome handled by the store,
/// not a stale session to bounce on.
async fn send(request: Request) -> Result<Response, ApiError> {
    request.send().await.map_err(|err| {
        log::error!("request failed: {err}");
        ApiError::Network
    })
}

/// Sends a built request and applies the global authorization safety net:
/// a 401 from any endpoint forces navigation to the login page unless we are
/// already there. This catches a stale session discovered mid-flight; the
/// session lifecycle calls bypass it via `send` so the two never conflict.
async fn dispatch(request: Request) -> Result<Response, ApiError> {
    let response = send(request).await?;

    if response.status() == 401 {
        force_login_redirect();
    }

    Ok(response)
}

fn force_login_redirect() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    match location.pathname() {
        Ok(path) if path != "/login" => {
            log::warn!("authorization failure outside the session lifecycle, redirecting");
            let _ = location.set_href("/login");
        }
        _ => {}
    }
}

/// Extracts the richest available message from an error body, falling back
/// to a caller-supplied default.
async fn read_error(response: Response, fallback: &str) -> ApiError {
    #[derive(Deserialize)]
    struct RemoteError {
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        error: Option<String>,
    }

    let message = match response.json::<RemoteError>().await {
        Ok(body) => body.message.or(body.error),
        Err(_) => None,
    };

    ApiError::Remote(message.unwrap_or_else(|| fallback.to_string()))
}

async fn read_json<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(|err| {
        log::error!("failed to decode response body: {err}");
        ApiError::Decode
    })
}

async fn post_json<B: Serialize>(
    path: &str,
    body: &B,
    fallback: &str,
) -> Result<Response, ApiError> {
    let request = with_credentials(Request::post(&api_url(path)))
        .json(body)
        .map_err(|err| {
            log::error!("failed to build request for {path}: {err}");
            ApiError::Decode
        })?;

    let response = dispatch(request).await?;
    if !response.ok() {
        return Err(read_error(response, fallback).await);
    }
    Ok(response)
}

pub async fn login(email: &str, password: &str) -> Result<AuthResponse, ApiError> {
    let request = with_credentials(Request::post(&api_url("/auth/login")))
        .json(&LoginRequest { email, password })
        .map_err(|_| ApiError::Decode)?;

    let response = send(request).await?;
    if !response.ok() {
        return Err(read_error(response, "Login failed. Please try again.").await);
    }
    read_json(response).await
}

pub async fn signup(
    name: &str,
    email: &str,
    password: &str,
    password_confirm: &str,
) -> Result<AuthResponse, ApiError> {
    let request = with_credentials(Request::post(&api_url("/auth/signup")))
        .json(&SignupRequest {
            name,
            email,
            password,
            password_confirm,
        })
        .map_err(|_| ApiError::Decode)?;

    let response = send(request).await?;
    if !response.ok() {
        return Err(read_error(response, "Signup failed. Please try again.").await);
    }
    read_json(response).await
}

/// Session bootstrap. A failure here means "not authenticated", which the
/// caller maps to an anonymous session rather than an error page — an
/// anonymous visitor on a public page must never get bounced to login.
pub async fn current_user() -> Result<User, ApiError> {
    let request = with_credentials(Request::get(&api_url("/auth/me")))
        .build()
        .map_err(|_| ApiError::Decode)?;

    let response = send(request).await?;
    if !response.ok() {
        return Err(read_error(response, "Failed to fetch user").await);
    }
    let envelope: AuthResponse = read_json(response).await?;
    Ok(envelope.data.user)
}

/// Best-effort; the caller clears local session state regardless of outcome,
/// and a failure is logged rather than surfaced.
pub async fn logout() -> Result<(), ApiError> {
    let request = with_credentials(Request::get(&api_url("/auth/logout")))
        .build()
        .map_err(|_| ApiError::Decode)?;

    let response = send(request).await?;
    if !response.ok() {
        return Err(read_error(response, "Logout failed").await);
    }
    Ok(())
}

pub async fn update_profile(name: &str, email: &str) -> Result<User, ApiError> {
    let request = with_credentials(Request::patch(&api_url("/auth/updateMe")))
        .json(&ProfileRequest { name, email })
        .map_err(|_| ApiError::Decode)?;

    let response = dispatch(request).await?;
    if !response.ok() {
        return Err(read_error(response, "Update profile failed").await);
    }
    let envelope: AuthResponse = read_json(response).await?;
    Ok(envelope.data.user)
}

pub async fn update_password(
    current: &str,
    password: &str,
    password_confirm: &str,
) -> Result<(), ApiError> {
    post_json(
        "/auth/updateMyPassword",
        &PasswordRequest {
            password_current: current,
            password,
            password_confirm,
        },
        "Update password failed",
    )
    .await?;
    Ok(())
}

/// Completes a password reset. Only an exact 200 counts as success; anything
/// else surfaces the remote message so the page can flag an expired link.
pub async fn reset_password(
    token: &str,
    password: &str,
    password_confirm: &str,
) -> Result<(), ApiError> {
    let request = with_credentials(Request::post(&api_url("/auth/resetPassword")))
        .json(&ResetPasswordRequest {
            token,
            password,
            password_confirm,
        })
        .map_err(|_| ApiError::Decode)?;

    let response = dispatch(request).await?;
    if response.status() != 200 {
        return Err(read_error(response, "Failed to reset password").await);
    }
    Ok(())
}

/// Submits one scan image for inference and persistence. The envelope's
/// status field is authoritative: a 2xx carrying `status != "success"` is
/// still a failed analysis.
pub async fn upload_detection(file: &gloo_file::File) -> Result<Prediction, ApiError> {
    let form_data = web_sys::FormData::new().map_err(|_| ApiError::Decode)?;
    form_data
        .append_with_blob("image", file.as_ref())
        .map_err(|_| ApiError::Decode)?;

    let request = with_credentials(Request::post(&api_url("/detection")))
        .body(form_data)
        .map_err(|err| {
            log::error!("failed to build upload request: {err}");
            ApiError::Decode
        })?;

    let response = dispatch(request).await?;
    if !response.ok() {
        return Err(read_error(response, "Upload failed").await);
    }

    let envelope: UploadResponse = read_json(response).await?;
    if !envelope.is_success() {
        return Err(ApiError::Remote(envelope.message.unwrap_or_else(|| {
            "Upload failed or analysis unsuccessful. Please try again.".to_string()
        })));
    }

    envelope
        .data
        .map(|data| data.prediction)
        .ok_or(ApiError::Decode)
}

pub async fn list_detections() -> Result<Vec<DetectionRecord>, ApiError> {
    let request = with_credentials(Request::get(&api_url("/detection/get-detections")))
        .build()
        .map_err(|_| ApiError::Decode)?;

    let response = dispatch(request).await?;
    if !response.ok() {
        return Err(read_error(response, "Failed to fetch detections").await);
    }
    let envelope: DetectionsResponse = read_json(response).await?;
    Ok(envelope.data.detections)
}

/// Runs the tabular model against a set of clinical measurements.
pub async fn predict_tabular(form: &BTreeMap<String, String>) -> Result<Prediction, ApiError> {
    let request = Request::post(&format!("{INFERENCE_BASE_URL}/predict"))
        .json(form)
        .map_err(|_| ApiError::Decode)?;

    let response = dispatch(request).await?;
    if !response.ok() {
        return Err(read_error(response, "Prediction failed").await);
    }
    read_json(response).await
}

/// Persists a tabular prediction alongside the measurements it was made from.
pub async fn save_prediction(
    form: &BTreeMap<String, String>,
    prediction: &Prediction,
) -> Result<(), ApiError> {
    post_json(
        "/detection/save-prediction",
        &SavePredictionRequest {
            form_data: form,
            prediction,
        },
        "Failed to save prediction",
    )
    .await?;
    Ok(())
}
