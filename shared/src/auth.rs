use serde::{Deserialize, Deserializer, Serialize};

/// The authenticated identity as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub picture_url: Option<String>,
}

/// Envelope shared by the login, signup and current-identity endpoints.
/// `token` is only present on credential submissions; the cookie is what
/// actually carries the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    pub data: AuthPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub user: User,
}

// The remote services have been observed emitting both string and numeric ids.
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_login_envelope() {
        let body = r#"{"token":"abc123","data":{"user":{"id":"u-7","name":"Ada","email":"ada@example.com"}}}"#;
        let response: AuthResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.token.as_deref(), Some("abc123"));
        assert_eq!(response.data.user.id, "u-7");
        assert_eq!(response.data.user.email, "ada@example.com");
    }

    #[test]
    fn tolerates_numeric_id_and_missing_fields() {
        let body = r#"{"data":{"user":{"id":1,"name":"A"}}}"#;
        let response: AuthResponse = serde_json::from_str(body).unwrap();

        assert!(response.token.is_none());
        assert_eq!(response.data.user.id, "1");
        assert_eq!(response.data.user.name, "A");
        assert_eq!(response.data.user.email, "");
    }
}
