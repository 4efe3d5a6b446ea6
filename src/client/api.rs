/// Licensing API client
///
/// Two blocking calls against the authorization service: ask whether this
/// machine needs an authorization code, and validate a user-supplied code.
/// Requests are form-encoded; responses use the `{code, msg, data}` envelope
/// where `code == 1` is business success.
use std::time::Duration;

use serde::Deserialize;

use super::error::ApiError;

const CHECK_PATH: &str = "/soft_desktop/check_get_auth_code";
const VALIDATE_PATH: &str = "/soft_desktop/check_auth_code_valid";
const BUSINESS_SUCCESS: i64 = 1;
const TIMEOUT_SECS: u64 = 10;

#[derive(Deserialize)]
struct Envelope<T> {
    code: i64,
    #[serde(default)]
    msg: String,
    data: Option<T>,
}

#[derive(Deserialize)]
struct CheckData {
    is_need_auth_code: i64,
    #[serde(default)]
    auth_code_url: Option<String>,
}

#[derive(Deserialize)]
struct ValidateData {
    auth_code_status: i64,
}

/// Server's answer to the need-auth-code check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthDecision {
    pub needs_code: bool,
    pub activation_url: Option<String>,
}

/// Blocking client for the licensing service.
/// The base URL is injected at construction; there is no ambient default.
pub struct LicenseClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl LicenseClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::Network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Ask whether this machine needs an authorization code.
    pub fn check_need_auth_code(
        &self,
        device_id: &str,
        soft_number: &str,
    ) -> Result<AuthDecision, ApiError> {
        let form = [("device_id", device_id), ("soft_number", soft_number)];
        let data: CheckData = self.post_form(CHECK_PATH, &form)?;

        Ok(AuthDecision {
            needs_code: data.is_need_auth_code == 1,
            activation_url: data.auth_code_url,
        })
    }

    /// Validate a user-supplied authorization code.
    pub fn validate_auth_code(
        &self,
        device_id: &str,
        soft_number: &str,
        auth_code: &str,
    ) -> Result<bool, ApiError> {
        let form = [
            ("device_id", device_id),
            ("soft_number", soft_number),
            ("auth_code", auth_code),
        ];
        let data: ValidateData = self.post_form(VALIDATE_PATH, &form)?;

        Ok(data.auth_code_status == 1)
    }

    fn post_form<T>(&self, path: &str, form: &[(&str, &str)]) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .post(&url)
            .form(form)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Network(format!("HTTP {}", status)));
        }

        let envelope: Envelope<T> = response
            .json()
            .map_err(|e| ApiError::Malformed(e.to_string()))?;

        if envelope.code != BUSINESS_SUCCESS {
            return Err(ApiError::Business(envelope.msg));
        }

        envelope
            .data
            .ok_or_else(|| ApiError::Malformed("missing data field in success response".to_string()))
    }
}

/// Build the activation page URL the user visits to obtain a code.
pub fn activation_url(auth_code_url: &str, device_id: &str, soft_number: &str) -> String {
    format!(
        "{}?device_id={}&software_code={}",
        auth_code_url, device_id, soft_number
    )
}
