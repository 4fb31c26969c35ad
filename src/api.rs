//! REST client for the designer backend
//!
//! Response shapes are defined by the server; every field is optional on the
//! wire and defaults to "falsy", matching how the web front end reads them.
//! Calls are issued once, with no timeout and no retry.

use crate::auth::register::Screenshot;
use crate::session::UserInfo;
use crate::{Error, Result};
use reqwest::blocking::{multipart, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

pub const DESIGN_ACCESS_PATH: &str = "/api/user/design-access";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const STATUS_PATH: &str = "/api/auth/status";
pub const REGISTER_PATH: &str = "/api/auth/register";

/// HTTP status plus decoded body.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub body: T,
}

impl<T> ApiResponse<T> {
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignAccessResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub can_access: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserInfo>,
    #[serde(default)]
    pub message: Option<String>,
    /// Account status on 403 answers
    #[serde(default)]
    pub status: Option<String>,
    /// Rejection reason on 403 answers
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthStatusResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Multipart body of a registration.
#[derive(Debug, Clone)]
pub struct RegistrationPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    pub payment_method: String,
    pub screenshot: Screenshot,
}

/// The four backend calls the front end makes.
pub trait AuthApi {
    fn design_access(&self, token: &str) -> Result<DesignAccessResponse>;

    fn login(&self, request: &LoginRequest) -> Result<ApiResponse<LoginResponse>>;

    fn auth_status(&self, token: &str) -> Result<AuthStatusResponse>;

    fn register(&self, payload: &RegistrationPayload) -> Result<ApiResponse<RegisterResponse>>;
}

/// Blocking reqwest-backed [`AuthApi`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: Url) -> Result<Self> {
        let client = Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, base })
    }

    pub fn from_config(config: &crate::DesignerConfig) -> Result<Self> {
        Self::new(config.api_url()?)
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| Error::Config(format!("bad endpoint {}: {}", path, e)))
    }

    fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<ApiResponse<T>> {
        let resp = req.send()?;
        let status = resp.status().as_u16();
        let body = resp.json::<T>()?;
        Ok(ApiResponse { status, body })
    }
}

impl AuthApi for ApiClient {
    fn design_access(&self, token: &str) -> Result<DesignAccessResponse> {
        log::debug!("GET {}", DESIGN_ACCESS_PATH);
        let req = self
            .client
            .get(self.endpoint(DESIGN_ACCESS_PATH)?)
            .bearer_auth(token);
        Ok(self.send(req)?.body)
    }

    fn login(&self, request: &LoginRequest) -> Result<ApiResponse<LoginResponse>> {
        log::debug!("POST {} for {}", LOGIN_PATH, request.email);
        let req = self.client.post(self.endpoint(LOGIN_PATH)?).json(request);
        self.send(req)
    }

    fn auth_status(&self, token: &str) -> Result<AuthStatusResponse> {
        log::debug!("GET {}", STATUS_PATH);
        let req = self
            .client
            .get(self.endpoint(STATUS_PATH)?)
            .bearer_auth(token);
        Ok(self.send(req)?.body)
    }

    fn register(&self, payload: &RegistrationPayload) -> Result<ApiResponse<RegisterResponse>> {
        log::debug!(
            "POST {} for {} ({} byte screenshot)",
            REGISTER_PATH,
            payload.email,
            payload.screenshot.len()
        );
        let shot = &payload.screenshot;
        let part = multipart::Part::bytes(shot.bytes().to_vec())
            .file_name(shot.file_name().to_string())
            .mime_str(shot.mime())?;
        let form = multipart::Form::new()
            .text("name", payload.name.clone())
            .text("email", payload.email.clone())
            .text("password", payload.password.clone())
            .text("paymentMethod", payload.payment_method.clone())
            .part("paymentScreenshot", part);
        let req = self
            .client
            .post(self.endpoint(REGISTER_PATH)?)
            .multipart(form);
        self.send(req)
    }
}
