//! Registration page flow: form checks, payment screenshot, multipart submit

use super::{is_valid_email, SubmitGuard, NETWORK_ERROR};
use crate::api::{AuthApi, RegistrationPayload};
use crate::notify::{Effects, Modal, Notification};
use crate::session::{keys, PendingRegistration, Storage, StorageExt};
use crate::{Error, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Largest accepted payment screenshot, in bytes (inclusive).
pub const MAX_SCREENSHOT_BYTES: usize = 5 * 1024 * 1024;
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Binance,
    EasyPaisa,
    NayaPay,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Binance,
        PaymentMethod::EasyPaisa,
        PaymentMethod::NayaPay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Binance => "binance",
            PaymentMethod::EasyPaisa => "easypaisa",
            PaymentMethod::NayaPay => "nayapay",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PaymentMethod::Binance => "Binance Payment",
            PaymentMethod::EasyPaisa => "EasyPaisa Payment",
            PaymentMethod::NayaPay => "NayaPay Payment",
        }
    }

    /// Step-by-step payment instructions shown once a method is picked.
    pub fn instructions(&self) -> &'static [&'static str] {
        match self {
            PaymentMethod::Binance => &[
                "Pay $29 via Binance:",
                "Open your Binance app",
                "Go to Pay → Send",
                "Send $29 USDT to: binance_wallet_id_here",
                "Take a screenshot of the confirmation",
                "Upload the screenshot below",
            ],
            PaymentMethod::EasyPaisa => &[
                "Pay via EasyPaisa:",
                "Open EasyPaisa app",
                "Go to Send Money",
                "Send PKR 8,000 to: 03XX-XXXXXXX",
                "Take a screenshot of the transaction",
                "Upload the screenshot below",
            ],
            PaymentMethod::NayaPay => &[
                "Pay via NayaPay:",
                "Open NayaPay app",
                "Go to Send Money",
                "Send PKR 8,000 to: 03XX-XXXXXXX",
                "Take a screenshot of the confirmation",
                "Upload the screenshot below",
            ],
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::Validation(format!("Unknown payment method: {}", s)))
    }
}

fn mime_from_extension(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if bytes.starts_with(&[0xff, 0xd8, 0xff]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.starts_with(b"BM") {
        Some("image/bmp")
    } else {
        None
    }
}

/// `1536` -> `"1.5 KB"`
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let i = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let i = i.min(UNITS.len() - 1);
    let value = (bytes as f64 / 1024f64.powi(i as i32) * 100.0).round() / 100.0;
    format!("{} {}", value, UNITS[i])
}

/// A validated payment screenshot ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
    file_name: String,
    mime: &'static str,
    bytes: Vec<u8>,
}

impl Screenshot {
    /// Accept an image of at most [`MAX_SCREENSHOT_BYTES`].
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        let mime = mime_from_extension(&file_name)
            .or_else(|| sniff_mime(&bytes))
            .ok_or_else(|| Error::Validation("Please upload an image file".into()))?;
        if bytes.len() > MAX_SCREENSHOT_BYTES {
            return Err(Error::Validation(
                "File size must be less than 5MB".into(),
            ));
        }
        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "screenshot".to_string());
        Self::from_bytes(name, bytes)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Preview caption, e.g. `File: receipt.png (1.5 KB)`.
    pub fn summary(&self) -> String {
        format!(
            "File: {} ({})",
            self.file_name,
            format_file_size(self.bytes.len() as u64)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    Weak,
    Fair,
    Strong,
}

/// Live strength meter: one point each for length ≥ 8, a lowercase letter,
/// an uppercase letter, a digit and one of `$@#&!`.
pub fn password_strength(password: &str) -> Strength {
    let checks = [
        password.chars().count() >= MIN_PASSWORD_LEN,
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| "$@#&!".contains(c)),
    ];
    match checks.iter().filter(|ok| **ok).count() {
        0 | 1 => Strength::Weak,
        2 | 3 => Strength::Fair,
        _ => Strength::Strong,
    }
}

/// Detailed password advice; empty when the password meets every rule.
pub fn password_issues(password: &str) -> Vec<&'static str> {
    let mut issues = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LEN {
        issues.push("Password must be at least 8 characters");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        issues.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        issues.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        issues.push("Password must contain at least one number");
    }
    issues
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub payment_method: Option<PaymentMethod>,
    pub screenshot: Option<Screenshot>,
    pub agree_terms: bool,
}

impl RegistrationForm {
    /// Checks run in the order the page reports them; the first failure wins.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: &str| Err(Error::Validation(msg.to_string()));
        if !is_valid_email(&self.email) {
            return fail("Please enter a valid email address");
        }
        if self.password != self.confirm_password {
            return fail("Passwords do not match");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return fail("Password must be at least 8 characters");
        }
        if self.payment_method.is_none() {
            return fail("Please select a payment method");
        }
        if self.screenshot.is_none() {
            return fail("Please upload payment screenshot");
        }
        if !self.agree_terms {
            return fail("Please agree to the terms and conditions");
        }
        Ok(())
    }

    fn payload(&self) -> Option<RegistrationPayload> {
        Some(RegistrationPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            payment_method: self.payment_method?.as_str().to_string(),
            screenshot: self.screenshot.clone()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Invalid,
    Busy,
    Submitted,
    Failed,
    NetworkError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterResult {
    pub outcome: RegisterOutcome,
    pub effects: Effects,
}

pub struct RegisterPage<'a, A: AuthApi + ?Sized, S: Storage + ?Sized> {
    api: &'a A,
    storage: &'a mut S,
    guard: SubmitGuard,
}

impl<'a, A: AuthApi + ?Sized, S: Storage + ?Sized> RegisterPage<'a, A, S> {
    pub fn new(api: &'a A, storage: &'a mut S) -> Self {
        Self {
            api,
            storage,
            guard: SubmitGuard::new(),
        }
    }

    pub fn submit_guard(&self) -> SubmitGuard {
        self.guard.clone()
    }

    pub fn submit(&mut self, form: &RegistrationForm) -> RegisterResult {
        let result = |outcome, effects| RegisterResult { outcome, effects };

        let payload = match form.validate() {
            Ok(()) => form.payload(),
            Err(e) => {
                return result(
                    RegisterOutcome::Invalid,
                    Effects::none().notify(Notification::error(e.to_string())),
                )
            }
        };
        let Some(payload) = payload else {
            return result(RegisterOutcome::Invalid, Effects::none());
        };

        let _ticket = match self.guard.begin() {
            Ok(ticket) => ticket,
            Err(_) => return result(RegisterOutcome::Busy, Effects::none()),
        };

        log::info!("Uploading payment screenshot ({})", payload.screenshot.summary());
        let resp = match self.api.register(&payload) {
            Ok(resp) => resp,
            Err(e) => {
                log::error!("registration error: {}", e);
                return result(
                    RegisterOutcome::NetworkError,
                    Effects::none().notify(Notification::error(NETWORK_ERROR)),
                );
            }
        };

        if !resp.body.success {
            let text = resp
                .body
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Registration failed. Please try again.".to_string());
            return result(
                RegisterOutcome::Failed,
                Effects::none().notify(Notification::error(text)),
            );
        }

        let marker = PendingRegistration {
            full_name: form.name.clone(),
            email: form.email.clone(),
            payment_method: payload.payment_method.clone(),
            registered_at: chrono::Utc::now()
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            status: "pending_approval".to_string(),
        };
        if let Err(e) = self.storage.set_json(keys::PENDING_REGISTRATION, &marker) {
            log::warn!("failed to store pending registration: {}", e);
        }

        result(
            RegisterOutcome::Submitted,
            Effects::none()
                .notify(
                    Notification::success("✓ Registration successful! Awaiting admin approval")
                        .with_duration(4000),
                )
                .modal(Modal::RegistrationSuccess),
        )
    }
}
