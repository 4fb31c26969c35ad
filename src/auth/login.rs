//! Login page flow

use super::{is_valid_email, SubmitGuard, NETWORK_ERROR};
use crate::api::{AuthApi, LoginRequest};
use crate::notify::{Effects, Modal, Notification, Page};
use crate::session::{keys, Storage, StorageExt, UserStatus};
use crate::{Error, Result};

const PENDING_NOTICE: &str = "Your account is pending approval. Please wait for admin verification.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            remember_me: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(Error::Validation(
                "Please enter both email and password".into(),
            ));
        }
        if !is_valid_email(&self.email) {
            return Err(Error::Validation(
                "Please enter a valid email address".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Rejected locally, nothing sent
    Invalid,
    /// A previous submit is still running
    Busy,
    Approved,
    Pending,
    Rejected,
    /// Logged in but the account status was not recognised
    UnknownStatus,
    /// Server refused (bad credentials or other error)
    Failed,
    NetworkError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResult {
    pub outcome: LoginOutcome,
    pub effects: Effects,
}

impl LoginResult {
    fn new(outcome: LoginOutcome, effects: Effects) -> Self {
        Self { outcome, effects }
    }
}

/// What the login page shows when it opens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginLanding {
    /// Remembered email to prefill (and tick "remember me")
    pub prefill_email: Option<String>,
    pub effects: Effects,
}

pub struct LoginPage<'a, A: AuthApi + ?Sized, S: Storage + ?Sized> {
    api: &'a A,
    storage: &'a mut S,
    guard: SubmitGuard,
}

impl<'a, A: AuthApi + ?Sized, S: Storage + ?Sized> LoginPage<'a, A, S> {
    pub fn new(api: &'a A, storage: &'a mut S) -> Self {
        Self {
            api,
            storage,
            guard: SubmitGuard::new(),
        }
    }

    /// Handle to the submit button's disabled state.
    pub fn submit_guard(&self) -> SubmitGuard {
        self.guard.clone()
    }

    /// Page load: prefill, pending-registration notice, and a redirect to the
    /// designer when an existing token is still approved.
    pub fn on_load(&mut self) -> LoginLanding {
        let mut effects = Effects::none();

        if let Some(token) = self.storage.token() {
            match self.api.auth_status(&token) {
                Ok(resp)
                    if resp.success
                        && resp.user.as_ref().map(|u| u.status()) == Some(UserStatus::Approved) =>
                {
                    log::info!("existing session is approved");
                    effects = effects.redirect(Page::Designer, 0);
                }
                Ok(_) => {}
                Err(e) => {
                    log::warn!("stored token rejected: {}", e);
                    self.storage.clear_auth();
                }
            }
        }

        if let Some(pending) = self.storage.pending_registration() {
            if pending.status == "pending_approval" {
                effects = effects.notify(Notification::info(PENDING_NOTICE));
            }
        }

        LoginLanding {
            prefill_email: self.storage.get(keys::REMEMBERED_EMAIL),
            effects,
        }
    }

    pub fn submit(&mut self, form: &LoginForm) -> LoginResult {
        self.remember(form);

        if let Err(e) = form.validate() {
            return LoginResult::new(
                LoginOutcome::Invalid,
                Effects::none().notify(Notification::error(e.to_string())),
            );
        }

        let _ticket = match self.guard.begin() {
            Ok(ticket) => ticket,
            Err(_) => return LoginResult::new(LoginOutcome::Busy, Effects::none()),
        };

        let request = LoginRequest {
            email: form.email.clone(),
            password: form.password.clone(),
        };
        let resp = match self.api.login(&request) {
            Ok(resp) => resp,
            Err(e) => {
                log::error!("login error: {}", e);
                return LoginResult::new(
                    LoginOutcome::NetworkError,
                    Effects::none().notify(Notification::error(NETWORK_ERROR)),
                );
            }
        };

        let body = resp.body;
        if resp.status / 100 == 2 && body.success {
            return self.accept(body.token.unwrap_or_default(), body.user);
        }

        if resp.status == 403 {
            let message = body.message.unwrap_or_default();
            if body.status.as_deref() == Some("pending") || message.contains("pending") {
                return LoginResult::new(
                    LoginOutcome::Pending,
                    Effects::none()
                        .notify(Notification::info(PENDING_NOTICE))
                        .modal(Modal::PendingApproval),
                );
            }
            if let Some(reason) = body.reason {
                return LoginResult::new(
                    LoginOutcome::Rejected,
                    Effects::none().notify(Notification::error(format!(
                        "Account rejected: {}",
                        reason
                    ))),
                );
            }
            let text = if message.is_empty() {
                "Account not approved".to_string()
            } else {
                message
            };
            return LoginResult::new(
                LoginOutcome::Failed,
                Effects::none().notify(Notification::error(text)),
            );
        }

        let text = body
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "Login failed. Please check your credentials.".to_string());
        LoginResult::new(
            LoginOutcome::Failed,
            Effects::none().notify(Notification::error(text)),
        )
    }

    fn remember(&mut self, form: &LoginForm) {
        let res = if form.remember_me {
            self.storage.set(keys::REMEMBERED_EMAIL, &form.email)
        } else {
            self.storage.remove(keys::REMEMBERED_EMAIL)
        };
        if let Err(e) = res {
            log::warn!("failed to update remembered email: {}", e);
        }
    }

    fn accept(&mut self, token: String, user: Option<crate::session::UserInfo>) -> LoginResult {
        let stored = self.storage.set(keys::USER_TOKEN, &token).and_then(|_| {
            match &user {
                Some(u) => self.storage.set_json(keys::USER_INFO, u),
                None => Ok(()),
            }
        });
        if let Err(e) = stored.and_then(|_| self.storage.remove(keys::PENDING_REGISTRATION)) {
            log::warn!("failed to persist session: {}", e);
        }

        let user = user.unwrap_or_default();
        match user.status() {
            UserStatus::Approved => LoginResult::new(
                LoginOutcome::Approved,
                Effects::none()
                    .notify(Notification::success("Login successful! Redirecting..."))
                    .redirect(Page::Designer, 1000),
            ),
            UserStatus::Pending => {
                self.storage.clear_auth();
                LoginResult::new(
                    LoginOutcome::Pending,
                    Effects::none()
                        .notify(Notification::info("Your account is pending approval"))
                        .modal(Modal::PendingApproval),
                )
            }
            UserStatus::Rejected => {
                self.storage.clear_auth();
                let reason = user
                    .rejection_reason
                    .unwrap_or_else(|| "Please contact admin".to_string());
                LoginResult::new(
                    LoginOutcome::Rejected,
                    Effects::none().notify(Notification::error(format!(
                        "Your account was rejected: {}",
                        reason
                    ))),
                )
            }
            UserStatus::Unknown => {
                log::warn!("login succeeded with unrecognised status {:?}", user.status);
                LoginResult::new(LoginOutcome::UnknownStatus, Effects::none())
            }
        }
    }
}
