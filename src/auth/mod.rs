//! Authentication flows: access gate, login, registration, logout.
//!
//! These are thin glue over [`AuthApi`](crate::api::AuthApi) and a
//! [`Storage`](crate::session::Storage). Each flow validates locally first,
//! calls the API at most once, and reports back with
//! [`Effects`](crate::notify::Effects). Nothing is retried.

pub mod gate;
pub mod login;
pub mod nav;
pub mod register;

use crate::{Error, Result};
use regex::Regex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

pub use gate::{check_design_access, AccessDecision, GateOutcome};
pub use login::{LoginForm, LoginOutcome, LoginPage};
pub use nav::{logout, nav_state, NavState};
pub use register::{PaymentMethod, RegisterPage, RegistrationForm, Screenshot};

/// Shared "network error" wording for transport failures on form submits.
pub const NETWORK_ERROR: &str = "Network error. Please check your connection and try again.";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Loose `local@domain.tld` check used by the login and register forms.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"))
        .is_match(email)
}

/// Disabled-submit-button equivalent.
///
/// A form holds one guard; while a [`SubmitTicket`] is alive any other
/// attempt to begin a submit fails with [`Error::Busy`]. Clones share state
/// so a UI thread can poll [`SubmitGuard::is_busy`].
#[derive(Debug, Clone, Default)]
pub struct SubmitGuard {
    busy: Arc<AtomicBool>,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn begin(&self) -> Result<SubmitTicket> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::Busy);
        }
        Ok(SubmitTicket {
            busy: Arc::clone(&self.busy),
        })
    }
}

/// Re-enables the form when dropped.
#[derive(Debug)]
pub struct SubmitTicket {
    busy: Arc<AtomicBool>,
}

impl Drop for SubmitTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}
