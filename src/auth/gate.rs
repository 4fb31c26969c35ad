//! Designer access gate
//!
//! Runs before the editor is usable. This is a client-side check only; the
//! server enforces access on its own.

use crate::api::AuthApi;
use crate::notify::{Effects, Notification, Page};
use crate::session::{Storage, StorageExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Approved,
    Pending,
    Rejected,
    /// Denied for any other reason (bad token, unknown state)
    Denied,
    /// No token stored; no request was made
    MissingToken,
    /// Transport or decoding failure
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    pub decision: AccessDecision,
    pub effects: Effects,
}

impl GateOutcome {
    pub fn is_approved(&self) -> bool {
        self.decision == AccessDecision::Approved
    }
}

/// Exchange the stored token for an access decision.
pub fn check_design_access<A, S>(api: &A, storage: &mut S) -> GateOutcome
where
    A: AuthApi + ?Sized,
    S: Storage + ?Sized,
{
    let Some(token) = storage.token() else {
        log::info!("no session token; sending user to login");
        return GateOutcome {
            decision: AccessDecision::MissingToken,
            effects: Effects::none()
                .notify(Notification::error("Please login to access the designer"))
                .redirect(Page::Login, 1500),
        };
    };

    match api.design_access(&token) {
        Ok(resp) if resp.success && resp.can_access => {
            let mut effects = Effects::none();
            if let Some(name) = storage.user_info().and_then(|u| u.name) {
                effects = effects.notify(Notification::success(format!(
                    "Welcome back, {}!",
                    name
                )));
            }
            GateOutcome {
                decision: AccessDecision::Approved,
                effects,
            }
        }
        Ok(resp) => {
            let message = resp.message.unwrap_or_default();
            let (decision, note) = if message.contains("pending") {
                (
                    AccessDecision::Pending,
                    Notification::info("Your account is pending approval"),
                )
            } else if message.contains("rejected") {
                (
                    AccessDecision::Rejected,
                    Notification::error("Your account was rejected. Please contact admin."),
                )
            } else {
                (
                    AccessDecision::Denied,
                    Notification::error("Access denied. Please login again."),
                )
            };
            log::info!("design access denied ({:?}): {}", decision, message);
            storage.clear_auth();
            GateOutcome {
                decision,
                effects: Effects::none().notify(note).redirect(Page::Login, 2000),
            }
        }
        Err(e) => {
            log::error!("auth check failed: {}", e);
            storage.clear_auth();
            GateOutcome {
                decision: AccessDecision::Failed,
                effects: Effects::none()
                    .notify(Notification::error(
                        "Authentication error. Please login again.",
                    ))
                    .redirect(Page::Login, 1500),
            }
        }
    }
}
