//! Navbar state and logout.

use crate::notify::{Effects, Notification, Page};
use crate::session::{keys, Storage, StorageExt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavState {
    LoggedIn { name: String },
    Anonymous,
}

/// What the navbar shows: the user's name while a token is present.
pub fn nav_state<S: Storage + ?Sized>(storage: &S) -> NavState {
    if storage.token().is_none() {
        return NavState::Anonymous;
    }
    let name = storage
        .user_info()
        .and_then(|u| u.name)
        .unwrap_or_else(|| "User".to_string());
    NavState::LoggedIn { name }
}

/// Forget the session and registration marker, then go home.
pub fn logout<S: Storage + ?Sized>(storage: &mut S) -> Effects {
    for key in [keys::USER_TOKEN, keys::USER_INFO, keys::PENDING_REGISTRATION] {
        if let Err(e) = storage.remove(key) {
            log::warn!("failed to remove {}: {}", key, e);
        }
    }
    log::info!("logged out");
    Effects::none()
        .notify(Notification::success("Logged out successfully"))
        .redirect(Page::Home, 1000)
}
