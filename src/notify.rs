//! User-facing feedback: transient notifications, redirects and modals.
//!
//! Flows never print or navigate on their own. They return [`Effects`]
//! describing what the page should show, and the caller hands them to a
//! [`Notifier`].

use std::fmt;

/// Default on-screen lifetime of a notification.
pub const DEFAULT_DURATION_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

impl NotificationKind {
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Success => "✓",
            NotificationKind::Error => "✕",
            NotificationKind::Info => "ℹ",
            NotificationKind::Warning => "⚠",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub duration_ms: u64,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            duration_ms: DEFAULT_DURATION_MS,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.icon(), self.message)
    }
}

/// Pages of the site a flow can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Login,
    Register,
    Designer,
}

impl Page {
    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "index.html",
            Page::Login => "login.html",
            Page::Register => "register.html",
            Page::Designer => "designer.html",
        }
    }
}

/// Navigate to `to` once `after_ms` has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub to: Page,
    pub after_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// "Your account is awaiting approval" explainer on the login page
    PendingApproval,
    /// Shown after a registration was accepted
    RegistrationSuccess,
}

/// Everything a flow wants the page to do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects {
    pub notifications: Vec<Notification>,
    pub redirect: Option<Redirect>,
    pub modal: Option<Modal>,
}

impl Effects {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn notify(mut self, n: Notification) -> Self {
        self.notifications.push(n);
        self
    }

    pub fn redirect(mut self, to: Page, after_ms: u64) -> Self {
        self.redirect = Some(Redirect { to, after_ms });
        self
    }

    pub fn modal(mut self, modal: Modal) -> Self {
        self.modal = Some(modal);
        self
    }

    /// First notification, if any.
    pub fn first(&self) -> Option<&Notification> {
        self.notifications.first()
    }

    pub fn deliver(&self, notifier: &dyn Notifier) {
        for n in &self.notifications {
            notifier.notify(n);
        }
        if let Some(modal) = self.modal {
            notifier.show_modal(modal);
        }
        if let Some(redirect) = self.redirect {
            notifier.redirect(redirect);
        }
    }
}

/// Sink for effects.
pub trait Notifier {
    fn notify(&self, notification: &Notification);

    fn show_modal(&self, modal: Modal) {
        log::debug!("modal: {:?}", modal);
    }

    fn redirect(&self, redirect: Redirect) {
        log::debug!(
            "redirect to {} in {}ms",
            redirect.to.path(),
            redirect.after_ms
        );
    }
}

/// Notifier that writes everything to the `log` facade.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, n: &Notification) {
        match n.kind {
            NotificationKind::Error => log::error!("{}", n.message),
            NotificationKind::Warning => log::warn!("{}", n.message),
            NotificationKind::Success | NotificationKind::Info => log::info!("{}", n.message),
        }
    }
}
