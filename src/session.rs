//! Client-held key/value storage (the browser's local storage)
//!
//! Keys are the same ones the web front end uses so a storage file can be
//! inspected side by side with a browser profile. There is no expiry.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

pub mod keys {
    pub const USER_TOKEN: &str = "userToken";
    pub const USER_INFO: &str = "userInfo";
    pub const PENDING_REGISTRATION: &str = "pendingRegistration";
    pub const REMEMBERED_EMAIL: &str = "rememberedEmail";
}

/// String key/value store.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Account status as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Approved,
    Pending,
    Rejected,
    Unknown,
}

impl UserStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "approved" => UserStatus::Approved,
            "pending" | "pending_approval" => UserStatus::Pending,
            "rejected" => UserStatus::Rejected,
            _ => UserStatus::Unknown,
        }
    }
}

/// User record as returned by the login endpoint; unknown fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserInfo {
    pub fn status(&self) -> UserStatus {
        self.status
            .as_deref()
            .map(UserStatus::parse)
            .unwrap_or(UserStatus::Unknown)
    }
}

/// Marker written after a successful registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingRegistration {
    pub full_name: String,
    pub email: String,
    pub payment_method: String,
    pub registered_at: String,
    pub status: String,
}

/// Typed accessors over any [`Storage`].
pub trait StorageExt: Storage {
    /// Bearer token; an empty string counts as absent.
    fn token(&self) -> Option<String> {
        self.get(keys::USER_TOKEN).filter(|t| !t.is_empty())
    }

    fn user_info(&self) -> Option<UserInfo> {
        self.get(keys::USER_INFO)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    fn pending_registration(&self) -> Option<PendingRegistration> {
        self.get(keys::PENDING_REGISTRATION)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    fn set_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }

    /// Drop the token and user record, logging instead of failing.
    fn clear_auth(&mut self) {
        for key in [keys::USER_TOKEN, keys::USER_INFO] {
            if let Err(e) = self.remove(key) {
                log::warn!("failed to remove {}: {}", key, e);
            }
        }
    }
}

impl<S: Storage + ?Sized> StorageExt for S {}

/// In-process storage, lost when dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Storage persisted as a flat JSON object, rewritten on every change.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                Error::Storage(format!("corrupt storage file {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::debug!("opened storage {} ({} keys)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_counts_as_missing() {
        let mut s = MemoryStorage::new();
        assert!(s.token().is_none());
        s.set(keys::USER_TOKEN, "").unwrap();
        assert!(s.token().is_none());
        s.set(keys::USER_TOKEN, "abc").unwrap();
        assert_eq!(s.token().as_deref(), Some("abc"));
    }

    #[test]
    fn user_info_keeps_unknown_fields() {
        let raw = r#"{"name":"Ada","status":"approved","plan":"pro"}"#;
        let info: UserInfo = serde_json::from_str(raw).unwrap();
        assert_eq!(info.status(), UserStatus::Approved);
        let back = serde_json::to_value(&info).unwrap();
        assert_eq!(back["plan"], "pro");
    }

    #[test]
    fn file_storage_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/storage.json");
        {
            let mut s = FileStorage::open(&path).unwrap();
            s.set(keys::REMEMBERED_EMAIL, "a@b.co").unwrap();
            s.set(keys::USER_TOKEN, "t").unwrap();
            s.remove(keys::USER_TOKEN).unwrap();
        }
        let s = FileStorage::open(&path).unwrap();
        assert_eq!(s.get(keys::REMEMBERED_EMAIL).as_deref(), Some("a@b.co"));
        assert!(s.get(keys::USER_TOKEN).is_none());
    }

    #[test]
    fn clear_auth_keeps_other_keys() {
        let mut s = MemoryStorage::new();
        s.set(keys::USER_TOKEN, "t").unwrap();
        s.set(keys::USER_INFO, "{}").unwrap();
        s.set(keys::REMEMBERED_EMAIL, "x@y.z").unwrap();
        s.clear_auth();
        assert_eq!(s.len(), 1);
    }
}
