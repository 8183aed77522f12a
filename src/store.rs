//! File-backed store for upload history and user records.
//!
//! The whole store is a single JSON document. Every mutation reads it, edits
//! it in memory and writes it back through a temp file and rename, so a
//! crashed write never leaves a truncated store behind. There is no locking:
//! one writer at a time is assumed.

use chrono::Utc;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::rewrite::RewriteResult;
use crate::score::AnalysisResult;

/// Errors raised by the store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed store: {0}")]
    Json(#[from] serde_json::Error),
    #[error("user already exists: {0}")]
    UserExists(String),
    #[error("user not found: {0}")]
    UserNotFound(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// One analyzed or rewritten submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub email: String,
    /// RFC 3339 timestamp
    pub date: String,
    pub before: u32,
    pub after: u32,
    pub language: String,
    pub cleaned_code: String,
}

impl HistoryEntry {
    /// Record a rewrite; the rewritten text is kept as the cleaned code.
    pub fn from_rewrite(email: &str, result: &RewriteResult) -> Self {
        Self {
            email: email.to_string(),
            date: Utc::now().to_rfc3339(),
            before: result.before.likelihood,
            after: result.after.likelihood,
            language: result.before.language.to_string(),
            cleaned_code: result.rewritten.clone(),
        }
    }

    /// Record a plain analysis; nothing was rewritten so before equals after.
    pub fn from_analysis(email: &str, code: &str, result: &AnalysisResult) -> Self {
        Self {
            email: email.to_string(),
            date: Utc::now().to_rfc3339(),
            before: result.likelihood,
            after: result.likelihood,
            language: result.language.to_string(),
            cleaned_code: code.to_string(),
        }
    }
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub email: String,
    /// Hex SHA-256 of the password
    pub password_hash: String,
    pub role: Role,
    #[serde(default)]
    pub banned: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    history: Vec<HistoryEntry>,
    #[serde(default)]
    users: Vec<UserRecord>,
}

/// Handle to a store file. The file is created on first write.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Default location: `<data dir>/codesniff/store.json`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "codesniff").map(|dirs| dirs.data_dir().join("store.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StoreData> {
        if !self.path.exists() {
            return Ok(StoreData::default());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(StoreData::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, data: &StoreData) -> Result<()> {
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let json = serde_json::to_string_pretty(data)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }

    /// Append a history record.
    pub fn append_history(&self, entry: HistoryEntry) -> Result<()> {
        let mut data = self.load()?;
        data.history.push(entry);
        self.save(&data)
    }

    /// All history records, oldest first.
    pub fn history(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.load()?.history)
    }

    /// History records for one email.
    pub fn history_for(&self, email: &str) -> Result<Vec<HistoryEntry>> {
        Ok(self
            .load()?
            .history
            .into_iter()
            .filter(|h| h.email == email)
            .collect())
    }

    /// Register a new user.
    pub fn register_user(&self, email: &str, password: &str, role: Role) -> Result<UserRecord> {
        let mut data = self.load()?;
        if data.users.iter().any(|u| u.email == email) {
            return Err(StoreError::UserExists(email.to_string()));
        }

        let user = UserRecord {
            email: email.to_string(),
            password_hash: hash_password(password),
            role,
            banned: false,
        };
        data.users.push(user.clone());
        self.save(&data)?;
        Ok(user)
    }

    pub fn find_user(&self, email: &str) -> Result<Option<UserRecord>> {
        Ok(self.load()?.users.into_iter().find(|u| u.email == email))
    }

    /// Check a password against the stored hash.
    pub fn verify_password(&self, email: &str, password: &str) -> Result<bool> {
        let user = self
            .find_user(email)?
            .ok_or_else(|| StoreError::UserNotFound(email.to_string()))?;
        Ok(user.password_hash == hash_password(password))
    }

    /// Replace a user's password.
    pub fn reset_password(&self, email: &str, new_password: &str) -> Result<()> {
        let hash = hash_password(new_password);
        self.update_user(email, |user| user.password_hash = hash)
    }

    pub fn ban(&self, email: &str) -> Result<()> {
        self.set_banned(email, true)
    }

    pub fn unban(&self, email: &str) -> Result<()> {
        self.set_banned(email, false)
    }

    /// Unknown emails are not banned.
    pub fn is_banned(&self, email: &str) -> Result<bool> {
        Ok(self.find_user(email)?.map(|u| u.banned).unwrap_or(false))
    }

    fn set_banned(&self, email: &str, banned: bool) -> Result<()> {
        self.update_user(email, |user| user.banned = banned)
    }

    fn update_user<F>(&self, email: &str, update: F) -> Result<()>
    where
        F: FnOnce(&mut UserRecord),
    {
        let mut data = self.load()?;
        let user = data
            .users
            .iter_mut()
            .find(|u| u.email == email)
            .ok_or_else(|| StoreError::UserNotFound(email.to_string()))?;
        update(user);
        self.save(&data)
    }
}

fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, Store) {
        let temp = TempDir::new().unwrap();
        let store = Store::open(temp.path().join("nested").join("store.json"));
        (temp, store)
    }

    fn entry(email: &str, before: u32, after: u32) -> HistoryEntry {
        HistoryEntry {
            email: email.to_string(),
            date: "2026-01-01T00:00:00+00:00".to_string(),
            before,
            after,
            language: "javascript".to_string(),
            cleaned_code: "x();".to_string(),
        }
    }

    #[test]
    fn test_missing_store_is_empty() {
        let (_temp, store) = temp_store();
        assert!(store.history().unwrap().is_empty());
        assert!(store.find_user("a@b.c").unwrap().is_none());
        assert!(!store.is_banned("a@b.c").unwrap());
    }

    #[test]
    fn test_history_append_and_filter() {
        let (_temp, store) = temp_store();
        store.append_history(entry("a@test.com", 40, 25)).unwrap();
        store.append_history(entry("b@test.com", 70, 55)).unwrap();
        store.append_history(entry("a@test.com", 30, 15)).unwrap();

        assert_eq!(store.history().unwrap().len(), 3);
        let mine = store.history_for("a@test.com").unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[1].before, 30);
    }

    #[test]
    fn test_history_serializes_camel_case() {
        let json = serde_json::to_string(&entry("a@test.com", 1, 0)).unwrap();
        assert!(json.contains("\"cleanedCode\""));
    }

    #[test]
    fn test_register_and_duplicate() {
        let (_temp, store) = temp_store();
        let user = store.register_user("u@test.com", "User@123", Role::User).unwrap();
        assert_eq!(user.role, Role::User);
        assert!(!user.banned);
        assert_ne!(user.password_hash, "User@123");

        let err = store.register_user("u@test.com", "other", Role::Admin).unwrap_err();
        assert!(matches!(err, StoreError::UserExists(_)));
    }

    #[test]
    fn test_verify_password() {
        let (_temp, store) = temp_store();
        store.register_user("u@test.com", "User@123", Role::User).unwrap();
        assert!(store.verify_password("u@test.com", "User@123").unwrap());
        assert!(!store.verify_password("u@test.com", "wrong").unwrap());
        assert!(matches!(
            store.verify_password("nobody@test.com", "x"),
            Err(StoreError::UserNotFound(_))
        ));
    }

    #[test]
    fn test_reset_password() {
        let (_temp, store) = temp_store();
        store.register_user("u@test.com", "old-pw", Role::User).unwrap();

        store.reset_password("u@test.com", "new-pw").unwrap();
        assert!(store.verify_password("u@test.com", "new-pw").unwrap());
        assert!(!store.verify_password("u@test.com", "old-pw").unwrap());

        assert!(matches!(
            store.reset_password("ghost@test.com", "x"),
            Err(StoreError::UserNotFound(_))
        ));
    }

    #[test]
    fn test_ban_unban() {
        let (_temp, store) = temp_store();
        store.register_user("u@test.com", "pw", Role::User).unwrap();

        store.ban("u@test.com").unwrap();
        assert!(store.is_banned("u@test.com").unwrap());

        store.unban("u@test.com").unwrap();
        assert!(!store.is_banned("u@test.com").unwrap());

        assert!(matches!(store.ban("ghost@test.com"), Err(StoreError::UserNotFound(_))));
    }

    #[test]
    fn test_malformed_store() {
        let (_temp, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(store.history(), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_hash_password_is_sha256_hex() {
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
