//! Append-only registry of users who started the bot.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::error::RegistryError;

pub const USERS_FILE: &str = "users.json";

/// One registered user as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub username: String,
}

/// JSON-array file of [`UserRecord`]s, deduplicated by id.
#[derive(Debug, Clone)]
pub struct UserRegistry {
    path: PathBuf,
}

impl UserRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Registry stored as `users.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(USERS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all records. A missing or unreadable-as-JSON file is empty.
    pub fn load(&self) -> Result<Vec<UserRecord>, RegistryError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error.into()),
        };
        Ok(serde_json::from_str(&raw).unwrap_or_default())
    }

    /// Appends `user` unless a record with the same id exists.
    /// Returns whether the user was added.
    pub fn register(&self, user: UserRecord) -> Result<bool, RegistryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        if !self.path.exists() {
            self.write(&[])?;
        }

        let mut users = self.load()?;
        if users.iter().any(|existing| existing.id == user.id) {
            return Ok(false);
        }
        users.push(user);
        self.write(&users)?;
        Ok(true)
    }

    fn write(&self, users: &[UserRecord]) -> Result<(), RegistryError> {
        let mut buffer = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
        users.serialize(&mut serializer)?;
        fs::write(&self.path, buffer)?;
        Ok(())
    }
}
