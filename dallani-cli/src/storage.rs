//! Token persistence for the command line.
//!
//! The access token lives in a single file under the user's config
//! directory, readable only by its owner.

use directories::ProjectDirs;
use shared::errors::StorageError;
use shared::session::TOKEN_STORAGE_KEY;
use shared::TokenStorage;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Overrides the token file location.
pub const ENV_TOKEN_FILE: &str = "DALLANI_TOKEN_FILE";

/// Default location of the token file.
pub fn token_path() -> PathBuf {
    if let Ok(path) = std::env::var(ENV_TOKEN_FILE) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("app", "dallani", "dallani").map_or_else(
        || PathBuf::from(format!("./.{TOKEN_STORAGE_KEY}")),
        |dirs| dirs.config_dir().join(TOKEN_STORAGE_KEY),
    )
}

/// Stores the token in one file, keyed by [`TOKEN_STORAGE_KEY`].
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_key(key: &str) -> Result<(), StorageError> {
        if key == TOKEN_STORAGE_KEY {
            Ok(())
        } else {
            Err(StorageError::Unavailable(format!("unknown key '{key}'")))
        }
    }
}

impl TokenStorage for FileTokenStorage {
    fn read(&self, key: &str) -> Option<String> {
        Self::check_key(key).ok()?;
        let content = fs::read_to_string(&self.path).ok()?;
        let token = content.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::check_key(key)?;
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| StorageError::Write(err.to_string()))?;
        }
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options
            .open(&self.path)
            .map_err(|err| StorageError::Write(err.to_string()))?;
        // `mode` only applies on creation.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(|err| StorageError::Write(err.to_string()))?;
        }
        file.write_all(value.as_bytes())
            .map_err(|err| StorageError::Write(err.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::check_key(key)?;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Write(err.to_string())),
        }
    }
}
