//! Session token files (~/.config/licport/)
//!
//! One file per key: `access_token`, `refresh_token`, and the legacy
//! `token` written by older clients. Reads go to disk every time so a
//! logout from another process is seen on the next request.

use anyhow::{Context, Result};
use licport_core::{PortalConfig, Session};
use std::path::{Path, PathBuf};

const ACCESS_TOKEN_FILENAME: &str = "access_token";
const REFRESH_TOKEN_FILENAME: &str = "refresh_token";
const LEGACY_TOKEN_FILENAME: &str = "token";

#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `~/.config/licport/`, or `./.licport` when no config dir exists.
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("licport"))
            .unwrap_or_else(|| PathBuf::from(".licport"))
    }

    pub fn from_config(config: &PortalConfig) -> Self {
        Self::new(
            config
                .session
                .dir
                .clone()
                .unwrap_or_else(Self::default_dir),
        )
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The bearer token to send, new-format key first.
    pub fn current_token(&self) -> Option<String> {
        self.read(ACCESS_TOKEN_FILENAME)
            .or_else(|| self.read(LEGACY_TOKEN_FILENAME))
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read(REFRESH_TOKEN_FILENAME)
    }

    pub fn has_session(&self) -> bool {
        self.current_token().is_some()
    }

    /// Replaces the stored session. A missing refresh token removes any old
    /// one so the pair never mixes logins.
    pub fn save(&self, session: &Session) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        self.write(ACCESS_TOKEN_FILENAME, &session.access_token)?;
        match &session.refresh_token {
            Some(r) => self.write(REFRESH_TOKEN_FILENAME, r)?,
            None => self.remove(REFRESH_TOKEN_FILENAME)?,
        }
        self.remove(LEGACY_TOKEN_FILENAME)?;
        tracing::debug!(dir = %self.dir.display(), "session saved");
        Ok(())
    }

    /// Removes every session key, including the legacy one.
    pub fn clear(&self) -> Result<()> {
        for name in [
            ACCESS_TOKEN_FILENAME,
            REFRESH_TOKEN_FILENAME,
            LEGACY_TOKEN_FILENAME,
        ] {
            self.remove(name)?;
        }
        tracing::debug!(dir = %self.dir.display(), "session cleared");
        Ok(())
    }

    fn read(&self, name: &str) -> Option<String> {
        let content = std::fs::read_to_string(self.dir.join(name)).ok()?;
        let trimmed = content.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn write(&self, name: &str, value: &str) -> Result<()> {
        let path = self.dir.join(name);
        std::fs::write(&path, value.trim())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        restrict_permissions(&path)?;
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<()> {
        let path = self.dir.join(name);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .with_context(|| format!("Failed to set permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
