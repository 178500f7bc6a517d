//! Bearer token storage.
//!
//! The token is looked up again for every request, so signing in (or
//! removing the token file) takes effect without restarting.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CredentialStore {
    env_var: String,
    token_file: Option<PathBuf>,
}

impl CredentialStore {
    pub fn new(env_var: impl Into<String>, token_file: Option<PathBuf>) -> Self {
        Self {
            env_var: env_var.into(),
            token_file,
        }
    }

    /// Current token: the environment variable wins over the token file.
    pub fn token(&self) -> Option<String> {
        if let Ok(token) = std::env::var(&self.env_var) {
            let token = token.trim();
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }

        let path = self.token_file.as_ref()?;
        let content = std::fs::read_to_string(path).ok()?;
        let token = content.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    /// Persist a token to the token file.
    pub fn save(&self, token: &str) -> Result<()> {
        let path = self
            .token_file
            .as_ref()
            .context("No token file configured; set the token environment variable instead")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create token directory: {}", parent.display()))?;
        }
        std::fs::write(path, token.trim())
            .with_context(|| format!("Failed to write token file: {}", path.display()))?;
        log::info!("Stored API token in {}", path.display());
        Ok(())
    }

    /// Remove the persisted token. A missing file is not an error.
    pub fn clear(&self) -> Result<()> {
        if let Some(path) = &self.token_file {
            if path.exists() {
                std::fs::remove_file(path)
                    .with_context(|| format!("Failed to remove token file: {}", path.display()))?;
            }
        }
        Ok(())
    }

    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    pub fn token_file(&self) -> Option<&Path> {
        self.token_file.as_deref()
    }
}
