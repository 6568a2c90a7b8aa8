use {
    super::types::Credential,
    std::{fs, path::{Path, PathBuf}},
};

/// Single-slot JSON file holding the current credential
#[derive(Debug, Clone)]
pub struct CredentialFile {
    path: PathBuf,
}

impl CredentialFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted credential
    ///
    /// Returns `None` if the file does not exist or cannot be parsed.
    pub fn load(&self) -> Option<Credential> {
        if !self.path.exists() {
            log::info!("No persisted credential found: {}", self.path.display());
            return None;
        }

        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to read credential file {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str::<Credential>(&json) {
            Ok(credential) => {
                log::info!("Loaded credential from {}", self.path.display());
                Some(credential)
            }
            Err(e) => {
                log::warn!("Ignoring malformed credential file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Overwrite the slot with `credential`
    pub fn save(&self, credential: &Credential) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(credential)?;
        fs::write(&self.path, json)?;

        log::debug!("Saved credential to {}", self.path.display());
        Ok(())
    }
}
