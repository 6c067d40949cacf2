//! Issued-token persistence.
//!
//! Stores the access/refresh pair in `<home>/tokens.json` with restricted
//! permissions (0600). Tokens are never logged or displayed in full.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// Token cache filename.
const TOKENS_FILE: &str = "tokens.json";

/// Access/refresh pair issued by the token endpoint.
///
/// Values are opaque and persisted verbatim under the fixed `access` and
/// `refresh` keys. There is no expiry handling; a stale access token is
/// replaced by an explicit refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// The access token (short-lived)
    pub access: String,
    /// The refresh token (long-lived)
    pub refresh: String,
}

/// File-backed store for the issued token pair.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Store at the default location under the vapte home.
    pub fn open_default() -> Self {
        Self::at(paths::vapte_home().join(TOKENS_FILE))
    }

    /// Store backed by a specific file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the saved pair.
    /// Returns `None` if nothing was saved yet.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn load(&self) -> Result<Option<TokenPair>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read tokens from {}", self.path.display()))?;

        let pair = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse tokens from {}", self.path.display()))?;
        Ok(Some(pair))
    }

    /// Saves the pair to disk with restricted permissions (0600).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn save(&self, pair: &TokenPair) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(pair).context("Failed to serialize tokens")?;

        // Write with restricted permissions
        #[cfg(unix)]
        {
            use std::fs::OpenOptions;
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;

            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    /// Replaces the access token, keeping the refresh token.
    ///
    /// # Errors
    /// Returns an error if nothing was saved yet or the write fails.
    pub fn update_access(&self, access: &str) -> Result<()> {
        let Some(mut pair) = self.load()? else {
            anyhow::bail!("no saved tokens to update");
        };
        pair.access = access.to_string();
        self.save(&pair)
    }

    /// Removes the saved pair. Returns whether one existed.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        Ok(true)
    }
}

/// Returns a masked version of a token for display (first 12 chars + ...).
///
/// Counts characters, not bytes: token values are opaque server-supplied
/// strings and the cut must not split a multi-byte character.
pub fn mask_token(token: &str) -> String {
    if token.chars().count() <= 16 {
        return "***".to_string();
    }
    let prefix: String = token.chars().take(12).collect();
    format!("{prefix}...")
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn pair(access: &str, refresh: &str) -> TokenPair {
        TokenPair {
            access: access.to_string(),
            refresh: refresh.to_string(),
        }
    }

    /// Loading from a path with no saved tokens yields None.
    #[test]
    fn test_load_missing_returns_none() {
        let dir = tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("tokens.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    /// Save then load round-trips the pair and creates parent directories.
    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("nested").join("tokens.json"));

        store.save(&pair("T1", "T2")).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.access, "T1");
        assert_eq!(loaded.refresh, "T2");
    }

    /// The on-disk layout uses the fixed `access` and `refresh` keys.
    #[test]
    fn test_storage_keys_are_fixed() {
        let dir = tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("tokens.json"));

        store.save(&pair("T1", "T2")).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["access"], "T1");
        assert_eq!(json["refresh"], "T2");
    }

    /// The backing file is written with owner-only permissions.
    #[cfg(unix)]
    #[test]
    fn test_save_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("tokens.json"));
        store.save(&pair("T1", "T2")).unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    /// update_access replaces only the access token.
    #[test]
    fn test_update_access_keeps_refresh() {
        let dir = tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("tokens.json"));
        store.save(&pair("old-access", "keep-refresh")).unwrap();

        store.update_access("new-access").unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.access, "new-access");
        assert_eq!(loaded.refresh, "keep-refresh");
    }

    /// update_access without a saved pair is an error.
    #[test]
    fn test_update_access_requires_saved_pair() {
        let dir = tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("tokens.json"));
        assert!(store.update_access("T").is_err());
    }

    /// clear reports whether tokens existed and removes the file.
    #[test]
    fn test_clear_reports_existence() {
        let dir = tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("tokens.json"));

        assert!(!store.clear().unwrap());

        store.save(&pair("T1", "T2")).unwrap();
        assert!(store.clear().unwrap());
        assert_eq!(store.load().unwrap(), None);
    }

    /// Token masking keeps only a short prefix.
    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("short"), "***");
        assert_eq!(
            mask_token("abcdefghijklmnopqrstuvwxyz"),
            "abcdefghijkl..."
        );
    }

    /// A multi-byte character straddling the cut stays whole.
    #[test]
    fn test_mask_token_multibyte_boundary() {
        assert_eq!(
            mask_token("abcdefghijkä-longtokenvalue"),
            "abcdefghijkä..."
        );
    }
}
