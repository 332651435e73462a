use std::fs;
use std::path::{Path, PathBuf};

use super::credential::Credential;
use super::error::AuthError;

const CREDENTIAL_FILE_NAME: &str = "config.json";

/// Storage abstraction for the persisted credential record.
///
/// `load` never fails: a missing, unreadable or corrupt record reads as an
/// absent credential.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Credential;
    fn save(&self, credential: &Credential) -> Result<(), AuthError>;
    fn clear(&self) -> Result<(), AuthError>;
}

/// Configuration for file-backed credential storage.
#[derive(Debug, Clone)]
pub struct CredentialStoreConfig {
    pub base_dir: PathBuf,
}

impl CredentialStoreConfig {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn default_dir() -> PathBuf {
        default_stack_auth_dir()
    }
}

/// File-backed credential store writing a single JSON document.
///
/// # Example
/// ```no_run
/// use stack_auth_cli::auth::{Credential, CredentialStore, FileCredentialStore};
///
/// let store = FileCredentialStore::new_default();
/// store.save(&Credential::new("refresh-token"))?;
/// assert!(store.load().is_authenticated());
/// # Ok::<(), stack_auth_cli::auth::AuthError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(config: CredentialStoreConfig) -> Self {
        Self {
            path: config.base_dir.join(CREDENTIAL_FILE_NAME),
        }
    }

    pub fn new_default() -> Self {
        Self::new(CredentialStoreConfig::new(default_stack_auth_dir()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(path: &Path) -> Result<(), AuthError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Credential {
        let raw = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Credential::default();
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Error loading config");
                return Credential::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(credential) => credential,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Ignoring corrupt config");
                Credential::default()
            }
        }
    }

    fn save(&self, credential: &Credential) -> Result<(), AuthError> {
        Self::ensure_parent(&self.path)?;
        let serialized = serde_json::to_string(credential)?;
        // Stage next to the target so the rename stays on one filesystem.
        let staging = self.staging_path();
        fs::write(&staging, serialized)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&staging, fs::Permissions::from_mode(0o600))?;
        }
        fs::rename(&staging, &self.path)?;
        tracing::debug!(path = %self.path.display(), "Saved credentials");
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AuthError::Io(err.to_string())),
        }
    }
}

fn default_stack_auth_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".stack-auth"))
        .unwrap_or_else(|| PathBuf::from(".stack-auth"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, FileCredentialStore) {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(CredentialStoreConfig::new(dir.path().to_path_buf()));
        (dir, store)
    }

    #[test]
    fn credential_round_trip_works() {
        let (_dir, store) = temp_store();
        store.save(&Credential::new("refresh")).unwrap();
        let loaded = store.load();
        assert_eq!(loaded.refresh_token.as_deref(), Some("refresh"));
    }

    #[test]
    fn missing_file_loads_as_absent() {
        let (_dir, store) = temp_store();
        assert_eq!(store.load(), Credential::default());
    }

    #[test]
    fn corrupt_file_loads_as_absent() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), "{ not json").unwrap();
        assert!(!store.load().is_authenticated());
    }

    #[test]
    fn save_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested").join(".stack-auth");
        let store = FileCredentialStore::new(CredentialStoreConfig::new(nested.clone()));
        store.save(&Credential::new("tok")).unwrap();
        assert!(nested.join("config.json").exists());
    }

    #[test]
    fn save_overwrites_whole_record_and_leaves_no_staging_file() {
        let (dir, store) = temp_store();
        fs::write(store.path(), r#"{"refresh_token":"old","extra":true}"#).unwrap();
        store.save(&Credential::new("new")).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, r#"{"refresh_token":"new"}"#);
        assert!(!dir.path().join("config.json.tmp").exists());
    }

    #[test]
    fn clear_removes_credential() {
        let (_dir, store) = temp_store();
        store.save(&Credential::new("refresh")).unwrap();
        store.clear().unwrap();
        assert!(!store.load().is_authenticated());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let (_dir, store) = temp_store();
        store.save(&Credential::new("refresh")).unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
