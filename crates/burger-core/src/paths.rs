//! File system paths for the client engine.

use crate::{CoreError, CoreResult};
use std::path::PathBuf;

/// Manages file system paths for client-side persistence.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Base directory for client files (~/.stellar-burgers)
    base_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance rooted at `~/.stellar-burgers`.
    pub fn new() -> CoreResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| CoreError::Path("Could not determine home directory".to_string()))?;

        Ok(Self {
            base_dir: home.join(".stellar-burgers"),
        })
    }

    /// Create a new Paths instance with a custom base directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory.
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the config file path (`<base>/config.json`).
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the durable key-value store path (`<base>/local-store.json`).
    /// Holds the refresh credential and transient client flags.
    pub fn local_store_file(&self) -> PathBuf {
        self.base_dir.join("local-store.json")
    }

    /// Ensure the base directory exists.
    pub fn ensure_dirs(&self) -> CoreResult<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_with_base_dir() {
        let paths = Paths::with_base_dir(PathBuf::from("/tmp/test-burgers"));
        assert_eq!(paths.base_dir(), &PathBuf::from("/tmp/test-burgers"));
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/tmp/test-burgers/config.json")
        );
        assert_eq!(
            paths.local_store_file(),
            PathBuf::from("/tmp/test-burgers/local-store.json")
        );
    }

    #[test]
    fn test_ensure_dirs_creates_base() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().join("nested").join("base"));

        assert!(!paths.base_dir().exists());
        paths.ensure_dirs().unwrap();
        assert!(paths.base_dir().exists());
    }

    #[test]
    fn test_new_uses_home_dir() {
        let paths = Paths::new().unwrap();
        assert!(paths.base_dir().ends_with(".stellar-burgers"));
    }
}
