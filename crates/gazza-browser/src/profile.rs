use crate::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Where the launched browser keeps its profile.
///
/// Persistent profiles survive across runs so the marketplace login is
/// kept; temporary ones are removed when the value drops.
pub enum ProfileDir {
    Persistent(PathBuf),
    Temporary(TempDir),
}

impl ProfileDir {
    /// Create or reuse a persistent profile at `path`.
    pub fn persistent(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(&path)?;
        }
        Ok(ProfileDir::Persistent(path))
    }

    pub fn temporary() -> Result<Self> {
        Ok(ProfileDir::Temporary(tempfile::tempdir()?))
    }

    pub fn path(&self) -> &Path {
        match self {
            ProfileDir::Persistent(path) => path,
            ProfileDir::Temporary(dir) => dir.path(),
        }
    }

    pub fn is_temporary(&self) -> bool {
        matches!(self, ProfileDir::Temporary(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporary_profile_cleans_up_on_drop() {
        let profile = ProfileDir::temporary().unwrap();
        let path = profile.path().to_path_buf();

        assert!(path.is_dir());
        assert!(profile.is_temporary());

        drop(profile);
        assert!(!path.exists());
    }

    #[test]
    fn test_persistent_profile_survives_drop() {
        let base = tempfile::tempdir().unwrap();
        let path = base.path().join("profile");

        let profile = ProfileDir::persistent(path.clone()).unwrap();
        assert!(path.is_dir());
        assert!(!profile.is_temporary());

        drop(profile);
        assert!(path.exists());
    }

    #[test]
    fn test_persistent_profile_creates_missing_directories() {
        let base = tempfile::tempdir().unwrap();
        let path = base.path().join("nested").join("profile");

        assert!(!path.exists());
        let _profile = ProfileDir::persistent(path.clone()).unwrap();
        assert!(path.is_dir());
    }
}
