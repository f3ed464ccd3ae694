use crate::{Error, Result};
use std::path::PathBuf;

/// Environment override for the data directory, used by tests and
/// non-standard installs.
pub const HOME_ENV: &str = "GAZZA_HOME";

const DATA_DIR_NAME: &str = ".gazza";

/// Resolve the gazza data directory: `$GAZZA_HOME` if set, else `~/.gazza`.
pub fn data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(HOME_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(DATA_DIR_NAME))
        .ok_or(Error::NoHomeDir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("config.toml"))
}

pub fn activity_log_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("activity-log.json"))
}

pub fn mappings_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("mappings.json"))
}

/// Default persistent browser profile location.
pub fn profile_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join("profile"))
}

/// Create the data directory if it does not exist yet.
pub fn ensure_data_dir() -> Result<PathBuf> {
    let dir = data_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_override_wins() {
        // No other test in this crate touches GAZZA_HOME.
        unsafe { std::env::set_var(HOME_ENV, "/tmp/gazza-test-home") };
        assert_eq!(data_dir().unwrap(), PathBuf::from("/tmp/gazza-test-home"));
        assert!(
            config_path()
                .unwrap()
                .ends_with("gazza-test-home/config.toml")
        );
        assert!(
            activity_log_path()
                .unwrap()
                .ends_with("gazza-test-home/activity-log.json")
        );
        unsafe { std::env::remove_var(HOME_ENV) };
    }
}
