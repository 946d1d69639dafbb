//! Per-user directories for config and logs.
//!
//! Unix hosts (macOS included) use the XDG layout under the home directory so
//! the files are in the same place everywhere; Windows uses the known folders.

use std::path::PathBuf;

const APP_DIR: &str = "edit-cards";

/// `~/.local/share/edit-cards` on unix.
pub fn data_dir() -> PathBuf {
    #[cfg(unix)]
    {
        home_relative(&[".local", "share"], "/tmp")
    }
    #[cfg(windows)]
    {
        known_folder(dirs::data_local_dir())
    }
}

/// `~/.config/edit-cards` on unix.
pub fn config_dir() -> PathBuf {
    #[cfg(unix)]
    {
        home_relative(&[".config"], ".")
    }
    #[cfg(windows)]
    {
        known_folder(dirs::config_dir())
    }
}

pub fn log_path() -> PathBuf {
    data_dir().join("edit-cards.log")
}

#[cfg(unix)]
fn home_relative(parts: &[&str], fallback: &str) -> PathBuf {
    let mut dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from(fallback));
    dir.extend(parts);
    dir.join(APP_DIR)
}

#[cfg(windows)]
fn known_folder(dir: Option<PathBuf>) -> PathBuf {
    dir.unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_are_app_scoped() {
        assert!(data_dir().ends_with(APP_DIR));
        assert!(config_dir().ends_with(APP_DIR));
        assert_eq!(log_path().parent(), Some(data_dir().as_path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_layout() {
        assert!(data_dir().ends_with(".local/share/edit-cards"));
        assert!(config_dir().ends_with(".config/edit-cards"));
    }
}
