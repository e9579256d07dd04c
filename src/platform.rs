// Readpace platform paths
// Resolves where the settings file lives on each operating system.

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    let var = if cfg!(target_os = "windows") {
        "USERPROFILE"
    } else {
        "HOME"
    };
    PathBuf::from(env::var(var).unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the platform-specific configuration directory for Readpace.
///
/// - **Linux**: `$XDG_CONFIG_HOME/readpace`, else `~/.config/readpace`
/// - **macOS**: `~/Library/Application Support/Readpace`
/// - **Windows**: `%APPDATA%/Readpace`
pub fn get_config_dir() -> PathBuf {
    if cfg!(target_os = "macos") {
        home_dir()
            .join("Library")
            .join("Application Support")
            .join("Readpace")
    } else if cfg!(target_os = "windows") {
        match env::var("APPDATA") {
            Ok(appdata) => PathBuf::from(appdata).join("Readpace"),
            Err(_) => home_dir().join("AppData").join("Roaming").join("Readpace"),
        }
    } else {
        match env::var("XDG_CONFIG_HOME") {
            Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("readpace"),
            _ => home_dir().join(".config").join("readpace"),
        }
    }
}
