//! Platform config-directory resolution.
//!
//! Maps a logical application name to the directory its configuration
//! document lives in:
//!
//! - Windows:  `%APPDATA%\{app}`
//! - Linux:    `$XDG_CONFIG_HOME/{app}` or `~/.config/{app}`
//! - macOS:    `~/Library/Application Support/{app}`
//!
//! The resolver is a pure function of the environment; nothing in this crate
//! calls it implicitly. The controller takes an explicit path (or any
//! [`crate::store::DocumentStore`]) at construction, so tests and embedders
//! can point it anywhere.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while resolving the storage location.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The platform config base directory could not be determined from the
    /// environment (e.g. neither `XDG_CONFIG_HOME` nor `HOME` is set).
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,
}

/// Resolves the config directory for `app` on the current platform.
///
/// The directory is not created; [`crate::store::FileStore`] creates parent
/// directories on first write.
///
/// # Errors
///
/// Returns [`ResolveError::NoPlatformConfigDir`] when the environment gives
/// no usable base directory.
pub fn config_dir(app: &str) -> Result<PathBuf, ResolveError> {
    platform_config_dir(app).ok_or(ResolveError::NoPlatformConfigDir)
}

/// Resolves the full path of `filename` inside the config directory for `app`.
///
/// # Errors
///
/// Returns [`ResolveError::NoPlatformConfigDir`] if the base directory cannot
/// be determined.
pub fn document_path(app: &str, filename: &str) -> Result<PathBuf, ResolveError> {
    Ok(config_dir(app)?.join(filename))
}

fn platform_config_dir(app: &str) -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join(app))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join(app))
    }

    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support/{app}
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join(app)
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        let _ = app;
        None
    }
}
