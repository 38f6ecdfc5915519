use std::path::PathBuf;
use std::sync::OnceLock;

/// XDG-compliant directory layout for vocaledge.
///
/// On Linux this follows the XDG Base Directory Specification:
///   Config:  $XDG_CONFIG_HOME/vocaledge  (~/.config/vocaledge)
///   Data:    $XDG_DATA_HOME/vocaledge    (~/.local/share/vocaledge)
///
/// The `dirs` crate handles platform detection. We cache the resolved
/// base paths in static OnceLock cells so directory lookup only happens
/// once.

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();
static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Root data directory: $XDG_DATA_HOME/vocaledge
pub fn data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocaledge")
    })
}

/// Root config directory: $XDG_CONFIG_HOME/vocaledge
pub fn config_dir() -> &'static PathBuf {
    CONFIG_DIR.get_or_init(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocaledge")
    })
}

/// Config file path: <config_dir>/config.toml
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Reports directory: <data_dir>/reports
/// Holds report JSON documents and chart PNGs.
pub fn reports_dir() -> PathBuf {
    data_dir().join("reports")
}
