//! Client configuration read from the environment.
use std::env;
use std::path::{Path, PathBuf};

/// Terminal host configuration.
///
/// Engine tuning lives in the viewport TOML; this only covers what the host
/// itself decides.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Content root holding `viewport.toml`, `encounters/` and `maneuvers/`.
    pub data_dir: PathBuf,
    /// Encounter name under `encounters/`.
    pub encounter: String,
    /// Viewport TOML overriding `viewport.toml` in the data directory.
    pub viewport_config: Option<PathBuf>,
    /// Minimum spacing between two hover resolutions.
    pub hover_interval_ms: u64,
    pub frame_interval_ms: u64,
    /// Maneuver shown when a piece is selected.
    pub maneuver: String,
    pub session_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            encounter: "courtyard".to_owned(),
            viewport_config: None,
            hover_interval_ms: 500,
            frame_interval_ms: 16,
            maneuver: "regular".to_owned(),
            session_id: None,
        }
    }
}

impl ClientConfig {
    /// Construct client configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BOARD_DATA_DIR` - Content root (default: `./data`, else the platform data dir)
    /// - `BOARD_ENCOUNTER` - Encounter name (default: `courtyard`)
    /// - `BOARD_VIEWPORT_CONFIG` - Viewport TOML path (default: `<data>/viewport.toml`)
    /// - `BOARD_HOVER_INTERVAL_MS` - Hover throttle in milliseconds (default: 500)
    /// - `BOARD_FRAME_INTERVAL_MS` - Frame interval in milliseconds (default: 16, min 1)
    /// - `BOARD_MANEUVER` - Maneuver shown on selection (default: `regular`)
    /// - `BOARD_SESSION_ID` - Log session name (default: timestamp based)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("BOARD_DATA_DIR") {
            config.data_dir = dir;
        }
        if let Some(name) = read_env::<String>("BOARD_ENCOUNTER")
            && !name.is_empty()
        {
            config.encounter = name;
        }
        config.viewport_config = read_env("BOARD_VIEWPORT_CONFIG");
        if let Some(interval) = read_env("BOARD_HOVER_INTERVAL_MS") {
            config.hover_interval_ms = interval;
        }
        if let Some(interval) = read_env::<u64>("BOARD_FRAME_INTERVAL_MS") {
            config.frame_interval_ms = interval.max(1);
        }
        if let Some(maneuver) = read_env::<String>("BOARD_MANEUVER")
            && !maneuver.is_empty()
        {
            config.maneuver = maneuver;
        }
        config.session_id = read_env("BOARD_SESSION_ID");

        config
    }
}

/// `./data` when run from the workspace, otherwise the platform data
/// directory, e.g. `~/.local/share/board` on Linux.
fn default_data_dir() -> PathBuf {
    let local = Path::new("data");
    if local.is_dir() {
        return local.to_path_buf();
    }
    directories::ProjectDirs::from("", "", "board")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| local.to_path_buf())
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
