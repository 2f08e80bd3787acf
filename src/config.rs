//! Player configuration
//!
//! Stored as TOML in the user's config directory.
//! Default location: ~/.config/tunesheet/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::builtin_themes;
use crate::engine::DEFAULT_POLL_INTERVAL;
use crate::sheet::SheetConfig;
use crate::theme::Theme;
use crate::waveform::DEFAULT_SAMPLE_COUNT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `<id>.mp3` tracks and `<id>.mp4` onboarding previews
    pub assets_dir: PathBuf,
    /// Name of a built-in theme
    pub theme: String,
    /// Custom palette; replaces the named theme when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Theme>,
    pub playback: PlaybackConfig,
    pub waveform: WaveformConfig,
    pub sheet: SheetSettings,
}

impl Default for Config {
    fn default() -> Self {
        let assets_dir = dirs::data_dir()
            .map(|dir| dir.join("tunesheet").join("assets"))
            .unwrap_or_else(|| PathBuf::from("assets"));
        Self {
            assets_dir,
            theme: "catppuccin-mocha".to_string(),
            colors: None,
            playback: PlaybackConfig::default(),
            waveform: WaveformConfig::default(),
            sheet: SheetSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Interval of the progress poll while playing
    pub poll_interval_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveformConfig {
    /// Number of bars in the visualizer
    pub sample_count: usize,
}

impl Default for WaveformConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetSettings {
    /// Drag distance (logical units) that flips the sheet on release
    pub drag_threshold: f32,
    pub settle_ms: u64,
    pub opacity_restore_ms: u64,
    /// Logical units covered by one terminal row of mouse drag
    pub units_per_row: f32,
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            drag_threshold: 50.,
            settle_ms: 200,
            opacity_restore_ms: 200,
            units_per_row: 10.,
        }
    }
}

impl Config {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.playback.poll_interval_ms.max(1))
    }

    pub fn sheet_config(&self) -> SheetConfig {
        SheetConfig {
            threshold: self.sheet.drag_threshold,
            settle: Duration::from_millis(self.sheet.settle_ms),
            opacity_restore_delay: Duration::from_millis(self.sheet.opacity_restore_ms),
        }
    }

    pub fn theme(&self) -> Theme {
        if let Some(colors) = self.colors {
            return colors;
        }
        builtin_themes::by_name(&self.theme).unwrap_or_else(|| {
            log::warn!(
                "unknown theme {:?}, expected one of {:?}",
                self.theme,
                builtin_themes::THEME_NAMES
            );
            Theme::default()
        })
    }
}

/// Returns: ~/.config/tunesheet/config.toml
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("tunesheet")
        .join("config.toml")
}

/// Load configuration from a TOML file
///
/// If the file doesn't exist, returns default config.
/// If the file exists but is invalid, logs a warning and returns default config.
pub fn load_config(path: &Path) -> Config {
    if !path.exists() {
        log::info!("load_config: {:?} doesn't exist, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<Config>(&contents) {
            Ok(config) => {
                log::info!("load_config: loaded {:?}", path);
                config
            }
            Err(err) => {
                log::warn!("load_config: failed to parse {:?}: {}, using defaults", path, err);
                Config::default()
            }
        },
        Err(err) => {
            log::warn!("load_config: failed to read {:?}: {}, using defaults", path, err);
            Config::default()
        }
    }
}
