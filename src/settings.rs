//! Runtime settings
//!
//! Read from a JSON file. Missing fields take their defaults and a file that
//! cannot be read or parsed falls back to [`Settings::default`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_STAR_CHANCE, EXPLOSION_PAUSE_MS, TARGET_FPS};

/// Environment variable naming a settings file
pub const SETTINGS_ENV: &str = "GALAXY_EXPLORER_SETTINGS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Probability that a sector holds a star (0.0 - 1.0)
    pub star_chance: f64,
    /// Frame rate cap, 0 runs unthrottled
    pub target_fps: u32,
    /// How long the collision flash stays on screen
    pub explosion_pause_ms: u64,
    /// Stop after this many frames (headless runs)
    pub max_frames: Option<u64>,
    /// Dump each scene as JSON at trace level
    pub log_scenes: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            star_chance: DEFAULT_STAR_CHANCE,
            target_fps: TARGET_FPS,
            explosion_pause_ms: EXPLOSION_PAUSE_MS,
            max_frames: None,
            log_scenes: false,
        }
    }
}

impl Settings {
    /// Unthrottled, no pauses. For scripted runs and tests.
    pub fn headless() -> Self {
        Self {
            target_fps: 0,
            explosion_pause_ms: 0,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Load from `$GALAXY_EXPLORER_SETTINGS`, else `cli_path`, else defaults
    pub fn load(cli_path: Option<PathBuf>) -> Self {
        let path = std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .or(cli_path);

        match path {
            Some(path) => Self::load_from(&path),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read settings {}: {e}, using defaults", path.display());
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Bad settings in {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Clamp out-of-range values
    pub fn sanitized(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.star_chance) {
            let clamped = if self.star_chance.is_nan() {
                DEFAULT_STAR_CHANCE
            } else {
                self.star_chance.clamp(0.0, 1.0)
            };
            log::warn!("star_chance {} out of range, using {clamped}", self.star_chance);
            self.star_chance = clamped;
        }
        self
    }

    /// Minimum time per frame, if throttled
    pub fn frame_duration(&self) -> Option<Duration> {
        (self.target_fps > 0).then(|| Duration::from_secs_f64(1.0 / self.target_fps as f64))
    }

    pub fn explosion_pause(&self) -> Duration {
        Duration::from_millis(self.explosion_pause_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.star_chance, 0.2);
        assert_eq!(settings.target_fps, 60);
        assert_eq!(settings.explosion_pause(), Duration::from_millis(400));
        assert!(settings.max_frames.is_none());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "max_frames": 30 }"#).unwrap();
        assert_eq!(settings.max_frames, Some(30));
        assert_eq!(settings.target_fps, 60);
        assert_eq!(settings.star_chance, 0.2);
    }

    #[test]
    fn test_star_chance_is_clamped() {
        let settings = Settings::from_json(r#"{ "star_chance": 3.5 }"#).unwrap();
        assert_eq!(settings.star_chance, 1.0);
        let settings = Settings::from_json(r#"{ "star_chance": -1 }"#).unwrap();
        assert_eq!(settings.star_chance, 0.0);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Settings::from_json("{ star_chance: ").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_from(Path::new("/nonexistent/galaxy-explorer.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "galaxy-explorer-settings-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "target_fps": 0, "log_scenes": true }"#).unwrap();
        let settings = Settings::load_from(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(settings.log_scenes);
        assert!(settings.frame_duration().is_none());
    }

    #[test]
    fn test_frame_duration() {
        let d = Settings::default().frame_duration().unwrap();
        assert!((d.as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
        assert!(Settings::headless().frame_duration().is_none());
        assert_eq!(Settings::headless().explosion_pause(), Duration::ZERO);
    }
}
