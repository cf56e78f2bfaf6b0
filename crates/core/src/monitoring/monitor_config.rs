use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capture::domain::capture_settings::CaptureSettings;
use crate::detection::domain::detection_params::DetectionParams;
use crate::shared::constants::{
    ALARM_THRESHOLD_SECS, DEFAULT_ALARM_SOUND, DEFAULT_CAMERA_INDEX, DEFAULT_FRAME_HEIGHT,
    DEFAULT_FRAME_RATE, DEFAULT_FRAME_WIDTH, DEFAULT_QUIT_KEY, DEFAULT_WINDOW_TITLE,
    YAWN_ASPECT_RATIO,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything the monitor can be tuned with.
///
/// Read from JSON; any top-level field left out keeps its default. The
/// detector tuning blocks (`face`, `eye`, `mouth`) are replaced whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub camera_index: i32,
    pub frame_width: u32,
    pub frame_height: u32,
    pub frame_rate: u32,
    pub face: DetectionParams,
    pub eye: DetectionParams,
    pub mouth: DetectionParams,
    pub yawn_aspect_ratio: f64,
    pub alarm_threshold_secs: f64,
    pub alarm_sound: PathBuf,
    /// Repeat the sound for as long as the alarm is asserted.
    pub alarm_loop: bool,
    /// Directory searched for cascade XML files before any other location.
    pub cascade_dir: Option<PathBuf>,
    pub window_title: String,
    pub quit_key: char,
    pub headless: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            camera_index: DEFAULT_CAMERA_INDEX,
            frame_width: DEFAULT_FRAME_WIDTH,
            frame_height: DEFAULT_FRAME_HEIGHT,
            frame_rate: DEFAULT_FRAME_RATE,
            face: DetectionParams::face(),
            eye: DetectionParams::eye(),
            mouth: DetectionParams::mouth(),
            yawn_aspect_ratio: YAWN_ASPECT_RATIO,
            alarm_threshold_secs: ALARM_THRESHOLD_SECS,
            alarm_sound: PathBuf::from(DEFAULT_ALARM_SOUND),
            alarm_loop: true,
            cascade_dir: None,
            window_title: DEFAULT_WINDOW_TITLE.to_string(),
            quit_key: DEFAULT_QUIT_KEY,
            headless: false,
        }
    }
}

impl MonitorConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&json).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.alarm_threshold_secs > 0.0
            && Duration::try_from_secs_f64(self.alarm_threshold_secs).is_ok())
        {
            return Err(ConfigError::Invalid(format!(
                "alarm threshold must be a positive number of seconds, got {}",
                self.alarm_threshold_secs
            )));
        }
        if !(self.yawn_aspect_ratio.is_finite() && self.yawn_aspect_ratio > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "yawn aspect ratio must be positive, got {}",
                self.yawn_aspect_ratio
            )));
        }
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "frame size must be non-zero, got {}x{}",
                self.frame_width, self.frame_height
            )));
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::Invalid("frame rate must be non-zero".into()));
        }
        if self.camera_index < 0 {
            return Err(ConfigError::Invalid(format!(
                "camera index must be non-negative, got {}",
                self.camera_index
            )));
        }
        for (name, params) in [("face", &self.face), ("eye", &self.eye), ("mouth", &self.mouth)]
        {
            validate_params(name, params)?;
        }
        Ok(())
    }

    /// Alarm threshold as a `Duration`. Call after [`validate`](Self::validate);
    /// out-of-range values saturate instead of panicking.
    pub fn alarm_threshold(&self) -> Duration {
        Duration::try_from_secs_f64(self.alarm_threshold_secs).unwrap_or(Duration::MAX)
    }

    pub fn capture_settings(&self) -> CaptureSettings {
        CaptureSettings {
            device_index: self.camera_index,
            width: self.frame_width,
            height: self.frame_height,
            fps: self.frame_rate,
        }
    }
}

fn validate_params(name: &str, params: &DetectionParams) -> Result<(), ConfigError> {
    if !(params.scale_factor.is_finite() && params.scale_factor > 1.0) {
        return Err(ConfigError::Invalid(format!(
            "{name} scale factor must be greater than 1.0, got {}",
            params.scale_factor
        )));
    }
    if params.min_neighbors < 0 {
        return Err(ConfigError::Invalid(format!(
            "{name} min neighbors must be non-negative, got {}",
            params.min_neighbors
        )));
    }
    if let Some((w, h)) = params.min_size {
        if w < 0 || h < 0 {
            return Err(ConfigError::Invalid(format!(
                "{name} min size must be non-negative, got {w}x{h}"
            )));
        }
    }
    Ok(())
}
