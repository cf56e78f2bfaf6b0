use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlarmError {
    #[error("failed to load alarm sound {path}: {reason}")]
    AssetLoad { path: PathBuf, reason: String },
    #[error("audio output unavailable: {0}")]
    Output(String),
}

/// Audible alarm driven by the monitoring loop.
///
/// Both operations are idempotent: `play` while already playing keeps the
/// current playback running without restarting it, and `stop` while silent
/// does nothing.
pub trait Alarm {
    fn play(&mut self) -> Result<(), AlarmError>;

    fn stop(&mut self);

    fn is_playing(&self) -> bool;
}

/// Fails unless `path` names an existing regular file.
///
/// A missing alarm sound is a startup error whichever backend plays it.
pub fn check_sound_asset(path: &Path) -> Result<(), AlarmError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(AlarmError::AssetLoad {
            path: path.to_path_buf(),
            reason: "file not found".to_string(),
        })
    }
}

/// Alarm that only tracks state and logs, for runs without audio output.
#[derive(Debug, Default)]
pub struct SilentAlarm {
    playing: bool,
}

impl SilentAlarm {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Alarm for SilentAlarm {
    fn play(&mut self) -> Result<(), AlarmError> {
        if !self.playing {
            log::warn!("ALARM (silent)");
            self.playing = true;
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}
