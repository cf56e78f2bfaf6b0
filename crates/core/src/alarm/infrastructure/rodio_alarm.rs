use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::alarm::domain::alarm::{check_sound_asset, Alarm, AlarmError};

/// Plays an audio file on the default output device through rodio.
///
/// The file is read and test-decoded once at construction, so a missing or
/// corrupt asset fails startup instead of the first alarm. Each `play`
/// decodes from the in-memory copy onto a fresh sink.
pub struct RodioAlarm {
    // Dropping the stream silences every sink attached to it.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sound: Arc<[u8]>,
    looping: bool,
    sink: Option<Sink>,
}

impl RodioAlarm {
    pub fn load(path: &Path, looping: bool) -> Result<Self, AlarmError> {
        check_sound_asset(path)?;
        let asset_err = |reason: String| AlarmError::AssetLoad {
            path: path.to_path_buf(),
            reason,
        };
        let bytes = fs::read(path).map_err(|e| asset_err(e.to_string()))?;
        let sound: Arc<[u8]> = Arc::from(bytes);
        Decoder::new(Cursor::new(Arc::clone(&sound))).map_err(|e| asset_err(e.to_string()))?;

        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AlarmError::Output(e.to_string()))?;
        log::info!("Loaded alarm sound {}", path.display());

        Ok(Self {
            _stream: stream,
            handle,
            sound,
            looping,
            sink: None,
        })
    }
}

impl Alarm for RodioAlarm {
    fn play(&mut self) -> Result<(), AlarmError> {
        if self.is_playing() {
            return Ok(());
        }
        let sink = Sink::try_new(&self.handle).map_err(|e| AlarmError::Output(e.to_string()))?;
        let decoder = Decoder::new(Cursor::new(Arc::clone(&self.sound)))
            .map_err(|e| AlarmError::Output(e.to_string()))?;
        if self.looping {
            sink.append(decoder.repeat_infinite());
        } else {
            sink.append(decoder);
        }
        self.sink = Some(sink);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn is_playing(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| !s.empty())
    }
}

impl Drop for RodioAlarm {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_asset_is_asset_load_error() {
        let result = RodioAlarm::load(Path::new("/nonexistent/alarm.mp3"), true);
        assert!(matches!(result, Err(AlarmError::AssetLoad { .. })));
    }

    #[test]
    fn test_corrupt_asset_is_asset_load_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("alarm.mp3");
        fs::write(&path, b"definitely not audio").unwrap();

        let result = RodioAlarm::load(&path, true);
        assert!(matches!(result, Err(AlarmError::AssetLoad { .. })));
    }
}
