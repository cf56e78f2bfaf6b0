use std::path::PathBuf;
use std::process;

use clap::Parser;

use drowsiguard_core::alarm::domain::alarm::{Alarm, SilentAlarm};
use drowsiguard_core::capture::domain::frame_source::FrameSource;
use drowsiguard_core::detection::domain::face_analyzer::FaceAnalyzer;
use drowsiguard_core::display::domain::frame_display::{FrameDisplay, HeadlessDisplay};
use drowsiguard_core::monitoring::clock::SystemClock;
use drowsiguard_core::monitoring::debounce_timer::DebounceTimer;
use drowsiguard_core::monitoring::monitor_config::MonitorConfig;
use drowsiguard_core::monitoring::monitor_logger::StdoutMonitorLogger;
use drowsiguard_core::monitoring::monitor_loop::{ExitReason, MonitorLoop};
use drowsiguard_core::shared::cancellation::CancellationToken;

/// Webcam drowsiness monitor: sounds an alarm when your eyes stay out of
/// sight or you yawn for longer than the threshold.
#[derive(Parser, Debug)]
#[command(name = "drowsiguard")]
struct Cli {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Camera device index.
    #[arg(long)]
    camera: Option<i32>,

    /// Seconds of continuous drowsiness before the alarm sounds.
    #[arg(long)]
    threshold: Option<f64>,

    /// Mouth width/height ratio above which a mouth counts as a yawn.
    #[arg(long)]
    yawn_ratio: Option<f64>,

    /// Alarm sound file (mp3, wav, ogg, flac).
    #[arg(long)]
    alarm_sound: Option<PathBuf>,

    /// Play the alarm sound once instead of looping it.
    #[arg(long)]
    no_alarm_loop: bool,

    /// Run without audio; alarms are only logged.
    #[arg(long)]
    silent: bool,

    /// Directory holding the Haar cascade XML files.
    #[arg(long)]
    cascade_dir: Option<PathBuf>,

    /// Run without a preview window (stop with Ctrl-C).
    #[arg(long)]
    headless: bool,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    dump_config: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    if cli.dump_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let analyzer = build_analyzer(&config)?;
    let alarm = build_alarm(&config, cli.silent)?;
    let source = open_camera(&config)?;
    let display = build_display(&config)?;

    let cancel = CancellationToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel())?;

    if config.headless {
        println!("Monitoring headless. Press Ctrl-C to quit.");
    } else {
        println!("Press '{}' to quit.", config.quit_key);
    }

    let monitor = MonitorLoop::new(
        source,
        analyzer,
        DebounceTimer::new(config.alarm_threshold()),
        alarm,
        display,
        Box::new(SystemClock),
        Box::new(StdoutMonitorLogger::new()),
        config.quit_key,
        cancel,
    );
    let report = monitor.run()?;

    let how = match report.exit {
        ExitReason::Cancelled => "stopped by user",
        ExitReason::StreamEnded => "camera stream ended",
    };
    log::info!(
        "Monitoring {how} after {} frames, {} alarm(s) raised",
        report.frames,
        report.alarms_raised
    );
    Ok(())
}

fn build_config(cli: &Cli) -> Result<MonitorConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            MonitorConfig::load(path)?
        }
        None => MonitorConfig::default(),
    };
    apply_overrides(cli, &mut config);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(cli: &Cli, config: &mut MonitorConfig) {
    if let Some(camera) = cli.camera {
        config.camera_index = camera;
    }
    if let Some(threshold) = cli.threshold {
        config.alarm_threshold_secs = threshold;
    }
    if let Some(ratio) = cli.yawn_ratio {
        config.yawn_aspect_ratio = ratio;
    }
    if let Some(sound) = &cli.alarm_sound {
        config.alarm_sound = sound.clone();
    }
    if cli.no_alarm_loop {
        config.alarm_loop = false;
    }
    if let Some(dir) = &cli.cascade_dir {
        config.cascade_dir = Some(dir.clone());
    }
    if cli.headless {
        config.headless = true;
    }
}

#[cfg(feature = "opencv")]
fn build_analyzer(config: &MonitorConfig) -> Result<FaceAnalyzer, Box<dyn std::error::Error>> {
    use drowsiguard_core::detection::domain::detection_params::DetectionParams;
    use drowsiguard_core::detection::domain::region_detector::TunedDetector;
    use drowsiguard_core::detection::infrastructure::cascade_detector::CascadeDetector;
    use drowsiguard_core::shared::cascade_resolver;
    use drowsiguard_core::shared::constants::{
        EYE_CASCADE_NAME, FACE_CASCADE_NAME, MOUTH_CASCADE_NAME, SYSTEM_CASCADE_DIRS,
    };

    let search_dirs: Vec<PathBuf> = config
        .cascade_dir
        .iter()
        .cloned()
        .chain(SYSTEM_CASCADE_DIRS.iter().map(PathBuf::from))
        .collect();

    let tuned = |name: &str, params: DetectionParams| -> Result<TunedDetector, Box<dyn std::error::Error>> {
        log::info!("Resolving cascade: {name}");
        let path = cascade_resolver::resolve(
            name,
            &cascade_resolver::cascade_url(name),
            &search_dirs,
            Some(Box::new(download_progress)),
        )?;
        let detector = CascadeDetector::load(&path)?;
        Ok(TunedDetector::new(Box::new(detector), params))
    };

    Ok(FaceAnalyzer::new(
        tuned(FACE_CASCADE_NAME, config.face)?,
        tuned(EYE_CASCADE_NAME, config.eye)?,
        tuned(MOUTH_CASCADE_NAME, config.mouth)?,
        config.yawn_aspect_ratio,
    ))
}

#[cfg(not(feature = "opencv"))]
fn build_analyzer(_config: &MonitorConfig) -> Result<FaceAnalyzer, Box<dyn std::error::Error>> {
    Err("built without the `opencv` feature; face detection is unavailable".into())
}

#[cfg(feature = "opencv")]
fn open_camera(config: &MonitorConfig) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
    use drowsiguard_core::capture::infrastructure::opencv_camera::OpenCvCamera;

    Ok(Box::new(OpenCvCamera::open(&config.capture_settings())?))
}

#[cfg(not(feature = "opencv"))]
fn open_camera(_config: &MonitorConfig) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
    Err("built without the `opencv` feature; camera capture is unavailable".into())
}

fn build_display(config: &MonitorConfig) -> Result<Box<dyn FrameDisplay>, Box<dyn std::error::Error>> {
    if config.headless {
        return Ok(Box::new(HeadlessDisplay));
    }
    open_window(&config.window_title)
}

#[cfg(feature = "opencv")]
fn open_window(title: &str) -> Result<Box<dyn FrameDisplay>, Box<dyn std::error::Error>> {
    use drowsiguard_core::display::infrastructure::highgui_display::HighguiDisplay;

    Ok(Box::new(HighguiDisplay::new(title)?))
}

#[cfg(not(feature = "opencv"))]
fn open_window(_title: &str) -> Result<Box<dyn FrameDisplay>, Box<dyn std::error::Error>> {
    Err("built without the `opencv` feature; use --headless".into())
}

fn build_alarm(config: &MonitorConfig, silent: bool) -> Result<Box<dyn Alarm>, Box<dyn std::error::Error>> {
    if silent {
        log::info!("Audio disabled, alarms will only be logged");
        return Ok(Box::new(SilentAlarm::new()));
    }
    load_sound_alarm(config)
}

#[cfg(feature = "rodio")]
fn load_sound_alarm(config: &MonitorConfig) -> Result<Box<dyn Alarm>, Box<dyn std::error::Error>> {
    use drowsiguard_core::alarm::infrastructure::rodio_alarm::RodioAlarm;

    log::info!("Loading alarm sound {}", config.alarm_sound.display());
    Ok(Box::new(RodioAlarm::load(&config.alarm_sound, config.alarm_loop)?))
}

#[cfg(not(feature = "rodio"))]
fn load_sound_alarm(config: &MonitorConfig) -> Result<Box<dyn Alarm>, Box<dyn std::error::Error>> {
    drowsiguard_core::alarm::domain::alarm::check_sound_asset(&config.alarm_sound)?;
    log::warn!("Built without the `rodio` feature, alarms will only be logged");
    Ok(Box::new(SilentAlarm::new()))
}

#[cfg(feature = "opencv")]
fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading cascade... {pct}%");
        if downloaded >= total {
            eprintln!();
        }
    } else {
        eprint!("\rDownloading cascade... {downloaded} bytes");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("drowsiguard").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_flags_keeps_defaults() {
        let mut config = MonitorConfig::default();
        apply_overrides(&parse(&[]), &mut config);
        assert_eq!(config, MonitorConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = parse(&[
            "--camera",
            "2",
            "--threshold",
            "1.25",
            "--alarm-sound",
            "beep.wav",
            "--no-alarm-loop",
            "--cascade-dir",
            "/opt/cascades",
            "--headless",
        ]);
        let mut config = MonitorConfig::default();
        apply_overrides(&cli, &mut config);

        assert_eq!(config.camera_index, 2);
        assert!((config.alarm_threshold_secs - 1.25).abs() < f64::EPSILON);
        assert_eq!(config.alarm_sound, PathBuf::from("beep.wav"));
        assert!(!config.alarm_loop);
        assert_eq!(config.cascade_dir, Some(PathBuf::from("/opt/cascades")));
        assert!(config.headless);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        assert!(build_config(&parse(&["--threshold", "0"])).is_err());
    }

    #[test]
    fn test_headless_display_needs_no_window() {
        let config = MonitorConfig {
            headless: true,
            ..MonitorConfig::default()
        };
        assert!(build_display(&config).is_ok());
    }

    #[test]
    fn test_missing_alarm_sound_is_fatal() {
        let config = MonitorConfig {
            alarm_sound: PathBuf::from("/nonexistent/alarm.mp3"),
            ..MonitorConfig::default()
        };
        assert!(build_alarm(&config, false).is_err());
    }

    #[test]
    fn test_silent_alarm_skips_sound_file() {
        let config = MonitorConfig {
            alarm_sound: PathBuf::from("/nonexistent/alarm.mp3"),
            ..MonitorConfig::default()
        };
        let alarm = build_alarm(&config, true).unwrap();
        assert!(!alarm.is_playing());
    }
}
