/// Base URL for the stock Haar cascades shipped with OpenCV.
pub const CASCADE_BASE_URL: &str =
    "https://raw.githubusercontent.com/opencv/opencv/4.x/data/haarcascades";

pub const FACE_CASCADE_NAME: &str = "haarcascade_frontalface_default.xml";
pub const EYE_CASCADE_NAME: &str = "haarcascade_eye.xml";
/// The smile cascade stands in for an open-mouth detector.
pub const MOUTH_CASCADE_NAME: &str = "haarcascade_smile.xml";

/// Directories where distro packages commonly install the stock cascades.
pub const SYSTEM_CASCADE_DIRS: &[&str] = &[
    "/usr/share/opencv4/haarcascades",
    "/usr/local/share/opencv4/haarcascades",
    "/usr/share/opencv/haarcascades",
    "/opt/homebrew/share/opencv4/haarcascades",
];

pub const DEFAULT_CAMERA_INDEX: i32 = 0;
pub const DEFAULT_FRAME_WIDTH: u32 = 640;
pub const DEFAULT_FRAME_HEIGHT: u32 = 480;
pub const DEFAULT_FRAME_RATE: u32 = 15;

pub const FACE_SCALE_FACTOR: f64 = 1.1;
pub const FACE_MIN_NEIGHBORS: i32 = 5;

pub const EYE_SCALE_FACTOR: f64 = 1.1;
pub const EYE_MIN_NEIGHBORS: i32 = 8;
pub const EYE_MIN_SIZE: (i32, i32) = (15, 15);

pub const MOUTH_SCALE_FACTOR: f64 = 1.7;
pub const MOUTH_MIN_NEIGHBORS: i32 = 22;

/// A mouth region wider than this multiple of its height counts as a yawn.
pub const YAWN_ASPECT_RATIO: f64 = 2.0;

/// Seconds the drowsy signal must hold before the alarm sounds.
pub const ALARM_THRESHOLD_SECS: f64 = 0.5;

pub const DEFAULT_ALARM_SOUND: &str = "alarm_sound.mp3";
pub const DEFAULT_WINDOW_TITLE: &str = "Monitoring";
pub const DEFAULT_QUIT_KEY: char = 'q';
