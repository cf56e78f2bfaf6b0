pub mod capture_settings;
pub mod frame_source;
