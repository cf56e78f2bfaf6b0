#[cfg(feature = "rodio")]
pub mod rodio_alarm;
