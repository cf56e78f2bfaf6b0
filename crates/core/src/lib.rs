pub mod alarm;
pub mod capture;
pub mod detection;
pub mod display;
pub mod monitoring;
pub mod shared;
