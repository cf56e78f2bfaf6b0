pub mod clock;
pub mod debounce_timer;
pub mod monitor_config;
pub mod monitor_logger;
pub mod monitor_loop;
