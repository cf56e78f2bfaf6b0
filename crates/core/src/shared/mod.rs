pub mod cancellation;
pub mod cascade_resolver;
pub mod constants;
pub mod frame;
pub mod gray_image;
pub mod region;
