pub mod api;
pub mod components;
pub mod interop;
pub mod overlay;
pub mod upload;

pub use components::*;
pub use upload::UploadWidget;
