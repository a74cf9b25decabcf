pub mod camera_provider;
pub mod content_source;
pub mod gallery_launcher;
pub mod media_storage;
pub mod session_delegate;
