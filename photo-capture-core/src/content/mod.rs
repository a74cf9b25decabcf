pub mod pose_library;
pub mod static_source;
