pub mod camera_models;
pub mod commit_result;
pub mod config;
pub mod content_models;
pub mod error;
pub mod state;
