//! Input processing module
//! Handles media type detection, text extraction, and input loading

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use file_detector::MediaType;
pub use manager::{InputManager, JobSource, UploadedDocument};
