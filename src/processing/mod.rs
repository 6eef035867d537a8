//! Text processing and analysis module

pub mod text_processor;
pub mod stopwords;
pub mod similarity;
pub mod gap;
pub mod analyzer;
