//! Path matching and content scanning engines

pub mod config;
pub mod content_scan;
pub mod file_search;
