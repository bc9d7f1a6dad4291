pub mod manager;
pub mod pattern;
pub mod sorting;
pub mod types;

pub use manager::content_scan::{
    ContentReader, ContentScanner, FsReader, MatchPolicy, VersionExtractor, scan_paths,
};
pub use manager::file_search::{execute as match_paths, find_matches};
pub use pattern::*;
pub use types::*;
