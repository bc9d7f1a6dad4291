//! Content scan: read matched files and extract ECS version mentions

pub mod execute;
pub mod extractor;
pub mod reader;

pub use execute::{ContentScanner, scan_paths};
pub use extractor::{DEFAULT_VERSION_PATTERN, MatchPolicy, VersionExtractor};
pub use reader::{ContentReader, FsReader};
