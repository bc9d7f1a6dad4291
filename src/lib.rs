mod validation;
pub use validation::*;

pub mod cli;

pub mod config;
pub use config::*;

pub mod error;
pub use error::AuditError;

pub mod output;
pub use output::{OutputFormat, Printer};

pub mod list_paths;
pub use list_paths::*;

pub mod scan_versions;
pub use scan_versions::*;

pub mod search;
