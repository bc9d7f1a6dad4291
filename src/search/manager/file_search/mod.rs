//! Path matching using glob patterns and parallel directory traversal
//!
//! A combined glob (root joined with a suffix) is split into the literal
//! directory to walk from and a compiled matcher that every visited entry's
//! full path is tested against.

mod builder;
mod errors;
mod execute;
mod visitor;

pub use execute::{execute, find_matches};
