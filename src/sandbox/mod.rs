//! Sandbox module: the isolated directory tree a session runs against
//!
//! - Extraction of a zip archive into a unique staging directory
//! - Containment-checked resolution of user paths
//! - Guaranteed teardown (explicit, or on drop)

mod extract;
mod manager;

pub use extract::{extract_archive, ExtractionSummary};
pub use manager::{Sandbox, SandboxOptions, DEFAULT_PREFIX};
