//! Utility modules for filesystem and logging.

pub mod fs;
pub mod logging;
