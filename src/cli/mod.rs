//! CLI command implementations

pub mod init;
pub mod level;
pub mod replay;
pub mod table;
