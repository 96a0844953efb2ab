//! CLI command implementations

pub mod build;
pub mod deploy;
pub mod publish;
