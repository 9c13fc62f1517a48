//! Subcommand implementations

pub mod check_db;
pub mod init_db;
pub mod serve;
