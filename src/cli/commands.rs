pub mod check;
pub mod config;
pub mod export;
pub mod init;
pub mod list;
pub mod shell;
