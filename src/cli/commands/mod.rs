pub mod add;
pub mod config;
pub mod del;
pub mod export;
pub mod init;
pub mod log;
pub mod sync;
pub mod view;
