pub mod config;
pub mod logger;
pub mod request_log;
