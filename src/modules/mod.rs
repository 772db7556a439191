pub mod config;
pub mod lockfile;
pub mod logger;
