pub mod config;
pub mod dedup;
pub mod validate;
