pub mod config;
pub mod fields;
