pub mod common;
pub mod config;
pub mod interactive;
pub mod submit;
