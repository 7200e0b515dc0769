//! Application service layer - use cases, config, scanning

pub mod app;
pub mod config;
pub mod repository;
pub mod scanner;
