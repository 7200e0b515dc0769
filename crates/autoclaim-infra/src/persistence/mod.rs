//! Persistence implementations
//!
//! Reports are written as numbered files that never overwrite earlier runs.

mod file_report_repo;
mod numbered_file;

pub use file_report_repo::FileReportRepository;
pub use numbered_file::{create_numbered_file, next_available_path, numbered_path};
