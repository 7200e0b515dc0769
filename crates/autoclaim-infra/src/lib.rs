//! Infrastructure layer - cost table loading and report persistence

pub mod cost_table_loader;
pub mod persistence;

pub use cost_table_loader::CostTableLoader;
