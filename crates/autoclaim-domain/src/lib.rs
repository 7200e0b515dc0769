//! Domain layer: cost tables, estimation, shopping guides and report aggregation

pub mod model;
pub mod repository;
pub mod service;
