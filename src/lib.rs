pub mod api;
pub mod config;
pub mod domain;
pub mod health;
pub mod metrics;
pub mod store;
