pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod infra;
pub mod observability;
pub mod pipeline;
pub mod types;
