// Shared library for the executors dashboard: models, backend client, view and table logic

pub mod client;
pub mod config;
pub mod error_state;
pub mod errors;
pub mod models;
pub mod table;
pub mod telemetry;
pub mod view;
