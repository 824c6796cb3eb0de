pub mod cli;
pub mod config;
pub mod csv_import;
pub mod dashboard;
pub mod engine;
pub mod fixtures;
pub mod model;
pub mod notice;
pub mod session;
pub mod store;
pub mod units;
