pub mod application;
pub mod cli;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{agent, expert, extraction, tooling};
pub use domain::types;
pub use infrastructure::model;
