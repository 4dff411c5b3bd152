pub mod agents;
pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod kql;
pub mod llm;
