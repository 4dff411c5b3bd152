pub mod agent;
pub mod chat;
pub mod config;
pub mod health;
pub mod query;
pub mod workspaces;
