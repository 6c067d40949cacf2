//! CLI command handlers.

pub mod auth;
pub mod config;
pub mod download;
pub mod register;
pub mod upload;
