//! Core library for the vapte client: interaction flows against the
//! transformation service, the HTTP client, configuration, token
//! persistence, the UI event model, and page styling helpers.

pub mod client;
pub mod config;
pub mod error;
pub mod flows;
pub mod page;
pub mod tokens;
pub mod ui;
