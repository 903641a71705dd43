//! Data models: the extracted card and configuration.

pub mod card;
pub mod config;
