//! Data models for extraction output and configuration.

pub mod config;
pub mod record;
