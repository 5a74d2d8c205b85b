//! Data models for estimates and configuration.

pub mod config;
pub mod estimate;
