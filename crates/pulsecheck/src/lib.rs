//! Core library for the pulsecheck assessment service.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
