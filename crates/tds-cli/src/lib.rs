//! CLI library components for the time & distance pipeline.

pub mod config;
pub mod fetch;
pub mod logging;
pub mod pipeline;
