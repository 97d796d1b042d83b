//! Indicative construction cost and professional fee estimation for Pacific
//! island projects.

pub mod config;
pub mod error;
pub mod estimation;
pub mod regions;
pub mod report;
pub mod telemetry;
