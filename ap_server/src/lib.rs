//! HTTP service exposing the `age_policy` eligibility checks.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
