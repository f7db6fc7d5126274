//! Job listing store, HTTP routes, and the search pipeline used by the job portal.

pub mod config;
pub mod error;
pub mod listings;
pub mod search;
pub mod telemetry;
