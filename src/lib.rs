//! Vitals: a minimal web service exposing a JSON health-check endpoint.
//!
//! The `vitals` binary serves `/api/health`; `vitals-start` reads `PORT` from the
//! environment and launches it.

pub mod config;
pub mod error;
pub mod http;
pub mod launcher;
pub mod middleware;
pub mod report;
pub mod routes;
pub mod state;
pub mod uptime;

pub use error::*;
