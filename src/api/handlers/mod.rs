//! Request handlers for the HTTP API.

pub mod completions;
pub mod habits;
