//! Shared helpers

pub mod debug;
pub mod naming;
pub mod script_json;
