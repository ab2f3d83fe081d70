//! Rendering module for writing extracted records.

mod json;

pub use json::{to_json, JsonFormat};
