//! Wire formats for JSON Patch operations.

pub mod json;
