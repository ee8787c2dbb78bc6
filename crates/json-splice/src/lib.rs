//! json-splice: all-or-nothing RFC 6902 JSON Patch over persistent JSON
//! values.
//!
//! - [`json_patch`]: the operation model, its JSON codec and the engine.
//! - [`json_cli`]: text-in, text-out helpers behind the `json-splice` binary.
//!
//! Values live in `json-splice-value`, pointers in `json-splice-pointer`.

pub mod json_cli;
pub mod json_patch;
