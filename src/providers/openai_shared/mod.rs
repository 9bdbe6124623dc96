//! Shared OpenAI-compatible API structures and utilities
//!
//! This module contains the common request/response structures and HTTP
//! client used by OpenAI itself and Groq.
//!
//! - `types` - Wire-format data structures
//! - `utils` - Bearer-authenticated client and response extraction

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests;

pub use types::*;
pub use utils::*;
