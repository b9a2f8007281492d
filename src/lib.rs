//! Console client for Gemini's generateContent API - text chat and
//! text+image prompts from the terminal.
//!
//! The library holds the request/response contract (prompt plus optional
//! inline base64 images in, first candidate's text out) and the session
//! state; the binaries in `src/main.rs` and `src/bin/` are thin front-ends
//! over it.

pub mod ai;
pub mod app;
pub mod attachment;
pub mod error;
pub mod models;

pub use error::{Error, Result};
