//! Core application primitives (pipeline orchestrator, HTTP surface)

pub mod http;
pub mod pipeline;

pub use http::*;
pub use pipeline::*;
