//! StackBlitz MCP tool and resource surface.
//!
//! Schemas, the service wiring and the per-tool logic live in separate submodules; the tool
//! bodies only translate between protocol types and the core crates.

mod project;
mod resources;
mod schemas;
mod search;
mod service;


pub use service::StackBlitzService;
