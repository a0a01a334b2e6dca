pub mod api;
pub mod backend;
pub mod cli;
pub mod mcp;
pub mod service;
