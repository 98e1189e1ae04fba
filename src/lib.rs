//! Library exports for the URL shortener application
//!
//! The binary in `main.rs` wires these together; tests drive them directly.

pub mod config;
pub mod database;
pub mod error;
pub mod handler;
pub mod model;
pub mod route;
pub mod validation;
