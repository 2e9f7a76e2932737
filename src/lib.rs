//! Profile Directory - a directory service for personality-typed profiles,
//! the users who browse them, and the comments users leave.
//!
//! The binary in `main.rs` wires these modules together; the library exists
//! so the HTTP surface can be driven directly from integration tests.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod personality;
pub mod services;
pub mod store;
pub mod types;
pub mod version;

pub use error::{Error, Result};
