//! `cadastro` - A small client registry with a web UI and JSON API
//!
//! This library provides the core functionality for the registry: the
//! `SQLite`-backed record store, mixed name/CPF/phone search, the HTTP
//! server, and the presentation helpers that mask and format sensitive
//! fields.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod storage;
pub mod view;

pub use client::{Client, ClientInput, NewClient};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use storage::{Storage, StoreStats};
