//! Core utilities for the Fifth World services
//!
//! This crate provides shared functionality used by every other crate in the
//! workspace:
//!
//! - **Error handling**: errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with environment overrides
//!   and validation
//!
//! # Example
//!
//! ```rust,no_run
//! use fifthworld_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("listening on {}", config.schema.server.bind);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result};
