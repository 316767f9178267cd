//! Clearwater Core - Shared types library.
//!
//! This crate provides common types used across all Clearwater components:
//! - `site` - Store access, models, and services for the site backend
//! - `cli` - Command-line tools for maintenance and bootstrap
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no
//! hashing. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails and user roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
