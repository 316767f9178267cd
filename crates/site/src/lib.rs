//! Clearwater Site - backend library for the Clearwater business website.
//!
//! This crate holds everything the site's maintenance surface needs:
//!
//! - [`config`] - Environment-driven configuration
//! - [`db`] - Scoped document-store handle and repositories
//! - [`models`] - User and settings record types
//! - [`services`] - Credential hashing and the admin bootstrap flow
//!
//! HTTP routing lives elsewhere; this crate is consumed by the `cw-cli`
//! maintenance binary and by integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod models;
pub mod services;
