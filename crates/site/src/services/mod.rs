//! Services for the Clearwater site backend.

pub mod auth;

pub use auth::{AdminBootstrap, AuthError, AuthService, CredentialCheck};
