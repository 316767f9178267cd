//! Integration tests for Clearwater.
//!
//! # Running Tests
//!
//! ```bash
//! # Start a local MongoDB
//! docker run -d -p 27017:27017 mongo:7
//!
//! # Run integration tests
//! CLEARWATER_MONGODB_URI=mongodb://localhost:27017 \
//!     cargo test -p clearwater-integration-tests -- --ignored
//! ```
//!
//! Tests run against the `clearwater_test` database and clean up the
//! records they create. They are `#[ignore]`d by default because they
//! require a reachable store.
