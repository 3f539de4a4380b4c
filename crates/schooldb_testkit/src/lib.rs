//! # SchoolDB Testkit
//!
//! Test utilities for SchoolDB.
//!
//! This crate provides:
//! - Test fixtures that open every backend with automatic cleanup
//! - The sample school used across the integration tests
//! - Property-based test generators using proptest
//! - Graph comparison and consistency assertions
//!
//! ## Usage
//!
//! ```rust,ignore
//! use schooldb_testkit::prelude::*;
//!
//! #[test]
//! fn enrollment_is_symmetric() {
//!     with_each_backend(|backend, manager| {
//!         populate_sample_school(manager);
//!         assert_consistent(manager);
//!     });
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod integration;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::integration::*;
}

pub use fixtures::*;
pub use generators::*;
pub use integration::*;
