//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Most tests run against the real snapshot store in a temporary
//! directory. The mocks cover what a real store cannot easily show:
//! counting lookups and failing writes.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
