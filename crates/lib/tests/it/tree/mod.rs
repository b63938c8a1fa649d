//! Tree integration tests
//!
//! This module tests documents and node handles: path navigation, mutation,
//! array and group operations, parent links, change hooks, coercion and
//! staticizing.

mod array_tests;
mod coerce_tests;
