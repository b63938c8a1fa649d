//! Formatter integration tests
