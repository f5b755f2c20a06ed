//! The `utils` module provides a collection of utility functions and common
//! definitions used across the `tubefeed` application.

pub mod error;
pub mod logging;
