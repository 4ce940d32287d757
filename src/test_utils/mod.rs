//! Test utilities.
//!
//! This module provides test data factories for creating valid test fixtures.

mod factories;

pub use factories::*;
