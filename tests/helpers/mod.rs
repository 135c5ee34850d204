//! Test helpers module
//!
//! This module provides utilities and helpers for testing the Sender client:
//! a mock backend and test data builders.

#![allow(dead_code)]

pub mod backend_mock;
pub mod test_data;

pub use backend_mock::*;
pub use test_data::*;
