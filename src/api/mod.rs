//! Remote backend access

pub mod client;

pub use client::{ApiClient, ApiMessage};
