//! # rv-core
//!
//! Core types, traits, and utilities for Receivables RS.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - The shared error taxonomy
//! - Result type aliases
//! - Identifier and clock traits
//! - Application configuration and the persisted settings store

pub mod clock;
pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use clock::*;
pub use error::*;
pub use result::*;
pub use traits::*;
