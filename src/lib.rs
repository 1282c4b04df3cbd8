//! gitfleet - drive git across many working trees
//!
//! A library for running git as a deadline-bounded subprocess, parsing its
//! machine-readable output, and coordinating concurrent per-repository
//! operations.
//!
//! This library provides:
//! - [`config`]: Process-wide configuration
//! - [`coordinator`]: Per-repository operation guard and bulk refresh
//! - [`git`]: git command execution, failure classification and parsing
//! - [`model`]: Domain models

pub mod config;
pub mod coordinator;
pub mod git;
pub mod model;
