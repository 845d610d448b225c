//! Integration test suite for pipegen
//!
//! End-to-end checks of the public library API and the `pipegen` binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **resolution**: catalog defaults, seeding, memoization and cycles through the public API
//! - **generation**: full template-tree runs with scripted operators
//! - **values**: values file persistence across runs
//! - **cli**: the `pipegen` binary (`generate`, `vars`, error output)

mod cli;
mod generation;
mod resolution;
mod values;
