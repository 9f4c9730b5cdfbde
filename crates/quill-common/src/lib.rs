//! Common utilities for the quill CSS toolkit.
//!
//! This crate provides shared infrastructure used by every quill component:
//! - **Source positions** - 1-based line/column pairs attached to tokens and diagnostics
//! - **Warning System** - colored, deduplicated terminal output for recoverable problems

pub mod position;
pub mod warning;

pub use position::Position;
