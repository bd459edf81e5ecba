//! Internal crate for `msagent-rs`.
//!
//! This module is separated into its own crate to keep the top-level
//! `msagent-rs` package's public surface small, and should not be
//! used directly.
//!
//! # Examples
//!
//! ```rust
//! use msagent_internal::prelude::*;
//!
//! let options = IngestOptions::new("/tmp/out");
//! ```

/// `use msagent_internal::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export msagent_types for convenience
pub use msagent_types;
