//! Prelude module for `msagent_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use msagent_internal::prelude::*;
//!
//! let options = IngestOptions::new("/tmp/out");
//! ```

// Re-export everything from msagent_types::prelude
#[doc(inline)]
pub use msagent_types::prelude::*;

// Re-export the entire msagent_types module for advanced usage
#[doc(inline)]
pub use msagent_types;
