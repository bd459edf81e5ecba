#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `msagent-rs` ingests legacy Microsoft Agent 2.0 character files
//! (`.acs`) into a portable JSON manifest plus a sprite atlas, and
//! plays back the resulting animations through a time-driven frame
//! player.
pub use msagent_internal::*;
