//! Text normalization primitives.
//!
//! - [`cjk`]: ideograph range checks used for word-adjacency decisions
//! - [`merge`]: joins raw segments into one continuous string
//! - [`noise`]: strips formatting artifacts from merged text

pub mod cjk;
pub mod merge;
pub mod noise;

pub use cjk::{contains_cjk, is_cjk_char};
pub use merge::merge_segments;
pub use noise::{collapse_whitespace, remove_noise};
