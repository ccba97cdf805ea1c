#![deny(missing_docs)]

//! Digest types shared across the node

/// 32-byte digests and their hex encoding
pub mod hash;

pub use hash::{Hash256, Hash256Data};
