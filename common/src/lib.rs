#![deny(missing_docs)]

//! Types and helpers shared by every crate in the workspace

mod data_dir;
mod network;

pub use data_dir::{ensure_dir_exists, get_default_data_dir};
pub use network::{NetworkType, UnknownNetworkType};
