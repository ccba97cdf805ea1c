#![deny(missing_docs)]

//! Offers common functionality to binary crates (configuration shared by all binaries and
//! logging setup)

mod config;
/// Functions for setting up the logging system
pub mod logger;

pub use config::Config;
