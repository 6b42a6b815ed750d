//! Semabe theme installer and symbolic icon replacer for Cinnamon.

pub mod archive;
pub mod backup;
pub mod config;
pub mod dialog;
pub mod error;
pub mod fs_ops;
pub mod icons;
pub mod installer;
pub mod logging;
pub mod replacer;
pub mod resolve;
pub mod selftest;

#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use error::{Error, Result};
pub use icons::Mode;
