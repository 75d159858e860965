pub mod aws;
pub mod browser;
pub mod cli;
pub mod commands;
pub mod constants;
pub mod error;

pub use error::{Error, Result};
