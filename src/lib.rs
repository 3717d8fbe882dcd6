//! NOVA career intelligence library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod jobs;
pub mod llm;
pub mod notify;
pub mod output;
pub mod processing;
pub mod session;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use error::{NovaError, Result};
