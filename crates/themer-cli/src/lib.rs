#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_const_for_fn)]

//! # Themer CLI
//!
//! Library half of the `themer` binary: argument parsing, layered
//! configuration, logging setup and the subcommands themselves.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

pub use cli::{Cli, Command, OutputFormat};
pub use config::{Config, ConfigError, LogFormat};
