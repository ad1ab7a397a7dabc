//! Command-line remote for LG webOS TVs.
//!
//! Thin layer over the `webos` crate: argument parsing, `.env` settings and
//! credential storage, logging setup and result printing.

pub mod cli;
pub mod commands;
pub mod config;
pub mod credential_store;
pub mod error;
pub mod logging;
pub mod output;
pub mod styles;
