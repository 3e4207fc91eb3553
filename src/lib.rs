//! Gufo - a command-line demo client for the GufoRAG chat API.
//!
//! This library exposes modules for use in integration tests.

pub mod cli;
pub mod cli_output;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod reader;
pub mod sink;
pub mod sse;
