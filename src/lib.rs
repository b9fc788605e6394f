//! Clink OpenCode - normalize OpenCode CLI output into uniform agent responses.

pub mod agent;
pub mod commands;
pub mod config;
pub mod parser;
