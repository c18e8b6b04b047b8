//! CLI module for the SAMAAN gateway

pub mod serve;

use clap::{Parser, Subcommand};

/// SAMAAN Pension Assist backend
#[derive(Parser)]
#[command(name = "samaan-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server (default)
    Serve,
}
