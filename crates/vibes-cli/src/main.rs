//! vibes - CLI for the VibesBNB early-access API.
//!
//! This is a thin wrapper over `vibes-http`, intended for exercising the
//! API by hand: managing the stored session, issuing authenticated calls,
//! uploading files and submitting early-access signups.

mod cli;
mod commands;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{request, session as session_cmd, signup, upload};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Session(cmd) => session_cmd::handle(cmd).await,
        Commands::Request(args) => request::run(&cli.api_url, args).await,
        Commands::Upload(args) => upload::run(&cli.api_url, args).await,
        Commands::Signup(args) => signup::run(&cli.api_url, args).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
