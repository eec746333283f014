//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::request::RequestArgs;
use crate::commands::session::SessionCommand;
use crate::commands::signup::SignupArgs;
use crate::commands::upload::UploadArgs;

/// VibesBNB early-access API tool.
#[derive(Parser, Debug)]
#[command(name = "vibes")]
#[command(author, version = env!("VIBES_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// API base URL
    #[arg(
        long,
        global = true,
        env = "VIBES_API_URL",
        default_value = "https://api.vibesbnb.com"
    )]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the stored session tokens
    Session(SessionCommand),

    /// Issue an authenticated API call
    Request(RequestArgs),

    /// Upload a file as multipart form data
    Upload(UploadArgs),

    /// Sign up for early access
    Signup(SignupArgs),
}
