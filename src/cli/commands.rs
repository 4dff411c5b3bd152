use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kql-copilot", version, about = "Chat backend and KQL assistant for Azure Log Analytics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// Run the KQL syntax pre-check on a query string
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen port (overrides the PORT environment variable)
    #[arg(long)]
    pub port: Option<u16>,

    /// Listen address
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Upstream request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// KQL query to check
    pub query: String,

    /// Output the full result as JSON
    #[arg(long)]
    pub json: bool,
}
