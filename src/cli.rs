use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "party-card-ranking backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Reset the database schema (destroys existing data)
    Init,
    /// Create a party profile; the password is auto-generated when omitted
    AddProfile {
        #[arg(short, long)]
        name: String,
        /// Shared login password (8 lowercase letters are generated if absent)
        #[arg(long)]
        password: Option<String>,
    },
    /// Add a prompt that cards can answer
    AddPrompt {
        #[arg(short, long)]
        text: String,
    },
}
