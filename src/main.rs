use anyhow::Result;

use party_card_ranking::cli::Command;
use party_card_ranking::{
    handle_add_profile, handle_add_prompt, handle_init, handle_serve, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Init => handle_init(),
        Command::AddProfile { name, password } => handle_add_profile(name, password.as_deref()),
        Command::AddPrompt { text } => handle_add_prompt(text),
    }
}
