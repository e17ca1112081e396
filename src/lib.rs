pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod rating;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

fn database_path() -> String {
    std::env::var("DATABASE_PATH").unwrap_or_else(|_| "party_card_ranking.db".to_string())
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_init() -> Result<()> {
    let pool = database::create_pool(&database_path())?;
    let mut conn = database::get_connection(&pool)?;
    database::setup::reset_database(&mut conn)
}

pub fn handle_add_profile(name: &str, password: Option<&str>) -> Result<()> {
    let pool = database::create_pool(&database_path())?;
    let mut conn = database::get_connection(&pool)?;

    let password = match password {
        Some(p) => p.to_string(),
        None => database::profiles::generate_password(&mut conn)?,
    };

    let profile = database::profiles::insert_profile(&mut conn, name, &password)?;
    log::info!(
        "Created profile '{}' (id {}) with password '{}'",
        profile.name,
        profile.id,
        profile.password
    );
    Ok(())
}

pub fn handle_add_prompt(text: &str) -> Result<()> {
    let pool = database::create_pool(&database_path())?;
    let mut conn = database::get_connection(&pool)?;

    let prompt = database::prompts::insert_prompt(&mut conn, text)?;
    log::info!("Created prompt {} : {}", prompt.id, prompt.text);
    Ok(())
}
