//! `cadastro` - client registry server and CLI
//!
//! This binary serves the registry web application and offers the same
//! search and record operations from the command line.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use clap::Parser;

use cadastro::cli::{
    AddCommand, Cli, Command, ConfigCommand, OutputFormat, SearchCommand, ServeCommand,
};
use cadastro::client::{ClientInput, NewClient};
use cadastro::{init_logging, view, Config, Storage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Serve(serve_cmd) => handle_serve(config, &serve_cmd).await,
        Command::Search(search_cmd) => handle_search(&config, &search_cmd),
        Command::Add(add_cmd) => handle_add(&config, add_cmd),
        Command::Stats(stats_cmd) => handle_stats(&config, stats_cmd.json),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

async fn handle_serve(
    mut config: Config,
    cmd: &ServeCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(port) = cmd.port {
        config.server.port = port;
    }
    cadastro::server::serve(&config).await?;
    Ok(())
}

fn handle_search(config: &Config, cmd: &SearchCommand) -> Result<(), Box<dyn std::error::Error>> {
    let storage = Storage::open(config.database_path())?;
    let clients = storage.search(&cmd.term, cmd.limit)?;

    match cmd.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&clients)?);
        }
        OutputFormat::Plain => {
            for client in &clients {
                let id = client.id.unwrap_or_default();
                println!("{id}\t{}", client.name);
            }
        }
        OutputFormat::Table => {
            if clients.is_empty() {
                println!("Nenhum resultado encontrado.");
                return Ok(());
            }
            println!(
                "{:<6} {:<30} {:<16} {:<16} {:<12} {}",
                "ID", "Nome", "CPF", "Telefone", "Nascimento", "Cadastro"
            );
            for client in &clients {
                let cpf = client.cpf.as_deref().unwrap_or_default();
                let cpf = if cmd.revealed {
                    view::format_cpf(cpf)
                } else {
                    view::mask_cpf(cpf)
                };
                let birth = client
                    .date_of_birth
                    .as_deref()
                    .map(view::format_date)
                    .unwrap_or_default();
                println!(
                    "{:<6} {:<30} {:<16} {:<16} {:<12} {}",
                    client.id.unwrap_or_default(),
                    client.name,
                    cpf,
                    client.phone.as_deref().unwrap_or_default(),
                    birth,
                    view::format_timestamp(client.created_at)
                );
            }
        }
    }
    Ok(())
}

fn handle_add(config: &Config, cmd: AddCommand) -> Result<(), Box<dyn std::error::Error>> {
    let input = ClientInput {
        name: Some(cmd.name),
        cpf: cmd.cpf,
        phone: cmd.phone,
        notes: cmd.notes,
        date_of_birth: cmd.birth,
    };
    let new_client = NewClient::from_input(input)?;

    let storage = Storage::open(config.database_path())?;
    let client = storage.insert(&new_client)?;

    println!("Cliente salvo.");
    if let Some(id) = client.id {
        println!("  ID: {id}");
    }
    Ok(())
}

fn handle_stats(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let storage = Storage::open(config.database_path())?;
    let stats = storage.stats()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("cadastro stats");
        println!("--------------");
        println!("Database:       {}", config.database_path().display());
        println!("Clients:        {}", stats.total_clients);
        if let Some(oldest) = stats.oldest_created {
            println!("Oldest record:  {}", view::format_timestamp(oldest));
        }
        if let Some(newest) = stats.newest_created {
            println!("Newest record:  {}", view::format_timestamp(newest));
        }
        println!("Size (bytes):   {}", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Host:          {}", config.server.host);
                println!("  Port:          {}", config.server.port);
                println!("  CORS:          {}", config.server.cors);
                println!();
                println!("[Storage]");
                println!("  Database path: {}", config.database_path().display());
                println!("  Search limit:  {}", config.storage.search_limit);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
