// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixdesk - repair-shop operations backend.
//!
//! This is the binary entry point for the Fixdesk server.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod serve;

/// Fixdesk - repair-shop operations backend.
#[derive(Parser, Debug)]
#[command(name = "fixdesk", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Fixdesk API server.
    Serve,
    /// Print the resolved configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match fixdesk_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            fixdesk_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            print_config(&config);
        }
        None => {
            println!("fixdesk: use --help for available commands");
        }
    }
}

/// Print the effective configuration with secrets redacted.
fn print_config(config: &fixdesk_config::FixdeskConfig) {
    println!("server.host = {}", config.server.host);
    println!("server.port = {}", config.server.port);
    println!(
        "server.cors_allowed_origin = {}",
        config.server.cors_allowed_origin
    );
    println!("server.log_level = {}", config.server.log_level);
    println!("storage.database_path = {}", config.storage.database_path);
    println!("storage.wal_mode = {}", config.storage.wal_mode);
    println!("whatsapp.api_base_url = {}", config.whatsapp.api_base_url);
    println!(
        "whatsapp.phone_number_id = {}",
        config
            .whatsapp
            .phone_number_id
            .as_deref()
            .unwrap_or("(unset)")
    );
    println!(
        "whatsapp.access_token = {}",
        if config.whatsapp.access_token.is_some() {
            "[redacted]"
        } else {
            "(unset)"
        }
    );
    println!(
        "whatsapp.verify_token = {}",
        if config.whatsapp.verify_token.is_some() {
            "[redacted]"
        } else {
            "(unset)"
        }
    );
}
