use clap::Parser;
use deadline_core::error::CoreError;
use owo_colors::{OwoColorize, Style};

mod cli;
mod commands;
mod config;
mod context;
mod parser;
mod views;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = cli::Cli::parse();

    let config = match config::Config::new(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            handle_error(anyhow::anyhow!("Failed to load configuration: {}", e));
            std::process::exit(1);
        }
    };
    log::debug!("Loaded configuration: {:?}", config);

    let ctx = match context::AppContext::new(&cli, &config) {
        Ok(ctx) => ctx,
        Err(e) => {
            handle_error(e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        cli::Commands::Next(command) => commands::next::show_next(&ctx, command),
        cli::Commands::Remaining(command) => commands::remaining::show_remaining(&ctx, command),
        cli::Commands::Log(command) => commands::log::show_log(&ctx, command),
        cli::Commands::Watch(command) => commands::watch::watch(&ctx, command).await,
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    match err.downcast_ref::<CoreError>() {
        Some(CoreError::NotFound(s)) => {
            eprintln!("{} {}", "Error:".style(error_style), s);
        }
        Some(CoreError::InvalidInput(s)) => {
            eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
        }
        Some(core_error @ (CoreError::InvalidWeekday(_) | CoreError::InvalidTime(_))) => {
            eprintln!("{} {}", "Error:".style(error_style), core_error);
            eprintln!("Check the deadline settings in your configuration.");
        }
        _ => {
            eprintln!("{} {:#}", "Error:".style(error_style), err);
        }
    }
}
