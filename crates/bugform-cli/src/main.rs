//! Bugform CLI - file bug reports from the terminal.
//!
//! One-step submission for scripts, plus an interactive form.

mod cli;
mod commands;
mod config;
mod error;
mod terminal;


use std::io;

use bugform_core::{HttpTransport, WorkflowBuilder};
use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::common::{read_piped_stdin, resolve_launch};
use crate::commands::config::run_config;
use crate::commands::interactive::drive_session;
use crate::commands::submit::{print_submit_report, run_submit, SubmitRequest};
use crate::config::load_config;
use crate::error::CliError;
use crate::terminal::{LogSurface, TerminalSurface};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bugform=info".parse().unwrap()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let resolved = load_config(cli.config.as_deref(), cli.endpoint.as_deref())?;

    match cli.command {
        Commands::Submit {
            launch,
            title,
            description,
            email,
            attachments,
            json,
        } => {
            let description = match description {
                Some(description) => description,
                None => read_piped_stdin()?.unwrap_or_default(),
            };
            let launch = resolve_launch(&resolved.config, &launch)?;
            let transport = HttpTransport::from_config(&resolved.config)?;
            let report = run_submit(
                resolved.config,
                launch,
                transport,
                LogSurface,
                SubmitRequest {
                    title,
                    description,
                    email,
                    attachments,
                },
            )
            .await?;
            print_submit_report(&report, json)?;
        }
        Commands::Interactive { launch } => {
            let launch = resolve_launch(&resolved.config, &launch)?;
            let transport = HttpTransport::from_config(&resolved.config)?;
            let mut workflow = WorkflowBuilder::new(resolved.config)
                .launch(launch)
                .transport(transport)
                .surface(TerminalSurface::new(io::stdout()))
                .close_handler(|| {
                    tracing::debug!("Bug report form closed");
                })
                .build()?;

            println!("Type `help` for commands.");
            drive_session(&mut workflow, io::stdin().lock(), &mut io::stderr()).await?;
        }
        Commands::Config { command } => run_config(command, &resolved)?,
    }

    Ok(())
}
