//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::console::TerminalConsole;
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;

/// Load settings and run the selected command.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(Commands::Completion { shell }) = &cli.command {
        return cmd_completion(*shell);
    }

    let settings = Settings::load(cli.config.as_deref())?.with_db_path(cli.db.clone());
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match &cli.command {
        None | Some(Commands::Register) => cmd_register(&container),
        Some(Commands::Add { name, tax_id }) => cmd_add(&container, name, tax_id),
        Some(Commands::Show { tax_id }) => cmd_show(&container, tax_id),
        Some(Commands::List) => cmd_list(&container),
        Some(Commands::Config { command }) => cmd_config(&container, command),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
    }
}

#[instrument(skip(container))]
fn cmd_register(container: &ServiceContainer) -> CliResult<()> {
    let mut console = TerminalConsole::stdin();
    container.controller().run(&mut console)?;
    Ok(())
}

#[instrument(skip(container))]
fn cmd_add(container: &ServiceContainer, name: &str, tax_id: &str) -> CliResult<()> {
    let client = container.registration()?.register(name, tax_id)?;
    output::success(&format!("Client registered: {}", client));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, tax_id: &str) -> CliResult<()> {
    let client = container
        .registration()?
        .lookup(tax_id)?
        .ok_or_else(|| CliError::NotFound(tax_id.to_string()))?;
    output::info(&format!("ID: {}", client.id));
    output::info(&format!("Name: {}", client.name));
    output::info(&format!("Tax id: {}", client.tax_id.formatted()));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_list(container: &ServiceContainer) -> CliResult<()> {
    let clients = container.registration()?.list()?;
    if clients.is_empty() {
        output::info("No clients registered.");
        return Ok(());
    }
    output::header(&format!("{:>6}  {:<14}  {}", "ID", "TAX ID", "NAME"));
    for client in &clients {
        output::client_row(client);
    }
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => {
                    let state = if path.exists() { "" } else { " (not present)" };
                    output::info(&format!("config: {}{}", path.display(), state));
                }
                None => output::warning("no config directory available on this platform"),
            }
            output::info(&format!("database: {}", container.settings.db_path.display()));
        }
        ConfigCommands::Template => {
            output::info(&Settings::template());
        }
    }
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
