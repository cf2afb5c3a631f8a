//! Config subcommands

use crate::cli::ConfigCommand;
use crate::config::Config;
use std::path::Path;

pub fn run(config: &Config, data_dir: &Path, command: ConfigCommand) -> anyhow::Result<()> {
    match command {
        ConfigCommand::Show => show(config, data_dir),
        ConfigCommand::Init { force } => init(data_dir, force),
        ConfigCommand::Path => {
            println!("{}", Config::path(data_dir).display());
            Ok(())
        }
    }
}

fn show(config: &Config, data_dir: &Path) -> anyhow::Result<()> {
    println!("config file: {}", Config::path(data_dir).display());
    println!("{}", serde_json::to_string_pretty(config)?);
    if !config.has_credentials() {
        println!("note: no credentials configured; the app runs against the built-in sample roster");
    }
    Ok(())
}

fn init(data_dir: &Path, force: bool) -> anyhow::Result<()> {
    let path = Config::path(data_dir);
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    std::fs::create_dir_all(data_dir)?;
    Config::default().save(data_dir);
    println!("Wrote {}", path.display());
    println!("Set spreadsheet_id plus api_key or service_account_key to go online.");
    Ok(())
}
