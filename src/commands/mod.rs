//! Command handlers behind the CLI surface

pub mod check;
pub mod config;
pub mod groups;
pub mod members;

use crate::config::Config;
use crate::error::Result;
use crate::model::SheetRecord;
use crate::repo::{MemoryStore, RosterStore, SheetStore};
use crate::sheets::{Credentials, ServiceAccountKey, SheetsClient, TokenProvider};
use anyhow::Context;
use std::sync::Arc;
use tracing::warn;

/// Either backing store, picked from the configuration.
pub enum Roster<R: SheetRecord> {
    Sheets(SheetStore<R>),
    Memory(MemoryStore<R>),
}

impl<R: SheetRecord> RosterStore<R> for Roster<R> {
    async fn list(&self) -> Result<Vec<R>> {
        match self {
            Roster::Sheets(store) => store.list().await,
            Roster::Memory(store) => store.list().await,
        }
    }

    async fn get(&self, id: &str) -> Result<Option<R>> {
        match self {
            Roster::Sheets(store) => store.get(id).await,
            Roster::Memory(store) => store.get(id).await,
        }
    }

    async fn add(&self, record: R) -> Result<R> {
        match self {
            Roster::Sheets(store) => store.add(record).await,
            Roster::Memory(store) => store.add(record).await,
        }
    }

    async fn update(&self, record: R) -> Result<()> {
        match self {
            Roster::Sheets(store) => store.update(record).await,
            Roster::Memory(store) => store.update(record).await,
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        match self {
            Roster::Sheets(store) => store.delete(id).await,
            Roster::Memory(store) => store.delete(id).await,
        }
    }
}

/// Build the store for one record type. Falls back to the seeded in-memory
/// roster when no credentials are configured.
pub fn open_store<R: SheetRecord>(
    config: &Config,
    sheet: &str,
    seed: Vec<R>,
) -> anyhow::Result<Roster<R>> {
    if !config.has_credentials() {
        warn!("No credentials configured, using the built-in sample roster");
        eprintln!(
            "note: no credentials configured; changes affect only the built-in sample roster"
        );
        return Ok(Roster::Memory(MemoryStore::new(seed)));
    }
    let client = sheets_client(config)?;
    Ok(Roster::Sheets(SheetStore::new(Arc::new(client), sheet)))
}

/// Client for the configured spreadsheet, service account preferred over
/// API key.
pub fn sheets_client(config: &Config) -> anyhow::Result<SheetsClient> {
    let credentials = if let Some(path) = &config.service_account_key {
        let key = ServiceAccountKey::from_file(path)
            .with_context(|| format!("failed to read service-account key '{}'", path.display()))?;
        Credentials::ServiceAccount(TokenProvider::new(key))
    } else if let Some(key) = config.api_key.as_deref().filter(|k| !k.is_empty()) {
        Credentials::ApiKey(key.to_string())
    } else {
        anyhow::bail!("no credentials configured; run `dojo-roster config init` and set api_key or service_account_key");
    };
    Ok(SheetsClient::new(config.spreadsheet_id.clone(), credentials)?)
}

/// Render rows as a left-aligned text table with a header rule.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let print_line = |cells: Vec<String>| {
        let mut line = String::new();
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            line.push_str(&format!("{:<width$}", cell, width = widths[i]));
        }
        println!("{}", line.trim_end());
    };

    print_line(headers.iter().map(|h| h.to_string()).collect());
    print_line(widths.iter().map(|w| "-".repeat(*w)).collect());
    for row in rows {
        print_line(row.clone());
    }
}
