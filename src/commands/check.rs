//! Connectivity check against the configured spreadsheet

use crate::config::Config;
use crate::model::{new_id, Member, SheetRecord};
use crate::repo::{RosterStore, SheetStore};
use crate::sheets::data_range;
use anyhow::Context;
use std::sync::Arc;
use tracing::info;

/// Probe read access, and with `write` also append and blank a probe row on
/// the members sheet.
pub async fn run(config: &Config, write: bool) -> anyhow::Result<()> {
    if !config.has_credentials() {
        anyhow::bail!(
            "no credentials configured; set api_key or service_account_key in {}",
            Config::path(&crate::config::data_dir()).display()
        );
    }

    let client = Arc::new(super::sheets_client(config)?);

    println!(
        "Checking read access to '{}' on spreadsheet {}...",
        config.members_sheet,
        client.spreadsheet_id()
    );
    let range = data_range(&config.members_sheet, Member::LAST_COLUMN);
    let set = client
        .get_values(&range)
        .await
        .context("read check failed")?;
    info!(rows = set.values.len(), range = %set.range, "Read check passed");
    println!("  ok: {} row(s) in {}", set.values.len(), set.range);
    match set.values.first() {
        Some(header) => println!("  header row: {}", header.join(" | ")),
        None => println!("  sheet is empty (no header row yet)"),
    }

    if write {
        let store: SheetStore<Member> =
            SheetStore::new(client.clone(), config.members_sheet.clone());
        let probe_id = format!("probe-{}", new_id());
        let probe = Member {
            id: probe_id.clone(),
            name: "Connectivity probe".to_string(),
            age: 0,
            belt: String::new(),
            group: String::new(),
            phone: String::new(),
            email: String::new(),
            join_date: String::new(),
        };

        println!("Checking write access (probe row {})...", probe_id);
        store.add(probe).await.context("append check failed")?;
        println!("  ok: probe row appended");

        store
            .delete(&probe_id)
            .await
            .context("cleanup of the probe row failed")?;
        println!("  ok: probe row blanked");
    }

    println!("Spreadsheet looks reachable.");
    Ok(())
}
