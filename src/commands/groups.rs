//! Group commands

use super::print_table;
use crate::cli::GroupCommand;
use crate::error::Error;
use crate::model::{Group, SheetRecord};
use crate::repo::RosterStore;
use anyhow::Context;

pub async fn run(store: &impl RosterStore<Group>, command: GroupCommand) -> anyhow::Result<()> {
    match command {
        GroupCommand::List { json } => list(store, json).await,
        GroupCommand::Show { id } => show(store, &id).await,
        GroupCommand::Add {
            name,
            coach,
            level,
            schedule,
            max_capacity,
            members,
        } => {
            let group = Group {
                id: String::new(),
                name,
                coach,
                level,
                schedule,
                max_capacity,
                current_members: members,
            };
            let added = store.add(group).await.context("failed to add group")?;
            println!("Added group {} ({})", added.name, added.id);
            Ok(())
        }
        GroupCommand::Update {
            id,
            name,
            coach,
            level,
            schedule,
            max_capacity,
            members,
        } => {
            let mut group = fetch(store, &id).await?;
            if let Some(v) = name {
                group.name = v;
            }
            if let Some(v) = coach {
                group.coach = v;
            }
            if let Some(v) = level {
                group.level = v;
            }
            if let Some(v) = schedule {
                group.schedule = v;
            }
            if let Some(v) = max_capacity {
                group.max_capacity = v;
            }
            if let Some(v) = members {
                group.current_members = v;
            }
            store.update(group).await.context("failed to update group")?;
            println!("Updated group {}", id);
            Ok(())
        }
        GroupCommand::Remove { id } => {
            store.delete(&id).await.context("failed to remove group")?;
            println!("Removed group {}", id);
            Ok(())
        }
    }
}

async fn fetch(store: &impl RosterStore<Group>, id: &str) -> anyhow::Result<Group> {
    store
        .get(id)
        .await
        .context("failed to load group")?
        .ok_or_else(|| {
            Error::NotFound {
                what: Group::KIND,
                id: id.to_string(),
            }
            .into()
        })
}

async fn list(store: &impl RosterStore<Group>, json: bool) -> anyhow::Result<()> {
    let groups = store.list().await.context("failed to load groups")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }
    if groups.is_empty() {
        println!("No groups found.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = groups
        .iter()
        .map(|g| {
            vec![
                g.id.clone(),
                g.name.clone(),
                g.coach.clone(),
                g.level.clone(),
                g.schedule.clone(),
                g.max_capacity.to_string(),
                g.current_members.to_string(),
            ]
        })
        .collect();
    print_table(
        &["ID", "Name", "Coach", "Level", "Schedule", "Capacity", "Members"],
        &rows,
    );
    println!("{} group(s)", groups.len());
    Ok(())
}

async fn show(store: &impl RosterStore<Group>, id: &str) -> anyhow::Result<()> {
    let group = fetch(store, id).await?;
    println!("ID:        {}", group.id);
    println!("Name:      {}", group.name);
    println!("Coach:     {}", group.coach);
    println!("Level:     {}", group.level);
    println!("Schedule:  {}", group.schedule);
    println!("Capacity:  {}", group.max_capacity);
    println!("Members:   {}", group.current_members);
    Ok(())
}
