//! Member commands

use super::print_table;
use crate::cli::MemberCommand;
use crate::error::Error;
use crate::model::{Member, SheetRecord};
use crate::repo::RosterStore;
use anyhow::Context;

pub async fn run(store: &impl RosterStore<Member>, command: MemberCommand) -> anyhow::Result<()> {
    match command {
        MemberCommand::List { group, json } => list(store, group.as_deref(), json).await,
        MemberCommand::Show { id } => show(store, &id).await,
        MemberCommand::Add {
            name,
            age,
            belt,
            group,
            phone,
            email,
            join_date,
        } => {
            let member = Member {
                id: String::new(),
                name,
                age,
                belt,
                group,
                phone,
                email,
                join_date: join_date.unwrap_or_else(today),
            };
            add(store, member).await
        }
        MemberCommand::Update {
            id,
            name,
            age,
            belt,
            group,
            phone,
            email,
            join_date,
        } => {
            let mut member = fetch(store, &id).await?;
            if let Some(v) = name {
                member.name = v;
            }
            if let Some(v) = age {
                member.age = v;
            }
            if let Some(v) = belt {
                member.belt = v;
            }
            if let Some(v) = group {
                member.group = v;
            }
            if let Some(v) = phone {
                member.phone = v;
            }
            if let Some(v) = email {
                member.email = v;
            }
            if let Some(v) = join_date {
                member.join_date = v;
            }
            store.update(member).await.context("failed to update member")?;
            println!("Updated member {}", id);
            Ok(())
        }
        MemberCommand::Remove { id } => {
            store.delete(&id).await.context("failed to remove member")?;
            println!("Removed member {}", id);
            Ok(())
        }
    }
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

async fn fetch(store: &impl RosterStore<Member>, id: &str) -> anyhow::Result<Member> {
    store
        .get(id)
        .await
        .context("failed to load member")?
        .ok_or_else(|| {
            Error::NotFound {
                what: Member::KIND,
                id: id.to_string(),
            }
            .into()
        })
}

async fn list(
    store: &impl RosterStore<Member>,
    group: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let mut members = store.list().await.context("failed to load members")?;
    if let Some(group) = group {
        members.retain(|m| m.group.eq_ignore_ascii_case(group));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&members)?);
        return Ok(());
    }
    if members.is_empty() {
        println!("No members found.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = members
        .iter()
        .map(|m| {
            vec![
                m.id.clone(),
                m.name.clone(),
                m.age.to_string(),
                m.belt.clone(),
                m.group.clone(),
                m.phone.clone(),
                m.email.clone(),
                m.join_date.clone(),
            ]
        })
        .collect();
    print_table(
        &["ID", "Name", "Age", "Belt", "Group", "Phone", "Email", "Joined"],
        &rows,
    );
    println!("{} member(s)", members.len());
    Ok(())
}

async fn show(store: &impl RosterStore<Member>, id: &str) -> anyhow::Result<()> {
    let member = fetch(store, id).await?;
    println!("ID:        {}", member.id);
    println!("Name:      {}", member.name);
    println!("Age:       {}", member.age);
    println!("Belt:      {}", member.belt);
    println!("Group:     {}", member.group);
    println!("Phone:     {}", member.phone);
    println!("Email:     {}", member.email);
    println!("Joined:    {}", member.join_date);
    Ok(())
}

async fn add(store: &impl RosterStore<Member>, member: Member) -> anyhow::Result<()> {
    let added = store.add(member).await.context("failed to add member")?;
    println!("Added member {} ({})", added.name, added.id);
    Ok(())
}
