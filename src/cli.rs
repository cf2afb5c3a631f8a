//! Command-line interface definitions

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "dojo-roster",
    version,
    about = "Club roster manager backed by a Google spreadsheet"
)]
pub struct Cli {
    /// Log debug detail to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage club members
    Members {
        #[command(subcommand)]
        command: MemberCommand,
    },
    /// Manage training groups
    Groups {
        #[command(subcommand)]
        command: GroupCommand,
    },
    /// Test connectivity against the configured spreadsheet
    Check {
        /// Also test write access by appending and blanking a probe row
        #[arg(long)]
        write: bool,
    },
    /// Show or initialize the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum MemberCommand {
    /// List members
    List {
        /// Only members of this group
        #[arg(long)]
        group: Option<String>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one member
    Show { id: String },

    /// Add a member
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        age: u32,

        #[arg(long)]
        belt: String,

        #[arg(long)]
        group: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        email: String,

        /// Join date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        join_date: Option<String>,
    },

    /// Update fields of a member; omitted flags keep current values
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        age: Option<u32>,

        #[arg(long)]
        belt: Option<String>,

        #[arg(long)]
        group: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        join_date: Option<String>,
    },

    /// Remove a member (the row is blanked; the store has no row removal)
    Remove { id: String },
}

#[derive(Subcommand)]
pub enum GroupCommand {
    /// List groups
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one group
    Show { id: String },

    /// Add a group
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        coach: String,

        #[arg(long)]
        level: String,

        /// Free-text schedule, e.g. "Tue/Thu 17:30"
        #[arg(long)]
        schedule: String,

        #[arg(long, default_value_t = 0)]
        max_capacity: u32,

        /// Current member count
        #[arg(long, default_value_t = 0)]
        members: u32,
    },

    /// Update fields of a group; omitted flags keep current values
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        coach: Option<String>,

        #[arg(long)]
        level: Option<String>,

        #[arg(long)]
        schedule: Option<String>,

        #[arg(long)]
        max_capacity: Option<u32>,

        /// Current member count
        #[arg(long)]
        members: Option<u32>,
    },

    /// Remove a group (the row is blanked; the store has no row removal)
    Remove { id: String },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the resolved configuration
    Show,
    /// Write a starter config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn member_add_parses_with_defaults() {
        let cli = Cli::parse_from([
            "dojo-roster",
            "members",
            "add",
            "--name",
            "Alice Turner",
            "--age",
            "15",
            "--belt",
            "Green",
            "--group",
            "Juniors",
        ]);
        match cli.command {
            Command::Members {
                command:
                    MemberCommand::Add {
                        name,
                        age,
                        phone,
                        join_date,
                        ..
                    },
            } => {
                assert_eq!(name, "Alice Turner");
                assert_eq!(age, 15);
                assert_eq!(phone, "");
                assert!(join_date.is_none());
            }
            _ => panic!("parsed into the wrong command"),
        }
    }

    #[test]
    fn group_update_leaves_omitted_fields_unset() {
        let cli = Cli::parse_from(["dojo-roster", "groups", "update", "g1", "--coach", "S. Koch"]);
        match cli.command {
            Command::Groups {
                command: GroupCommand::Update { id, coach, name, .. },
            } => {
                assert_eq!(id, "g1");
                assert_eq!(coach.as_deref(), Some("S. Koch"));
                assert!(name.is_none());
            }
            _ => panic!("parsed into the wrong command"),
        }
    }
}
