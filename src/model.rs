//! Roster records and their positional column mapping

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One club participant, stored as a row on the members sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub belt: String,
    pub group: String,
    pub phone: String,
    pub email: String,
    pub join_date: String,
}

/// One training cohort, stored as a row on the groups sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub coach: String,
    pub level: String,
    pub schedule: String,
    pub max_capacity: u32,
    pub current_members: u32,
}

/// A record that lives as one spreadsheet row, fields addressed by column
/// position. Column A always holds the identifier.
pub trait SheetRecord: Clone {
    /// Header row as it appears on the sheet.
    const HEADERS: &'static [&'static str];
    /// Last column letter of the record's range.
    const LAST_COLUMN: char;
    /// Noun used in log and error messages.
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);

    /// Build a record from a sheet row. Missing cells default to empty,
    /// non-numeric cells in numeric columns to 0.
    fn from_row(row: &[String]) -> Self;

    /// Serialize back to a full row, one cell per column.
    fn to_row(&self) -> Vec<String>;
}

/// Fresh identifier for records added without one.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn cell(row: &[String], idx: usize) -> String {
    row.get(idx).cloned().unwrap_or_default()
}

fn cell_u32(row: &[String], idx: usize) -> u32 {
    row.get(idx).and_then(|s| s.parse().ok()).unwrap_or(0)
}

impl SheetRecord for Member {
    const HEADERS: &'static [&'static str] = &[
        "ID", "Name", "Age", "Belt", "Group", "Phone", "Email", "JoinDate",
    ];
    const LAST_COLUMN: char = 'H';
    const KIND: &'static str = "member";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn from_row(row: &[String]) -> Self {
        Self {
            id: cell(row, 0),
            name: cell(row, 1),
            age: cell_u32(row, 2),
            belt: cell(row, 3),
            group: cell(row, 4),
            phone: cell(row, 5),
            email: cell(row, 6),
            join_date: cell(row, 7),
        }
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.age.to_string(),
            self.belt.clone(),
            self.group.clone(),
            self.phone.clone(),
            self.email.clone(),
            self.join_date.clone(),
        ]
    }
}

impl SheetRecord for Group {
    const HEADERS: &'static [&'static str] = &[
        "ID", "Name", "Coach", "Level", "Schedule", "MaxCapacity", "CurrentMembers",
    ];
    const LAST_COLUMN: char = 'G';
    const KIND: &'static str = "group";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn from_row(row: &[String]) -> Self {
        Self {
            id: cell(row, 0),
            name: cell(row, 1),
            coach: cell(row, 2),
            level: cell(row, 3),
            schedule: cell(row, 4),
            max_capacity: cell_u32(row, 5),
            current_members: cell_u32(row, 6),
        }
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.coach.clone(),
            self.level.clone(),
            self.schedule.clone(),
            self.max_capacity.to_string(),
            self.current_members.to_string(),
        ]
    }
}
