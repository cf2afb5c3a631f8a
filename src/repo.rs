//! Repository layer between the command handlers and the spreadsheet adapter.
//!
//! Whole rows are the unit of change: updates rewrite the row in place, and
//! because the backing store has no row removal, deletes blank the row.
//! Concurrent editors can race and clobber each other; that is an accepted
//! limitation of the store.

use crate::error::{Error, Result};
use crate::model::{new_id, Group, Member, SheetRecord};
use crate::sheets::{data_range, row_range, SheetsClient};
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// CRUD over one record type, whatever the backing store.
#[allow(async_fn_in_trait)]
pub trait RosterStore<R: SheetRecord> {
    async fn list(&self) -> Result<Vec<R>>;
    async fn get(&self, id: &str) -> Result<Option<R>>;
    /// Stores the record, generating an id when it has none, and returns it.
    async fn add(&self, record: R) -> Result<R>;
    async fn update(&self, record: R) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Spreadsheet-backed store: every operation is a fetch-all plus a linear
/// scan by identifier.
pub struct SheetStore<R> {
    client: Arc<SheetsClient>,
    sheet: String,
    _record: PhantomData<R>,
}

impl<R: SheetRecord> SheetStore<R> {
    pub fn new(client: Arc<SheetsClient>, sheet: impl Into<String>) -> Self {
        Self {
            client,
            sheet: sheet.into(),
            _record: PhantomData,
        }
    }

    /// All rows of the sheet range, header row included.
    async fn fetch_rows(&self) -> Result<Vec<Vec<String>>> {
        let range = data_range(&self.sheet, R::LAST_COLUMN);
        let set = self.client.get_values(&range).await?;
        Ok(set.values)
    }
}

/// A blanked row marks a deleted record.
fn is_blank(row: &[String]) -> bool {
    row.first().map_or(true, |cell| cell.is_empty())
}

/// 1-based sheet row number of the data row whose id cell matches. `rows`
/// starts with the header row.
fn find_row(rows: &[Vec<String>], id: &str) -> Option<u32> {
    rows.iter()
        .enumerate()
        .skip(1)
        .find(|(_, row)| row.first().map(String::as_str) == Some(id))
        .map(|(i, _)| i as u32 + 1)
}

impl<R: SheetRecord> RosterStore<R> for SheetStore<R> {
    async fn list(&self) -> Result<Vec<R>> {
        let rows = self.fetch_rows().await?;
        let records: Vec<R> = rows
            .iter()
            .skip(1)
            .filter(|row| !is_blank(row))
            .map(|row| R::from_row(row))
            .collect();
        debug!(sheet = %self.sheet, count = records.len(), "Listed records");
        Ok(records)
    }

    async fn get(&self, id: &str) -> Result<Option<R>> {
        let rows = self.fetch_rows().await?;
        Ok(rows
            .iter()
            .skip(1)
            .filter(|row| !is_blank(row))
            .find(|row| row.first().map(String::as_str) == Some(id))
            .map(|row| R::from_row(row)))
    }

    async fn add(&self, record: R) -> Result<R> {
        let mut record = record;
        if record.id().is_empty() {
            record.set_id(new_id());
        }
        let range = data_range(&self.sheet, R::LAST_COLUMN);
        let resp = self.client.append_row(&range, record.to_row()).await?;
        info!(
            sheet = %self.sheet,
            id = record.id(),
            range = %resp.updates.updated_range,
            "Record appended"
        );
        Ok(record)
    }

    async fn update(&self, record: R) -> Result<()> {
        let rows = self.fetch_rows().await?;
        let row_num = find_row(&rows, record.id()).ok_or_else(|| Error::NotFound {
            what: R::KIND,
            id: record.id().to_string(),
        })?;
        let range = row_range(&self.sheet, R::LAST_COLUMN, row_num);
        let resp = self.client.update_row(&range, record.to_row()).await?;
        info!(
            sheet = %self.sheet,
            id = record.id(),
            cells = resp.updated_cells,
            "Record updated"
        );
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let rows = self.fetch_rows().await?;
        let row_num = find_row(&rows, id).ok_or_else(|| Error::NotFound {
            what: R::KIND,
            id: id.to_string(),
        })?;
        let range = row_range(&self.sheet, R::LAST_COLUMN, row_num);
        let blanks = vec![String::new(); R::HEADERS.len()];
        let resp = self.client.update_row(&range, blanks).await?;
        info!(sheet = %self.sheet, id = id, cells = resp.updated_cells, "Record blanked");
        Ok(())
    }
}

/// In-memory store. Stands in for the spreadsheet when no credentials are
/// configured, and backs the tests.
pub struct MemoryStore<R> {
    records: Mutex<Vec<R>>,
}

impl<R: SheetRecord> MemoryStore<R> {
    pub fn new(seed: Vec<R>) -> Self {
        Self {
            records: Mutex::new(seed),
        }
    }
}

impl<R: SheetRecord> RosterStore<R> for MemoryStore<R> {
    async fn list(&self) -> Result<Vec<R>> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn get(&self, id: &str) -> Result<Option<R>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id() == id)
            .cloned())
    }

    async fn add(&self, record: R) -> Result<R> {
        let mut record = record;
        if record.id().is_empty() {
            record.set_id(new_id());
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update(&self, record: R) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        match records.iter().position(|r| r.id() == record.id()) {
            Some(idx) => {
                records[idx] = record;
                Ok(())
            }
            None => Err(Error::NotFound {
                what: R::KIND,
                id: record.id().to_string(),
            }),
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Err(Error::NotFound {
                what: R::KIND,
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

/// Sample roster used when the app runs without credentials.
pub fn sample_members() -> Vec<Member> {
    let member = |id: &str, name: &str, age, belt: &str, group: &str, phone: &str, email: &str, join_date: &str| {
        Member {
            id: id.to_string(),
            name: name.to_string(),
            age,
            belt: belt.to_string(),
            group: group.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            join_date: join_date.to_string(),
        }
    };
    vec![
        member("1", "Alice Turner", 15, "Green", "Juniors", "+1 555 0101", "alice@example.com", "2023-01-15"),
        member("2", "Brian Cole", 14, "Blue", "Juniors", "+1 555 0102", "brian@example.com", "2023-02-20"),
        member("3", "Chris Novak", 22, "Brown", "Adults", "+1 555 0103", "chris@example.com", "2022-05-10"),
        member("4", "Dana Wells", 20, "Black", "Adults", "+1 555 0104", "dana@example.com", "2021-09-05"),
        member("5", "Evan Price", 12, "Yellow", "Kids", "+1 555 0105", "evan@example.com", "2023-06-30"),
    ]
}

/// Sample groups matching [`sample_members`].
pub fn sample_groups() -> Vec<Group> {
    let group = |id: &str, name: &str, coach: &str, level: &str, schedule: &str, max_capacity, current_members| {
        Group {
            id: id.to_string(),
            name: name.to_string(),
            coach: coach.to_string(),
            level: level.to_string(),
            schedule: schedule.to_string(),
            max_capacity,
            current_members,
        }
    };
    vec![
        group("1", "Kids", "M. Ortega", "Beginner", "Mon/Wed 16:00", 12, 1),
        group("2", "Juniors", "S. Koch", "Intermediate", "Tue/Thu 17:30", 15, 2),
        group("3", "Adults", "J. Barnes", "Advanced", "Mon/Thu 19:00", 20, 2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn find_row_skips_the_header_row() {
        let rows = vec![
            row(&["ID", "Name"]),
            row(&["1", "Alice"]),
            row(&["2", "Brian"]),
        ];
        // "ID" in the header row must never match a record id.
        assert_eq!(find_row(&rows, "ID"), None);
        assert_eq!(find_row(&rows, "1"), Some(2));
        assert_eq!(find_row(&rows, "2"), Some(3));
        assert_eq!(find_row(&rows, "9"), None);
    }

    #[test]
    fn blanked_rows_are_detected() {
        assert!(is_blank(&row(&["", "leftover name"])));
        assert!(is_blank(&[]));
        assert!(!is_blank(&row(&["1", "Alice"])));
    }

    #[tokio::test]
    async fn memory_store_generates_ids_on_add() {
        let store = MemoryStore::new(sample_members());
        let mut new_member = sample_members()[0].clone();
        new_member.id.clear();
        let added = store.add(new_member).await.unwrap();
        assert!(!added.id.is_empty());
        assert!(store.get(&added.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn memory_store_update_replaces_the_record() {
        let store = MemoryStore::new(sample_members());
        let mut member = store.get("1").await.unwrap().unwrap();
        member.belt = "Blue".to_string();
        store.update(member).await.unwrap();
        assert_eq!(store.get("1").await.unwrap().unwrap().belt, "Blue");
    }

    #[tokio::test]
    async fn memory_store_update_of_unknown_id_fails() {
        let store = MemoryStore::new(sample_members());
        let mut member = sample_members()[0].clone();
        member.id = "no-such-id".to_string();
        let err = store.update(member).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn memory_store_delete_removes_the_record() {
        let store = MemoryStore::new(sample_groups());
        store.delete("2").await.unwrap();
        assert!(store.get("2").await.unwrap().is_none());
        assert_eq!(store.list().await.unwrap().len(), 2);
        assert!(matches!(
            store.delete("2").await.unwrap_err(),
            Error::NotFound { .. }
        ));
    }
}
