//! Application constants and configuration

pub const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
pub const OAUTH_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Public sample spreadsheet the app points at until configured.
pub const DEFAULT_SPREADSHEET_ID: &str = "1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms";
pub const DEFAULT_MEMBERS_SHEET: &str = "Players";
pub const DEFAULT_GROUPS_SHEET: &str = "Groups";

pub const HTTP_TIMEOUT_SECS: u64 = 30;
