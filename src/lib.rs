//! Club roster management backed by a remote spreadsheet.
//!
//! The backing store is a Google spreadsheet reached over the Sheets API v4:
//! records map 1:1 to rows, fields to columns by position. The layers are a
//! thin HTTP adapter ([`sheets`]), a repository abstraction ([`repo`]) and the
//! CLI surface ([`cli`] / [`commands`]).

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod repo;
pub mod sheets;
