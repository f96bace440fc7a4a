// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Fixdesk repair-shop backend.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a
//! single-writer concurrency model via `tokio-rusqlite`, and typed CRUD
//! operations for clients, devices, and messages.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread: [`Database`] wraps one connection, query modules accept
//! `&Database` and call through `connection().call()`. Do NOT create
//! additional connections for writes.

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

pub use database::{Database, now_timestamp};
pub use models::*;
