// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client CRUD operations.
//!
//! Phone numbers are unique; [`find_or_create_client`] is the race-tolerant
//! entry point used by device intake and webhook ingestion.

use fixdesk_core::FixdeskError;
use rusqlite::params;

use crate::database::{Database, now_timestamp};
use crate::models::Client;

fn client_from_row(row: &rusqlite::Row<'_>) -> Result<Client, rusqlite::Error> {
    Ok(Client {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        created_at: row.get(3)?,
    })
}

/// Find a client by phone number.
pub async fn find_client_by_phone(
    db: &Database,
    phone: &str,
) -> Result<Option<Client>, FixdeskError> {
    let phone = phone.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, phone, created_at FROM clients WHERE phone = ?1",
            )?;
            match stmt.query_row(params![phone], client_from_row) {
                Ok(client) => Ok(Some(client)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a client by id.
pub async fn get_client(db: &Database, id: &str) -> Result<Option<Client>, FixdeskError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, phone, created_at FROM clients WHERE id = ?1")?;
            match stmt.query_row(params![id], client_from_row) {
                Ok(client) => Ok(Some(client)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Create a new client.
pub async fn create_client(
    db: &Database,
    name: &str,
    phone: &str,
) -> Result<Client, FixdeskError> {
    let client = Client {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        created_at: now_timestamp(),
    };
    let row = client.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO clients (id, name, phone, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![row.id, row.name, row.phone, row.created_at],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    Ok(client)
}

/// Find the client owning `phone`, creating one with `name` if absent.
///
/// Idempotent on phone: a second call returns the existing row untouched,
/// whatever name it is given. Insert-or-ignore plus select runs in a single
/// writer-thread closure, so concurrent callers cannot double-create.
pub async fn find_or_create_client(
    db: &Database,
    name: &str,
    phone: &str,
) -> Result<Client, FixdeskError> {
    let id = uuid::Uuid::new_v4().to_string();
    let name = name.to_string();
    let phone = phone.to_string();
    let created_at = now_timestamp();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT OR IGNORE INTO clients (id, name, phone, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![id, name, phone, created_at],
            )?;
            let mut stmt = conn.prepare(
                "SELECT id, name, phone, created_at FROM clients WHERE phone = ?1",
            )?;
            stmt.query_row(params![phone], client_from_row)
                .map_err(Into::into)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
