// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Device CRUD operations.
//!
//! Devices are always returned with their owning client resolved, since
//! both the dashboard and the notification composer need the relation.

use fixdesk_core::FixdeskError;
use rusqlite::params;

use crate::database::{Database, now_timestamp};
use crate::models::{Client, DeviceStatus, DeviceWithClient};

const DEVICE_WITH_CLIENT_SELECT: &str = "SELECT d.id, d.name, d.status, d.client_id, d.created_at,
            c.id, c.name, c.phone, c.created_at
     FROM devices d
     JOIN clients c ON c.id = d.client_id";

fn device_with_client_from_row(
    row: &rusqlite::Row<'_>,
) -> Result<DeviceWithClient, rusqlite::Error> {
    Ok(DeviceWithClient {
        id: row.get(0)?,
        name: row.get(1)?,
        status: row.get(2)?,
        client_id: row.get(3)?,
        created_at: row.get(4)?,
        client: Client {
            id: row.get(5)?,
            name: row.get(6)?,
            phone: row.get(7)?,
            created_at: row.get(8)?,
        },
    })
}

/// List all devices with their clients, newest first.
pub async fn list_devices(db: &Database) -> Result<Vec<DeviceWithClient>, FixdeskError> {
    db.connection()
        .call(|conn| {
            let sql = format!("{DEVICE_WITH_CLIENT_SELECT} ORDER BY d.created_at DESC, d.rowid DESC");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], device_with_client_from_row)?;
            let mut devices = Vec::new();
            for row in rows {
                devices.push(row?);
            }
            Ok(devices)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a device by id with its client.
pub async fn get_device(
    db: &Database,
    id: &str,
) -> Result<Option<DeviceWithClient>, FixdeskError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let sql = format!("{DEVICE_WITH_CLIENT_SELECT} WHERE d.id = ?1");
            let mut stmt = conn.prepare(&sql)?;
            match stmt.query_row(params![id], device_with_client_from_row) {
                Ok(device) => Ok(Some(device)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Create a device for an existing client. New devices start in RECEIVED.
pub async fn create_device(
    db: &Database,
    name: &str,
    client_id: &str,
) -> Result<DeviceWithClient, FixdeskError> {
    let id = uuid::Uuid::new_v4().to_string();
    let name = name.to_string();
    let client_id = client_id.to_string();
    let created_at = now_timestamp();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO devices (id, name, status, client_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    id,
                    name,
                    DeviceStatus::Received.to_string(),
                    client_id,
                    created_at
                ],
            )?;
            let sql = format!("{DEVICE_WITH_CLIENT_SELECT} WHERE d.id = ?1");
            let mut stmt = conn.prepare(&sql)?;
            stmt.query_row(params![id], device_with_client_from_row)
                .map_err(Into::into)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Update a device's lifecycle status.
///
/// Returns the updated device with its client, or `None` when no device
/// matches `id` -- absence is a normal branch, not an error.
pub async fn update_device_status(
    db: &Database,
    id: &str,
    status: DeviceStatus,
) -> Result<Option<DeviceWithClient>, FixdeskError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE devices SET status = ?1 WHERE id = ?2",
                params![status.to_string(), id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            let sql = format!("{DEVICE_WITH_CLIENT_SELECT} WHERE d.id = ?1");
            let mut stmt = conn.prepare(&sql)?;
            stmt.query_row(params![id], device_with_client_from_row)
                .map(Some)
                .map_err(Into::into)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::clients::create_client;
    use tempfile::tempdir;

    async fn setup_db_with_client() -> (Database, Client, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        let client = create_client(&db, "Jane", "201234567890").await.unwrap();
        (db, client, dir)
    }

    #[tokio::test]
    async fn create_device_starts_received_with_client_resolved() {
        let (db, client, _dir) = setup_db_with_client().await;

        let device = create_device(&db, "iPhone 12", &client.id).await.unwrap();
        assert_eq!(device.name, "iPhone 12");
        assert_eq!(device.status, "RECEIVED");
        assert_eq!(device.client_id, client.id);
        assert_eq!(device.client, client);
    }

    #[tokio::test]
    async fn list_devices_returns_all_with_clients() {
        let (db, client, _dir) = setup_db_with_client().await;

        create_device(&db, "iPhone 12", &client.id).await.unwrap();
        create_device(&db, "ThinkPad X1", &client.id).await.unwrap();

        let devices = list_devices(&db).await.unwrap();
        assert_eq!(devices.len(), 2);
        assert!(devices.iter().all(|d| d.client.id == client.id));
    }

    #[tokio::test]
    async fn update_status_persists_each_allowed_value() {
        let (db, client, _dir) = setup_db_with_client().await;
        let device = create_device(&db, "iPhone 12", &client.id).await.unwrap();

        for status in [
            DeviceStatus::Working,
            DeviceStatus::Done,
            DeviceStatus::Delivered,
            DeviceStatus::Received,
        ] {
            let updated = update_device_status(&db, &device.id, status)
                .await
                .unwrap()
                .expect("device exists");
            assert_eq!(updated.status, status.to_string());
        }
    }

    #[tokio::test]
    async fn update_status_for_unknown_device_returns_none() {
        let (db, _client, _dir) = setup_db_with_client().await;
        let result = update_device_status(&db, "no-such-device", DeviceStatus::Done)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn get_device_returns_none_for_unknown_id() {
        let (db, _client, _dir) = setup_db_with_client().await;
        assert!(get_device(&db, "missing").await.unwrap().is_none());
    }
}
