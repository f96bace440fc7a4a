// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message CRUD operations.
//!
//! Conversation reads return messages with client and (optional) device
//! cross-references populated, newest first. Status updates join on the
//! provider message id; an id with no matching row is an expected outcome.

use fixdesk_core::FixdeskError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{Client, ConversationMessage, Device, Message, MessageStatus};

const CONVERSATION_SELECT: &str = "SELECT m.id, m.client_id, m.device_id, m.content, m.direction, m.status,
            m.wa_message_id, m.created_at,
            c.id, c.name, c.phone, c.created_at,
            d.id, d.name, d.status, d.client_id, d.created_at
     FROM messages m
     JOIN clients c ON c.id = m.client_id
     LEFT JOIN devices d ON d.id = m.device_id";

fn conversation_message_from_row(
    row: &rusqlite::Row<'_>,
) -> Result<ConversationMessage, rusqlite::Error> {
    let device = match row.get::<_, Option<String>>(12)? {
        Some(id) => Some(Device {
            id,
            name: row.get(13)?,
            status: row.get(14)?,
            client_id: row.get(15)?,
            created_at: row.get(16)?,
        }),
        None => None,
    };
    Ok(ConversationMessage {
        message: Message {
            id: row.get(0)?,
            client_id: row.get(1)?,
            device_id: row.get(2)?,
            content: row.get(3)?,
            direction: row.get(4)?,
            status: row.get(5)?,
            wa_message_id: row.get(6)?,
            created_at: row.get(7)?,
        },
        client: Client {
            id: row.get(8)?,
            name: row.get(9)?,
            phone: row.get(10)?,
            created_at: row.get(11)?,
        },
        device,
    })
}

/// Insert a new message row.
pub async fn insert_message(db: &Database, msg: &Message) -> Result<(), FixdeskError> {
    let msg = msg.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO messages (id, client_id, device_id, content, direction, status,
                                       wa_message_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    msg.id,
                    msg.client_id,
                    msg.device_id,
                    msg.content,
                    msg.direction,
                    msg.status,
                    msg.wa_message_id,
                    msg.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Up to `limit` most-recent messages for a client, newest first.
pub async fn find_messages_by_client(
    db: &Database,
    client_id: &str,
    limit: i64,
) -> Result<Vec<ConversationMessage>, FixdeskError> {
    let client_id = client_id.to_string();
    db.connection()
        .call(move |conn| {
            let sql = format!(
                "{CONVERSATION_SELECT}
                 WHERE m.client_id = ?1
                 ORDER BY m.created_at DESC, m.rowid DESC
                 LIMIT ?2"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![client_id, limit], conversation_message_from_row)?;
            let mut messages = Vec::new();
            for row in rows {
                messages.push(row?);
            }
            Ok(messages)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Up to `limit` most-recent messages tied to a device, newest first.
pub async fn find_messages_by_device(
    db: &Database,
    device_id: &str,
    limit: i64,
) -> Result<Vec<ConversationMessage>, FixdeskError> {
    let device_id = device_id.to_string();
    db.connection()
        .call(move |conn| {
            let sql = format!(
                "{CONVERSATION_SELECT}
                 WHERE m.device_id = ?1
                 ORDER BY m.created_at DESC, m.rowid DESC
                 LIMIT ?2"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![device_id, limit], conversation_message_from_row)?;
            let mut messages = Vec::new();
            for row in rows {
                messages.push(row?);
            }
            Ok(messages)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Update a message's delivery status by provider message id.
///
/// Returns false when no row carries that id -- outbound messages sent
/// outside this system, or timing races. Callers treat that as a no-op.
pub async fn update_message_status(
    db: &Database,
    wa_message_id: &str,
    status: MessageStatus,
) -> Result<bool, FixdeskError> {
    let wa_message_id = wa_message_id.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE messages SET status = ?1 WHERE wa_message_id = ?2",
                params![status.to_string(), wa_message_id],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// One most-recent message per distinct client, newest first -- the
/// dashboard's conversation-list summary.
pub async fn find_all_conversations(
    db: &Database,
) -> Result<Vec<ConversationMessage>, FixdeskError> {
    db.connection()
        .call(|conn| {
            let sql = format!(
                "WITH ranked AS (
                     SELECT rowid AS rid,
                            ROW_NUMBER() OVER (
                                PARTITION BY client_id
                                ORDER BY created_at DESC, rowid DESC
                            ) AS rn
                     FROM messages
                 )
                 {CONVERSATION_SELECT}
                 JOIN ranked ON ranked.rid = m.rowid
                 WHERE ranked.rn = 1
                 ORDER BY m.created_at DESC, m.rowid DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], conversation_message_from_row)?;
            let mut messages = Vec::new();
            for row in rows {
                messages.push(row?);
            }
            Ok(messages)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
