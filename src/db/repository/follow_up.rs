use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::*;

pub fn insert_follow_up(conn: &Connection, follow_up: &FollowUp) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO follow_ups (id, citizen_name, citizen_contact, health_worker_name,
         remarks, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            follow_up.id.to_string(),
            follow_up.citizen_name,
            follow_up.citizen_contact,
            follow_up.health_worker_name,
            follow_up.remarks,
            follow_up.status,
            follow_up.created_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Raw status text of every follow-up, `None` where unset.
pub fn get_follow_up_statuses(conn: &Connection) -> Result<Vec<Option<String>>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT status FROM follow_ups")?;
    let statuses = stmt
        .query_map([], |row| row.get::<_, Option<String>>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(statuses)
}
