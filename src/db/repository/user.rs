use std::str::FromStr;

use rusqlite::{params, Connection};

use super::parse_uuid;
use crate::db::DatabaseError;
use crate::models::enums::UserType;
use crate::models::*;

pub fn insert_user(conn: &Connection, user: &User) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO users (id, full_name, email, user_type, is_verified)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            user.id.to_string(),
            user.full_name,
            user.email,
            user.user_type.as_str(),
            user.is_verified as i32,
        ],
    )?;
    Ok(())
}

pub fn get_all_users(conn: &Connection) -> Result<Vec<User>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, full_name, email, user_type, is_verified FROM users ORDER BY email",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, Option<String>>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, i32>(4)?,
        ))
    })?;

    let mut users = Vec::new();
    for row in rows {
        let (id, full_name, email, user_type, is_verified) = row?;
        users.push(User {
            id: parse_uuid(&id)?,
            full_name,
            email,
            user_type: UserType::from_str(&user_type)?,
            is_verified: is_verified != 0,
        });
    }
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use uuid::Uuid;

    #[test]
    fn insert_and_list_users() {
        let conn = open_memory_database().unwrap();
        insert_user(
            &conn,
            &User {
                id: Uuid::new_v4(),
                full_name: Some("Dr. Iyer".into()),
                email: "iyer@example.org".into(),
                user_type: UserType::Doctor,
                is_verified: true,
            },
        )
        .unwrap();

        let users = get_all_users(&conn).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].user_type, UserType::Doctor);
        assert!(users[0].is_verified);
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let conn = open_memory_database().unwrap();
        let user = User {
            id: Uuid::new_v4(),
            full_name: None,
            email: "dup@example.org".into(),
            user_type: UserType::Citizen,
            is_verified: false,
        };
        insert_user(&conn, &user).unwrap();
        let again = User { id: Uuid::new_v4(), ..user };
        assert!(insert_user(&conn, &again).is_err());
    }
}
