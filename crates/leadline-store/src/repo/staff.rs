use crate::error::{is_unique_violation, Result, StoreError};
use leadline_core::domain::{normalize_phone, Staff, StaffId, StaffRole};
use rusqlite::{params, Connection};

#[derive(Debug, Clone)]
pub struct StaffNew {
    pub username: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: StaffRole,
}

/// The staff registry doubles as the auth seam: credential checks live
/// outside the store, so `authenticate` only resolves an active identity.
pub struct StaffRepo<'a> {
    conn: &'a Connection,
}

impl<'a> StaffRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, now_utc: i64, input: StaffNew) -> Result<Staff> {
        let username = input.username.trim().to_ascii_lowercase();
        if username.is_empty() {
            return Err(StoreError::InvalidId(input.username));
        }
        let phone = match input.phone.as_deref() {
            Some(raw) => Some(normalize_phone(raw).map_err(StoreError::Core)?),
            None => None,
        };

        let inserted = self.conn.execute(
            "INSERT INTO staff (username, full_name, phone, role, is_active, created_at)
             VALUES (?1, ?2, ?3, ?4, 1, ?5);",
            params![
                username,
                input.full_name,
                phone,
                input.role.as_str(),
                now_utc
            ],
        );
        if let Err(err) = inserted {
            if is_unique_violation(&err) {
                return Err(StoreError::Conflict(format!(
                    "staff username already taken: {}",
                    username
                )));
            }
            return Err(err.into());
        }

        let id = StaffId(self.conn.last_insert_rowid());
        Ok(Staff {
            id,
            username,
            full_name: input.full_name,
            phone,
            role: input.role,
            is_active: true,
            created_at: now_utc,
        })
    }

    pub fn get(&self, id: StaffId) -> Result<Option<Staff>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, username, full_name, phone, role, is_active, created_at
             FROM staff WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([id.as_i64()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(staff_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn find_by_username(&self, username: &str) -> Result<Option<Staff>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, username, full_name, phone, role, is_active, created_at
             FROM staff WHERE username = ?1;",
        )?;
        let mut rows = stmt.query([username.trim().to_ascii_lowercase()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(staff_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    /// Resolves the acting staff identity for ledger writes. Unknown and
    /// deactivated accounts are both rejected.
    pub fn authenticate(&self, username: &str) -> Result<Staff> {
        let staff = self
            .find_by_username(username)?
            .ok_or_else(|| StoreError::Unauthorized(format!("unknown staff: {}", username)))?;
        if !staff.is_active {
            return Err(StoreError::Unauthorized(format!(
                "staff account deactivated: {}",
                username
            )));
        }
        Ok(staff)
    }

    pub fn list(&self) -> Result<Vec<Staff>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, username, full_name, phone, role, is_active, created_at
             FROM staff
             ORDER BY username ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut staff = Vec::new();
        while let Some(row) = rows.next()? {
            staff.push(staff_from_row(row)?);
        }
        Ok(staff)
    }

    pub fn deactivate(&self, id: StaffId) -> Result<Staff> {
        let updated = self.conn.execute(
            "UPDATE staff SET is_active = 0 WHERE id = ?1;",
            [id.as_i64()],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.get(id)?.ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

fn staff_from_row(row: &rusqlite::Row<'_>) -> Result<Staff> {
    let role_raw: String = row.get(4)?;
    let role =
        StaffRole::parse(&role_raw).ok_or_else(|| StoreError::InvalidId(role_raw.clone()))?;
    Ok(Staff {
        id: StaffId(row.get(0)?),
        username: row.get(1)?,
        full_name: row.get(2)?,
        phone: row.get(3)?,
        role,
        is_active: row.get::<_, i64>(5)? != 0,
        created_at: row.get(6)?,
    })
}
