use crate::error::{Result, StoreError};
use leadline_core::domain::{Listing, ListingId, ListingStatus, PropertyType};
use rusqlite::{params, Connection};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct ListingNew {
    pub title: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub location: Option<String>,
    pub size: Option<String>,
    pub property_type: PropertyType,
    pub listing_category: Option<String>,
    pub brochure_url: Option<String>,
}

pub struct ListingsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> ListingsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, now_utc: i64, input: ListingNew) -> Result<Listing> {
        let listing = Listing {
            id: ListingId::new(),
            title: input.title,
            description: input.description,
            price: input.price,
            location: input.location,
            size: input.size,
            property_type: input.property_type,
            listing_category: input
                .listing_category
                .unwrap_or_else(|| "Standard".to_string()),
            status: ListingStatus::Active,
            brochure_url: input.brochure_url,
            created_at: now_utc,
            updated_at: now_utc,
        };

        self.conn.execute(
            "INSERT INTO listings (id, title, description, price, location, size, property_type, listing_category, status, brochure_url, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12);",
            params![
                listing.id.to_string(),
                listing.title,
                listing.description,
                listing.price,
                listing.location,
                listing.size,
                listing.property_type.as_str(),
                listing.listing_category,
                listing.status.as_str(),
                listing.brochure_url,
                listing.created_at,
                listing.updated_at,
            ],
        )?;

        Ok(listing)
    }

    pub fn get(&self, id: ListingId) -> Result<Option<Listing>> {
        get_inner(self.conn, id)
    }

    /// Active catalog, optionally narrowed to one property type.
    pub fn list(&self, property_type: Option<PropertyType>) -> Result<Vec<Listing>> {
        let mut sql = String::from(
            "SELECT id, title, description, price, location, size, property_type, listing_category, status, brochure_url, created_at, updated_at
             FROM listings
             WHERE status = ?1",
        );
        if property_type.is_some() {
            sql.push_str(" AND property_type = ?2");
        }
        sql.push_str(" ORDER BY created_at DESC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut listings = Vec::new();
        let mut rows = match property_type {
            Some(kind) => stmt.query(params![ListingStatus::Active.as_str(), kind.as_str()])?,
            None => stmt.query(params![ListingStatus::Active.as_str()])?,
        };
        while let Some(row) = rows.next()? {
            listings.push(listing_from_row(row)?);
        }
        Ok(listings)
    }

    pub fn set_status(&self, now_utc: i64, id: ListingId, status: ListingStatus) -> Result<Listing> {
        let updated = self.conn.execute(
            "UPDATE listings SET status = ?2, updated_at = ?3 WHERE id = ?1;",
            params![id.to_string(), status.as_str(), now_utc],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        get_inner(self.conn, id)?.ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Removes a listing; interaction snapshots keep their recorded title
    /// and a NULL `listing_id`.
    pub fn delete(&self, id: ListingId) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM listings WHERE id = ?1;", [id.to_string()])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

pub(crate) fn get_inner(conn: &Connection, id: ListingId) -> Result<Option<Listing>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, description, price, location, size, property_type, listing_category, status, brochure_url, created_at, updated_at
         FROM listings WHERE id = ?1;",
    )?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        Ok(Some(listing_from_row(row)?))
    } else {
        Ok(None)
    }
}

fn listing_from_row(row: &rusqlite::Row<'_>) -> Result<Listing> {
    let id_str: String = row.get(0)?;
    let id = ListingId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    let property_type_raw: String = row.get(6)?;
    let property_type = PropertyType::parse(&property_type_raw)
        .ok_or_else(|| StoreError::InvalidId(property_type_raw.clone()))?;
    let status_raw: String = row.get(8)?;
    let status = ListingStatus::parse(&status_raw)
        .ok_or_else(|| StoreError::InvalidId(status_raw.clone()))?;
    Ok(Listing {
        id,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        location: row.get(4)?,
        size: row.get(5)?,
        property_type,
        listing_category: row.get(7)?,
        status,
        brochure_url: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}
