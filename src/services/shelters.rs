use sqlx::postgres::PgRow;
use sqlx::Row;
use std::str::FromStr;

use crate::models::{FeatureTag, ServiceTag, Shelter};
use crate::services::postgres::{PostgresClient, StoreError};

/// Decode a TEXT[] column into service tags; unknown values are a data
/// error, not a silent skip.
fn parse_services(raw: Vec<String>) -> Result<Vec<ServiceTag>, StoreError> {
    raw.iter()
        .map(|s| ServiceTag::from_str(s).map_err(StoreError::InvalidInput))
        .collect()
}

fn parse_tags(raw: Vec<String>) -> Result<Vec<FeatureTag>, StoreError> {
    raw.iter()
        .map(|s| FeatureTag::from_str(s).map_err(StoreError::InvalidInput))
        .collect()
}

fn shelter_from_row(row: &PgRow) -> Result<Shelter, StoreError> {
    Ok(Shelter {
        id: row.get("id"),
        name: row.get("name"),
        address: row.get("address"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        capacity: row.get::<i32, _>("capacity") as u32,
        current: row.get::<i32, _>("current") as u32,
        services: parse_services(row.get("services"))?,
        tags: parse_tags(row.get("tags"))?,
        rating: row.get("rating"),
        hours: row.get("hours"),
        phone: row.get("phone"),
    })
}

impl PostgresClient {
    /// Fetch the full shelter collection, id order
    pub async fn list_shelters(&self) -> Result<Vec<Shelter>, StoreError> {
        let query = r#"
            SELECT id, name, address, latitude, longitude, capacity, current,
                   services, tags, rating, hours, phone
            FROM shelters
            ORDER BY id
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let shelters: Result<Vec<Shelter>, StoreError> =
            rows.iter().map(shelter_from_row).collect();

        let shelters = shelters?;
        tracing::debug!("Loaded {} shelters", shelters.len());

        Ok(shelters)
    }

    /// Fetch a single shelter by id
    pub async fn get_shelter(&self, id: i64) -> Result<Shelter, StoreError> {
        let query = r#"
            SELECT id, name, address, latitude, longitude, capacity, current,
                   services, tags, rating, hours, phone
            FROM shelters
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => shelter_from_row(&row),
            None => Err(StoreError::NotFound("Shelter not found".to_string())),
        }
    }

    /// Increment a shelter's occupancy for a check-in.
    ///
    /// The increment is a single conditional UPDATE so two simultaneous
    /// check-ins can never under-count or push a shelter past capacity.
    pub async fn check_in(&self, shelter_id: i64) -> Result<u32, StoreError> {
        let query = r#"
            UPDATE shelters
            SET current = current + 1
            WHERE id = $1 AND current < capacity
            RETURNING current
        "#;

        let row = sqlx::query(query)
            .bind(shelter_id)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(row) = row {
            let current = row.get::<i32, _>("current") as u32;
            tracing::debug!("Check-in at shelter {}: current now {}", shelter_id, current);
            return Ok(current);
        }

        // No row updated: distinguish a missing shelter from a full one.
        let exists = sqlx::query("SELECT 1 FROM shelters WHERE id = $1")
            .bind(shelter_id)
            .fetch_optional(&self.pool)
            .await?;

        if exists.is_some() {
            Err(StoreError::Conflict("Shelter is at capacity".to_string()))
        } else {
            Err(StoreError::NotFound("Shelter not found".to_string()))
        }
    }

    /// Append a check-in entry to the user's history. A missing user is
    /// skipped silently, matching the check-in endpoint's contract where
    /// the userId is optional best-effort metadata.
    pub async fn record_check_in(
        &self,
        user_id: &str,
        shelter_id: i64,
    ) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO check_ins (user_id, shelter_id, date)
            SELECT $1, $2, NOW()
            WHERE EXISTS (SELECT 1 FROM users WHERE id = $1)
        "#;

        sqlx::query(query)
            .bind(user_id)
            .bind(shelter_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
