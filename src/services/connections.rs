use sqlx::postgres::PgRow;
use sqlx::Row;
use uuid::Uuid;

use crate::core::connections::{
    apply_decision, direction_for, normalize_message, validate_new_request, Decision,
};
use crate::models::{ConnectionRecord, ConnectionStatus, DirectionalConnection};
use crate::services::postgres::{PostgresClient, StoreError};

fn connection_from_row(row: &PgRow) -> ConnectionRecord {
    ConnectionRecord {
        id: row.get("id"),
        from_user_id: row.get("from_user_id"),
        to_user_id: row.get("to_user_id"),
        message: row.get("message"),
        status: row.get("status"),
        created_at: row.get("created_at"),
        responded_at: row.get("responded_at"),
    }
}

impl PostgresClient {
    /// Create a pending connection request.
    ///
    /// Gated by the state machine: self-requests and duplicate
    /// pending/accepted pairs are rejected; a prior rejection does not
    /// block a retry. The duplicate probe and insert are two statements,
    /// matching the source's check-then-insert behavior.
    pub async fn create_connection(
        &self,
        from_user_id: &str,
        to_user_id: &str,
        message: &str,
    ) -> Result<ConnectionRecord, StoreError> {
        // Self-requests fail before any store lookup.
        validate_new_request(from_user_id, to_user_id, None)?;

        if !self.user_exists(from_user_id).await? || !self.user_exists(to_user_id).await? {
            return Err(StoreError::NotFound("User not found".to_string()));
        }

        let active: Option<ConnectionStatus> = sqlx::query(
            r#"
            SELECT status
            FROM connections
            WHERE from_user_id = $1 AND to_user_id = $2
              AND status IN ('pending', 'accepted')
            LIMIT 1
            "#,
        )
        .bind(from_user_id)
        .bind(to_user_id)
        .fetch_optional(&self.pool)
        .await?
        .map(|row| row.get("status"));

        validate_new_request(from_user_id, to_user_id, active)?;

        let record = ConnectionRecord {
            id: Uuid::new_v4(),
            from_user_id: from_user_id.to_string(),
            to_user_id: to_user_id.to_string(),
            message: normalize_message(message),
            status: ConnectionStatus::Pending,
            created_at: chrono::Utc::now(),
            responded_at: None,
        };

        sqlx::query(
            r#"
            INSERT INTO connections (id, from_user_id, to_user_id, message, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id)
        .bind(&record.from_user_id)
        .bind(&record.to_user_id)
        .bind(&record.message)
        .bind(record.status)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(
            "Connection request {} created: {} -> {}",
            record.id,
            from_user_id,
            to_user_id
        );

        Ok(record)
    }

    /// Resolve a pending request. The decision string is validated
    /// before any lookup; transitions happen exactly once.
    pub async fn respond_connection(
        &self,
        id: Uuid,
        decision: &str,
    ) -> Result<ConnectionRecord, StoreError> {
        let decision = Decision::parse(decision)?;

        let row = sqlx::query("SELECT * FROM connections WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound("Connection request not found".to_string()))?;

        let record = connection_from_row(&row);
        let new_status = apply_decision(record.status, decision)?;
        let responded_at = chrono::Utc::now();

        sqlx::query("UPDATE connections SET status = $2, responded_at = $3 WHERE id = $1")
            .bind(id)
            .bind(new_status)
            .bind(responded_at)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Connection request {} resolved: {}", id, new_status);

        Ok(ConnectionRecord {
            status: new_status,
            responded_at: Some(responded_at),
            ..record
        })
    }

    /// Every request where the user is sender or receiver, tagged with
    /// direction, newest first
    pub async fn list_connections(
        &self,
        user_id: &str,
    ) -> Result<Vec<DirectionalConnection>, StoreError> {
        let query = r#"
            SELECT id, from_user_id, to_user_id, message, status, created_at, responded_at
            FROM connections
            WHERE from_user_id = $1 OR to_user_id = $1
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| {
                let record = connection_from_row(row);
                let direction = direction_for(user_id, &record.from_user_id);
                DirectionalConnection { record, direction }
            })
            .collect())
    }
}
