//! Claim request repository for database operations

use sqlx::PgPool;
use tracing::info;

use crate::error::{BackendError, BackendResult};
use crate::models::{NewRequest, Request, RequestStatus};

/// Claim request repository
#[derive(Clone)]
pub struct RequestRepository {
    pool: PgPool,
}

impl RequestRepository {
    /// Create a new request repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// File a new claim request; status starts as PENDING
    pub async fn create(&self, new_request: &NewRequest) -> BackendResult<Request> {
        info!(
            "Creating claim request for item {} by user {}",
            new_request.item_id, new_request.user_id
        );

        let request = sqlx::query_as::<_, Request>(
            r#"
            INSERT INTO requests (description, contact_info, user_id, item_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, description, contact_info, status, created_at, updated_at,
                      user_id, item_id
            "#,
        )
        .bind(&new_request.description)
        .bind(&new_request.contact_info)
        .bind(new_request.user_id)
        .bind(new_request.item_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                if db.constraint().is_some_and(|c| c.contains("item_id")) {
                    BackendError::NotFound {
                        resource: "item",
                        id: new_request.item_id,
                    }
                } else {
                    BackendError::NotFound {
                        resource: "user",
                        id: new_request.user_id,
                    }
                }
            }
            _ => BackendError::Database(e),
        })?;

        Ok(request)
    }

    /// Find a claim request by ID
    pub async fn find_by_id(&self, id: i64) -> BackendResult<Option<Request>> {
        let request = sqlx::query_as::<_, Request>(
            r#"
            SELECT id, description, contact_info, status, created_at, updated_at,
                   user_id, item_id
            FROM requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    /// Find all claim requests with the given status
    pub async fn find_by_status(&self, status: RequestStatus) -> BackendResult<Vec<Request>> {
        let requests = sqlx::query_as::<_, Request>(
            r#"
            SELECT id, description, contact_info, status, created_at, updated_at,
                   user_id, item_id
            FROM requests
            WHERE status = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Find all claim requests filed by the given user
    pub async fn find_by_user_id(&self, user_id: i64) -> BackendResult<Vec<Request>> {
        let requests = sqlx::query_as::<_, Request>(
            r#"
            SELECT id, description, contact_info, status, created_at, updated_at,
                   user_id, item_id
            FROM requests
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Find all claim requests filed against the given item
    pub async fn find_by_item_id(&self, item_id: i64) -> BackendResult<Vec<Request>> {
        let requests = sqlx::query_as::<_, Request>(
            r#"
            SELECT id, description, contact_info, status, created_at, updated_at,
                   user_id, item_id
            FROM requests
            WHERE item_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Find a user's claim requests with the given status
    pub async fn find_by_user_id_and_status(
        &self,
        user_id: i64,
        status: RequestStatus,
    ) -> BackendResult<Vec<Request>> {
        let requests = sqlx::query_as::<_, Request>(
            r#"
            SELECT id, description, contact_info, status, created_at, updated_at,
                   user_id, item_id
            FROM requests
            WHERE user_id = $1 AND status = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Move a claim request to a new status, refreshing updated_at
    pub async fn update_status(
        &self,
        id: i64,
        status: RequestStatus,
    ) -> BackendResult<Request> {
        info!("Updating request {} to status {}", id, status);

        let request = sqlx::query_as::<_, Request>(
            r#"
            UPDATE requests
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, description, contact_info, status, created_at, updated_at,
                      user_id, item_id
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        request.ok_or(BackendError::NotFound {
            resource: "request",
            id,
        })
    }

    /// Delete a claim request
    pub async fn delete(&self, id: i64) -> BackendResult<()> {
        info!("Deleting request: {}", id);

        let result = sqlx::query("DELETE FROM requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BackendError::NotFound {
                resource: "request",
                id,
            });
        }

        Ok(())
    }
}
