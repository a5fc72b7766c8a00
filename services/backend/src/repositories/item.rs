//! Item repository for database operations

use sqlx::PgPool;
use tracing::info;

use crate::error::{BackendError, BackendResult};
use crate::models::{Item, ItemStatus, NewItem, UpdateItem};

/// Item repository
#[derive(Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    /// Create a new item repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new item report
    pub async fn create(&self, new_item: &NewItem) -> BackendResult<Item> {
        info!("Creating new item: {}", new_item.name);

        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (name, description, category, location, image_url, status,
                               date_lost_found, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, description, category, location, image_url, status,
                      date_lost_found, created_at, updated_at, user_id
            "#,
        )
        .bind(&new_item.name)
        .bind(&new_item.description)
        .bind(&new_item.category)
        .bind(&new_item.location)
        .bind(&new_item.image_url)
        .bind(new_item.status)
        .bind(new_item.date_lost_found)
        .bind(new_item.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                BackendError::NotFound {
                    resource: "user",
                    id: new_item.user_id,
                }
            }
            _ => BackendError::Database(e),
        })?;

        Ok(item)
    }

    /// Find an item by ID
    pub async fn find_by_id(&self, id: i64) -> BackendResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, description, category, location, image_url, status,
                   date_lost_found, created_at, updated_at, user_id
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Get all items, newest first
    pub async fn find_all(&self) -> BackendResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, description, category, location, image_url, status,
                   date_lost_found, created_at, updated_at, user_id
            FROM items
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Find all items with the given status
    pub async fn find_by_status(&self, status: ItemStatus) -> BackendResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, description, category, location, image_url, status,
                   date_lost_found, created_at, updated_at, user_id
            FROM items
            WHERE status = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Find all items owned by the given user
    pub async fn find_by_user_id(&self, user_id: i64) -> BackendResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, description, category, location, image_url, status,
                   date_lost_found, created_at, updated_at, user_id
            FROM items
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Find all items in the given category (exact match)
    pub async fn find_by_category(&self, category: &str) -> BackendResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, description, category, location, image_url, status,
                   date_lost_found, created_at, updated_at, user_id
            FROM items
            WHERE category = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Search items whose name or description contains the keyword
    ///
    /// Case-sensitive substring match; items without a description only
    /// match on the name.
    pub async fn find_by_keyword(&self, keyword: &str) -> BackendResult<Vec<Item>> {
        info!("Searching items by keyword: {}", keyword);

        let pattern = format!("%{keyword}%");
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, description, category, location, image_url, status,
                   date_lost_found, created_at, updated_at, user_id
            FROM items
            WHERE name LIKE $1 OR description LIKE $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Search items by keyword, restricted to the given status
    pub async fn find_by_status_and_keyword(
        &self,
        status: ItemStatus,
        keyword: &str,
    ) -> BackendResult<Vec<Item>> {
        info!("Searching {} items by keyword: {}", status, keyword);

        let pattern = format!("%{keyword}%");
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, description, category, location, image_url, status,
                   date_lost_found, created_at, updated_at, user_id
            FROM items
            WHERE status = $1 AND (name LIKE $2 OR description LIKE $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Update an item; unset fields are left untouched and updated_at is
    /// refreshed by the database
    pub async fn update(&self, id: i64, update: &UpdateItem) -> BackendResult<Item> {
        info!("Updating item: {}", id);

        let item = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                location = COALESCE($5, location),
                image_url = COALESCE($6, image_url),
                status = COALESCE($7, status),
                date_lost_found = COALESCE($8, date_lost_found),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, category, location, image_url, status,
                      date_lost_found, created_at, updated_at, user_id
            "#,
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.description)
        .bind(&update.category)
        .bind(&update.location)
        .bind(&update.image_url)
        .bind(update.status)
        .bind(update.date_lost_found)
        .fetch_optional(&self.pool)
        .await?;

        item.ok_or(BackendError::NotFound {
            resource: "item",
            id,
        })
    }

    /// Delete an item; requests filed against it are removed by the schema's
    /// cascade rule
    pub async fn delete(&self, id: i64) -> BackendResult<()> {
        info!("Deleting item: {}", id);

        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BackendError::NotFound {
                resource: "item",
                id,
            });
        }

        Ok(())
    }
}
