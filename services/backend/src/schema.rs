//! Relational schema for the lost-and-found tables
//!
//! Foreign keys and cascade behavior are declared explicitly here rather
//! than inferred: deleting a user removes their items and requests, and
//! deleting an item removes the requests filed against it. Timestamps are
//! stamped by the database, never by callers.

use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        first_name TEXT,
        last_name TEXT,
        phone_number TEXT,
        role TEXT NOT NULL DEFAULT 'USER',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS items (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT,
        category TEXT,
        location TEXT,
        image_url TEXT,
        status TEXT NOT NULL,
        date_lost_found TIMESTAMPTZ,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        user_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS requests (
        id BIGSERIAL PRIMARY KEY,
        description TEXT NOT NULL,
        contact_info TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'PENDING',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        user_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        item_id BIGINT NOT NULL REFERENCES items (id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_items_user_id ON items (user_id)",
    "CREATE INDEX IF NOT EXISTS idx_items_status ON items (status)",
    "CREATE INDEX IF NOT EXISTS idx_requests_user_id ON requests (user_id)",
    "CREATE INDEX IF NOT EXISTS idx_requests_item_id ON requests (item_id)",
];

/// Apply the schema, creating missing tables and indexes
///
/// Idempotent; safe to run at every service start.
pub async fn init_schema(pool: &PgPool) -> DatabaseResult<()> {
    info!("Applying database schema");

    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;
    }

    info!("Database schema applied successfully");
    Ok(())
}
