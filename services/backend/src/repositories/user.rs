//! User repository for database operations

use sqlx::PgPool;
use tracing::info;

use crate::error::{BackendError, BackendResult};
use crate::models::{NewUser, UpdateUser, User, UserRole};

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    ///
    /// Duplicate usernames and emails are rejected up front via the exists
    /// checks; the unique indexes are the backstop for concurrent inserts.
    pub async fn create(&self, new_user: &NewUser) -> BackendResult<User> {
        info!("Creating new user: {}", new_user.username);

        if self.exists_by_username(&new_user.username).await? {
            return Err(BackendError::Conflict(format!(
                "Username '{}' is already taken",
                new_user.username
            )));
        }

        if self.exists_by_email(&new_user.email).await? {
            return Err(BackendError::Conflict(format!(
                "Email '{}' is already registered",
                new_user.email
            )));
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password, first_name, last_name, phone_number, role)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, username, email, password, first_name, last_name, phone_number, role,
                      created_at, updated_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.phone_number)
        .bind(new_user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                BackendError::Conflict("Username or email is already in use".to_string())
            }
            _ => BackendError::Database(e),
        })?;

        Ok(user)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i64) -> BackendResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password, first_name, last_name, phone_number, role,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by username
    ///
    /// The username column carries a unique index; more than one match means
    /// the store is corrupt and is reported as an integrity error.
    pub async fn find_by_username(&self, username: &str) -> BackendResult<Option<User>> {
        info!("Finding user by username: {}", username);

        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password, first_name, last_name, phone_number, role,
                   created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        if users.len() > 1 {
            return Err(BackendError::Integrity(format!(
                "Multiple users share username '{username}'"
            )));
        }

        Ok(users.into_iter().next())
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> BackendResult<Option<User>> {
        info!("Finding user by email: {}", email);

        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password, first_name, last_name, phone_number, role,
                   created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        if users.len() > 1 {
            return Err(BackendError::Integrity(format!(
                "Multiple users share email '{email}'"
            )));
        }

        Ok(users.into_iter().next())
    }

    /// Check whether a username is already taken
    pub async fn exists_by_username(&self, username: &str) -> BackendResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Check whether an email is already registered
    pub async fn exists_by_email(&self, email: &str) -> BackendResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Find all users with the given role
    pub async fn find_by_role(&self, role: UserRole) -> BackendResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password, first_name, last_name, phone_number, role,
                   created_at, updated_at
            FROM users
            WHERE role = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Update a user's profile; unset fields are left untouched
    pub async fn update(&self, id: i64, update: &UpdateUser) -> BackendResult<User> {
        info!("Updating user: {}", id);

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = COALESCE($2, email),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                phone_number = COALESCE($5, phone_number),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, password, first_name, last_name, phone_number, role,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&update.email)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.phone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                BackendError::Conflict("Email is already registered".to_string())
            }
            _ => BackendError::Database(e),
        })?;

        user.ok_or(BackendError::NotFound {
            resource: "user",
            id,
        })
    }

    /// Delete a user; owned items and requests are removed by the schema's
    /// cascade rules
    pub async fn delete(&self, id: i64) -> BackendResult<()> {
        info!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BackendError::NotFound {
                resource: "user",
                id,
            });
        }

        Ok(())
    }
}
