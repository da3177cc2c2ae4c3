use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::schema;
use crate::database::store::{UserStore, EMAIL_TAKEN};
use crate::error::{Error, Result};
use crate::models::user::{NewUser, User};

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// The unique index on `users.email` is the last line of defence against two
/// concurrent creates that both passed the existence check.
fn conflict_on_unique(err: sqlx::Error) -> Error {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            Error::Conflict(EMAIL_TAKEN.to_string())
        }
        _ => err.into(),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn ping(&self) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for statement in schema::ddl() {
            sqlx::query(&statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User> {
        let mut tx = self.pool.begin().await?;

        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(&user.email)
        .fetch_one(&mut *tx)
        .await?;
        if taken {
            return Err(Error::Conflict(EMAIL_TAKEN.to_string()));
        }

        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(conflict_on_unique)?;

        tx.commit().await.map_err(conflict_on_unique)?;
        Ok(created)
    }

    async fn list_users(&self, skip: i64, limit: i64) -> Result<Vec<User>> {
        let mut conn = self.pool.acquire().await?;
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, created_at
            FROM users
            ORDER BY id
            OFFSET $1
            LIMIT $2
            "#,
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(&mut *conn)
        .await?;
        Ok(users)
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>> {
        let mut conn = self.pool.acquire().await?;
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(user)
    }

    async fn delete_user(&self, id: i32) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }
        tx.commit().await?;
        Ok(true)
    }
}
