use async_trait::async_trait;

use crate::error::Result;
use crate::models::user::{NewUser, User};

pub const EMAIL_TAKEN: &str = "Email already registered";

/// Store client handed to the service layer.
///
/// Each call owns its connection or transaction for the duration of that one
/// operation and releases it before returning, on success and on error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Trivial liveness query.
    async fn ping(&self) -> Result<()>;

    /// Creates any missing tables and indexes.
    async fn ensure_schema(&self) -> Result<()>;

    /// Inserts a user unless the email is already taken, in which case
    /// `Error::Conflict` is returned and nothing is written.
    async fn insert_user(&self, user: NewUser) -> Result<User>;

    /// Page of users ordered by id.
    async fn list_users(&self, skip: i64, limit: i64) -> Result<Vec<User>>;

    async fn find_user(&self, id: i32) -> Result<Option<User>>;

    /// Returns `false` when no user had that id.
    async fn delete_user(&self, id: i32) -> Result<bool>;
}

/// Store whose every call hangs, for exercising time limits.
#[cfg(test)]
pub(crate) struct PendingStore;

#[cfg(test)]
#[async_trait]
impl UserStore for PendingStore {
    async fn ping(&self) -> Result<()> {
        std::future::pending().await
    }

    async fn ensure_schema(&self) -> Result<()> {
        std::future::pending().await
    }

    async fn insert_user(&self, _user: NewUser) -> Result<User> {
        std::future::pending().await
    }

    async fn list_users(&self, _skip: i64, _limit: i64) -> Result<Vec<User>> {
        std::future::pending().await
    }

    async fn find_user(&self, _id: i32) -> Result<Option<User>> {
        std::future::pending().await
    }

    async fn delete_user(&self, _id: i32) -> Result<bool> {
        std::future::pending().await
    }
}
