use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use validator::Validate;

use crate::database::bootstrap::ATTEMPT_TIMEOUT;
use crate::database::store::UserStore;
use crate::dto::user_dto::{CreateUserPayload, UserListQuery};
use crate::error::{Error, Result};
use crate::models::user::{NewUser, User};
use crate::utils::time::now;

const USER_NOT_FOUND: &str = "User not found";

/// Upper bound on the health probe; a hung connect counts as disconnected.
pub const HEALTH_CHECK_TIMEOUT: Duration = ATTEMPT_TIMEOUT;

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, payload: CreateUserPayload) -> Result<User> {
        payload.validate()?;
        let new_user = NewUser {
            name: payload.name,
            email: payload.email,
            created_at: now(),
        };

        match self.store.insert_user(new_user).await {
            Ok(user) => {
                info!(user_id = user.id, "User created");
                Ok(user)
            }
            Err(Error::Conflict(msg)) => {
                info!("Rejected user creation: {}", msg);
                Err(Error::Conflict(msg))
            }
            Err(err) => Err(err),
        }
    }

    pub async fn list(&self, query: UserListQuery) -> Result<Vec<User>> {
        query.validate()?;
        self.store.list_users(query.skip(), query.limit()).await
    }

    pub async fn get(&self, id: i32) -> Result<User> {
        self.store
            .find_user(id)
            .await?
            .ok_or_else(|| Error::NotFound(USER_NOT_FOUND.to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        if !self.store.delete_user(id).await? {
            return Err(Error::NotFound(USER_NOT_FOUND.to_string()));
        }
        info!(user_id = id, "User deleted");
        Ok(())
    }

    pub async fn store_reachable(&self) -> bool {
        match tokio::time::timeout(HEALTH_CHECK_TIMEOUT, self.store.ping()).await {
            Ok(Ok(())) => true,
            Ok(Err(err)) => {
                warn!(error = %err, "Database health check failed");
                false
            }
            Err(_) => {
                warn!(
                    "Database health check timed out after {:?}",
                    HEALTH_CHECK_TIMEOUT
                );
                false
            }
        }
    }
}
