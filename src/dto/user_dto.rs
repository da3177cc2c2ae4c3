use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::user::User;

pub const DEFAULT_LIMIT: i64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserPayload {
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, Validate, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    /// Number of users to skip
    #[validate(range(min = 0, message = "skip must not be negative"))]
    pub skip: Option<i64>,
    /// Maximum number of users to return
    #[validate(range(min = 0, message = "limit must not be negative"))]
    pub limit: Option<i64>,
}

impl UserListQuery {
    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteUserResponse {
    pub message: String,
    pub id: i32,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            created_at: value.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_email() {
        let payload = CreateUserPayload {
            name: "Ada".into(),
            email: "not-an-email".into(),
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn empty_name_is_still_a_name() {
        let payload = CreateUserPayload {
            name: String::new(),
            email: "ada@example.com".into(),
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn pagination_defaults() {
        let query = UserListQuery::default();
        assert!(query.validate().is_ok());
        assert_eq!(query.skip(), 0);
        assert_eq!(query.limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn negative_pagination_is_invalid() {
        let query = UserListQuery {
            skip: Some(-1),
            limit: Some(10),
        };
        assert!(query.validate().is_err());
    }
}
