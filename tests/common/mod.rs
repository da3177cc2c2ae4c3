#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value as JsonValue;
use tower::ServiceExt;
use users_backend::{
    config::Config,
    database::store::{UserStore, EMAIL_TAKEN},
    error::{Error, Result},
    models::user::{NewUser, User},
    routes, AppState,
};

#[derive(Default)]
struct Rows {
    last_id: i32,
    users: BTreeMap<i32, User>,
}

/// In-process stand-in for the database with the same uniqueness and id
/// guarantees.
pub struct MemoryUserStore {
    rows: Mutex<Rows>,
    reachable: AtomicBool,
    hanging: AtomicBool,
}

impl MemoryUserStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(Rows::default()),
            reachable: AtomicBool::new(true),
            hanging: AtomicBool::new(false),
        })
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    /// Makes `ping` never complete, like a connect that is never refused.
    pub fn set_hanging(&self, hanging: bool) {
        self.hanging.store(hanging, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().users.len()
    }

    fn check(&self) -> Result<()> {
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(Error::Database(sqlx::Error::PoolTimedOut))
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn ping(&self) -> Result<()> {
        if self.hanging.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        self.check()
    }

    async fn ensure_schema(&self) -> Result<()> {
        self.check()
    }

    async fn insert_user(&self, user: NewUser) -> Result<User> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.users.values().any(|u| u.email == user.email) {
            return Err(Error::Conflict(EMAIL_TAKEN.to_string()));
        }
        rows.last_id += 1;
        let created = User {
            id: rows.last_id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        };
        rows.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn list_users(&self, skip: i64, limit: i64) -> Result<Vec<User>> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .users
            .values()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>> {
        self.check()?;
        Ok(self.rows.lock().unwrap().users.get(&id).cloned())
    }

    async fn delete_user(&self, id: i32) -> Result<bool> {
        self.check()?;
        Ok(self.rows.lock().unwrap().users.remove(&id).is_some())
    }
}

pub fn test_config(vars: &[(&str, &str)]) -> Config {
    let vars: Vec<(String, String)> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|name| {
        vars.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    })
    .expect("test config")
}

pub fn test_app(store: Arc<MemoryUserStore>) -> Router {
    routes::app(AppState::new(store), &test_config(&[]))
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, JsonValue) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &JsonValue) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
