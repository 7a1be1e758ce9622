#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;

use monuments_api::auth::{generate_jwt, Claims};
use monuments_api::database::models::{Favorite, Monument, NewFavorite, NewMonument, User};
use monuments_api::database::{CatalogStore, StoreError};
use monuments_api::notify::{NotificationPublisher, NotifyError};
use monuments_api::state::AppState;

pub const JWT_SECRET: &str = "test-secret";

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    monuments: Vec<Monument>,
    favorites: Vec<Favorite>,
    next_user_id: i32,
    next_monument_id: i32,
    next_favorite_id: i32,
}

/// In-memory CatalogStore standing in for Postgres in router tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
    fail_storage: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent inserts, deletes, and listing fail. Lookups keep
    /// working so a request still reaches the operation that fails.
    pub fn break_storage(&self) {
        self.fail_storage.store(true, Ordering::SeqCst);
    }

    fn check_storage(&self) -> Result<(), StoreError> {
        if self.fail_storage.load(Ordering::SeqCst) {
            return Err(StoreError::QueryError(
                "connection reset by peer".to_string(),
            ));
        }
        Ok(())
    }

    pub fn seed_user(&self, username: &str) -> User {
        let mut tables = self.inner.lock().unwrap();
        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            username: username.to_string(),
            created: Utc::now(),
        };
        tables.users.push(user.clone());
        user
    }

    pub fn seed_monument(&self, title: &str, description: &str) -> Monument {
        let mut tables = self.inner.lock().unwrap();
        tables.next_monument_id += 1;
        let monument = Monument {
            id: tables.next_monument_id,
            title: title.to_string(),
            description: description.to_string(),
            location: None,
            created: Utc::now(),
        };
        tables.monuments.push(monument.clone());
        monument
    }

    pub fn favorite_count(&self) -> usize {
        self.inner.lock().unwrap().favorites.len()
    }

    pub fn monument_count(&self) -> usize {
        self.inner.lock().unwrap().monuments.len()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_monument(&self, id: i32) -> Result<Option<Monument>, StoreError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.monuments.iter().find(|m| m.id == id).cloned())
    }

    async fn insert_monument(&self, monument: NewMonument) -> Result<Monument, StoreError> {
        self.check_storage()?;
        let mut tables = self.inner.lock().unwrap();
        tables.next_monument_id += 1;
        let created = Monument {
            id: tables.next_monument_id,
            title: monument.title,
            description: monument.description,
            location: monument.location,
            created: Utc::now(),
        };
        tables.monuments.push(created.clone());
        Ok(created)
    }

    async fn find_favorite(
        &self,
        user_id: i32,
        monument_id: i32,
    ) -> Result<Option<Favorite>, StoreError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .favorites
            .iter()
            .find(|f| f.user_id == user_id && f.monument_id == monument_id)
            .cloned())
    }

    async fn insert_favorite(&self, favorite: NewFavorite) -> Result<Favorite, StoreError> {
        self.check_storage()?;
        let mut tables = self.inner.lock().unwrap();
        // Mirror the storage-layer unique index
        if tables
            .favorites
            .iter()
            .any(|f| f.user_id == favorite.user_id && f.monument_id == favorite.monument_id)
        {
            return Err(StoreError::QueryError(
                "duplicate key value violates unique constraint".to_string(),
            ));
        }
        tables.next_favorite_id += 1;
        let created = Favorite {
            id: tables.next_favorite_id,
            user_id: favorite.user_id,
            monument_id: favorite.monument_id,
            created: Utc::now(),
        };
        tables.favorites.push(created.clone());
        Ok(created)
    }

    async fn delete_favorite(&self, id: i32) -> Result<(), StoreError> {
        self.check_storage()?;
        let mut tables = self.inner.lock().unwrap();
        tables.favorites.retain(|f| f.id != id);
        Ok(())
    }

    async fn list_favorite_monuments(&self, user_id: i32) -> Result<Vec<Monument>, StoreError> {
        self.check_storage()?;
        let tables = self.inner.lock().unwrap();
        let monuments = tables
            .favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .filter_map(|f| tables.monuments.iter().find(|m| m.id == f.monument_id))
            .cloned()
            .collect();
        Ok(monuments)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Publisher that records every emitted event for assertions.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<(String, Value)>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emitted(&self) -> Vec<(String, Value)> {
        self.events.lock().unwrap().clone()
    }
}

impl NotificationPublisher for RecordingPublisher {
    fn emit(&self, event: &str, payload: Value) -> Result<(), NotifyError> {
        self.events.lock().unwrap().push((event.to_string(), payload));
        Ok(())
    }
}

/// Publisher that always fails, for failure-isolation tests.
pub struct FailingPublisher;

impl NotificationPublisher for FailingPublisher {
    fn emit(&self, _event: &str, _payload: Value) -> Result<(), NotifyError> {
        Err(NotifyError::PublishFailed("transport down".to_string()))
    }
}

pub fn test_app(
    store: Arc<MemoryStore>,
    publisher: Option<Arc<dyn NotificationPublisher>>,
) -> Router {
    monuments_api::app(AppState::new(store, publisher, JWT_SECRET))
}

pub fn bearer_token(username: &str) -> String {
    let token = generate_jwt(&Claims::new(username, 1), JWT_SECRET).expect("token");
    format!("Bearer {}", token)
}

/// Drive one request through the router and decode status + JSON body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}
