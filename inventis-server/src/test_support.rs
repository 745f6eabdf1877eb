//! Shared fixtures for unit tests: scratch SQLite stores, a storage that
//! always fails, and helpers for driving the router.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::db::pool::create_sqlite_pool;
use crate::db::{connect, Backend, SqliteStorage, Storage, StorageError};
use crate::http::{build_router, AppState, ServerConfig};
use crate::models::{
    ContactSubmission, NewContactSubmission, NewNewsletterSubscription, NewRegion, NewUser,
    NewsletterSubscription, Region, User,
};

/// Migrated SQLite store in a fresh temp directory.
///
/// Keep the `TempDir` alive for as long as the store is used.
pub(crate) async fn temp_storage() -> (TempDir, Arc<dyn Storage>) {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("file:{}", dir.path().join("test.db").display());
    let storage = connect(&url).await.expect("connect sqlite");
    storage.migrate().await.expect("migrate");
    (dir, storage)
}

/// Like [`temp_storage`], but also hands back the underlying pool so tests
/// can tamper with the schema behind the store's back.
pub(crate) async fn temp_sqlite() -> (TempDir, SqlitePool, Arc<dyn Storage>) {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("file:{}", dir.path().join("test.db").display());
    let pool = create_sqlite_pool(&url).await.expect("sqlite pool");
    let storage: Arc<dyn Storage> = Arc::new(SqliteStorage::new(pool.clone()));
    storage.migrate().await.expect("migrate");
    (dir, pool, storage)
}

pub(crate) async fn test_app() -> (TempDir, Router) {
    let (dir, app, _) = test_app_with_storage().await;
    (dir, app)
}

pub(crate) async fn test_app_with_storage() -> (TempDir, Router, Arc<dyn Storage>) {
    let (dir, storage) = temp_storage().await;
    let app = build_router(AppState::new(storage.clone()), &ServerConfig::default());
    (dir, app, storage)
}

pub(crate) fn failing_storage() -> Arc<dyn Storage> {
    Arc::new(FailingStorage)
}

/// Router whose every storage call fails
pub(crate) fn failing_app() -> Router {
    build_router(AppState::new(failing_storage()), &ServerConfig::default())
}

pub(crate) async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::get(uri).body(Body::empty()).expect("request");
    send(app, request).await
}

pub(crate) async fn post_json(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

struct FailingStorage;

fn down<T>() -> Result<T, StorageError> {
    Err(StorageError::Sqlx(sqlx::Error::PoolClosed))
}

#[async_trait]
impl Storage for FailingStorage {
    fn backend(&self) -> Backend {
        Backend::Sqlite
    }

    async fn migrate(&self) -> Result<(), StorageError> {
        down()
    }

    async fn ping(&self) -> Result<(), StorageError> {
        down()
    }

    async fn get_user(&self, _id: i64) -> Result<Option<User>, StorageError> {
        down()
    }

    async fn get_user_by_username(&self, _username: &str) -> Result<Option<User>, StorageError> {
        down()
    }

    async fn create_user(&self, _user: NewUser) -> Result<User, StorageError> {
        down()
    }

    async fn list_contact_submissions(&self) -> Result<Vec<ContactSubmission>, StorageError> {
        down()
    }

    async fn get_contact_submission(
        &self,
        _id: i64,
    ) -> Result<Option<ContactSubmission>, StorageError> {
        down()
    }

    async fn create_contact_submission(
        &self,
        _submission: NewContactSubmission,
    ) -> Result<ContactSubmission, StorageError> {
        down()
    }

    async fn list_active_newsletter_subscriptions(
        &self,
    ) -> Result<Vec<NewsletterSubscription>, StorageError> {
        down()
    }

    async fn get_newsletter_subscription(
        &self,
        _email: &str,
    ) -> Result<Option<NewsletterSubscription>, StorageError> {
        down()
    }

    async fn create_newsletter_subscription(
        &self,
        _subscription: NewNewsletterSubscription,
    ) -> Result<NewsletterSubscription, StorageError> {
        down()
    }

    async fn deactivate_newsletter_subscription(
        &self,
        _email: &str,
    ) -> Result<Option<NewsletterSubscription>, StorageError> {
        down()
    }

    async fn list_regions(&self) -> Result<Vec<Region>, StorageError> {
        down()
    }

    async fn get_region(&self, _id: i64) -> Result<Option<Region>, StorageError> {
        down()
    }

    async fn create_region(&self, _region: NewRegion) -> Result<Region, StorageError> {
        down()
    }

    async fn create_regions(&self, _regions: Vec<NewRegion>) -> Result<Vec<Region>, StorageError> {
        down()
    }
}
