//! Route handlers organized by resource

use std::sync::Arc;

use axum::Router;

use super::server::AppState;

pub mod health;
pub mod contact;
pub mod newsletter;
pub mod regions;

/// Everything mounted under `/api`
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(contact::router())
        .merge(newsletter::router())
        .merge(regions::router())
}
