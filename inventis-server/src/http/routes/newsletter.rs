//! Newsletter endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;
use crate::models::{NewsletterPayload, NewsletterSubscription};

/// POST /newsletter/subscribe - subscribe or reactivate an email
///
/// Repeat subscriptions return the existing row, so this is safe to retry.
async fn subscribe(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<NewsletterPayload>,
) -> Result<(StatusCode, Json<NewsletterSubscription>), ApiError> {
    let new = payload.validate()?;
    let subscription = state.storage.create_newsletter_subscription(new).await?;
    tracing::info!(id = subscription.id, "Newsletter subscription active");

    Ok((StatusCode::CREATED, Json(subscription)))
}

/// POST /newsletter/unsubscribe - deactivate an email's subscription
async fn unsubscribe(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<NewsletterPayload>,
) -> Result<Json<NewsletterSubscription>, ApiError> {
    let email = payload.validate()?.email;
    let subscription = state
        .storage
        .deactivate_newsletter_subscription(email.as_str())
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "subscription",
            id: email.into_string(),
        })?;
    tracing::info!(id = subscription.id, "Newsletter subscription deactivated");

    Ok(Json(subscription))
}

/// GET /newsletter/subscribers - active subscriptions only
async fn list_subscribers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<NewsletterSubscription>>, ApiError> {
    Ok(Json(
        state.storage.list_active_newsletter_subscriptions().await?,
    ))
}

/// Newsletter routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/newsletter/subscribe", post(subscribe))
        .route("/newsletter/unsubscribe", post(unsubscribe))
        .route("/newsletter/subscribers", get(list_subscribers))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_support::{failing_app, get, post_json, test_app};

    #[tokio::test]
    async fn subscribe_twice_returns_same_id() {
        let (_dir, app) = test_app().await;
        let body = json!({ "email": "reader@example.com" });

        let (status, first) = post_json(&app, "/api/newsletter/subscribe", body.clone()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(first["active"], true);

        let (status, second) = post_json(&app, "/api/newsletter/subscribe", body).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(first["id"], second["id"]);

        let (_, list) = get(&app, "/api/newsletter/subscribers").await;
        assert_eq!(list.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unsubscribe_then_resubscribe_restores_original_row() {
        let (_dir, app) = test_app().await;
        let body = json!({ "email": "returning@example.com" });

        let (_, original) = post_json(&app, "/api/newsletter/subscribe", body.clone()).await;

        let (status, off) = post_json(&app, "/api/newsletter/unsubscribe", body.clone()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(off["active"], false);

        let (_, list) = get(&app, "/api/newsletter/subscribers").await;
        assert!(list.as_array().unwrap().is_empty());

        let (status, back) = post_json(&app, "/api/newsletter/subscribe", body).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(back["id"], original["id"]);
        assert_eq!(back["active"], true);

        let (_, list) = get(&app, "/api/newsletter/subscribers").await;
        assert_eq!(list[0]["id"], original["id"]);
    }

    #[tokio::test]
    async fn subscribers_never_include_inactive() {
        let (_dir, app) = test_app().await;
        for email in ["a@example.com", "b@example.com", "c@example.com"] {
            post_json(&app, "/api/newsletter/subscribe", json!({ "email": email })).await;
        }
        post_json(
            &app,
            "/api/newsletter/unsubscribe",
            json!({ "email": "b@example.com" }),
        )
        .await;

        let (status, list) = get(&app, "/api/newsletter/subscribers").await;
        assert_eq!(status, StatusCode::OK);
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|s| s["active"] == true));
        assert!(list.iter().all(|s| s["email"] != "b@example.com"));
    }

    #[tokio::test]
    async fn invalid_email_is_400() {
        let (_dir, app) = test_app().await;
        let (status, body) =
            post_json(&app, "/api/newsletter/subscribe", json!({ "email": "nope" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"][0]["path"], "email");

        let (status, _) = post_json(&app, "/api/newsletter/subscribe", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unsubscribe_unknown_is_404() {
        let (_dir, app) = test_app().await;
        let (status, _) = post_json(
            &app,
            "/api/newsletter/unsubscribe",
            json!({ "email": "ghost@example.com" }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn storage_failure_is_500() {
        let app = failing_app();
        let (status, _) = post_json(
            &app,
            "/api/newsletter/subscribe",
            json!({ "email": "reader@example.com" }),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, _) = get(&app, "/api/newsletter/subscribers").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
