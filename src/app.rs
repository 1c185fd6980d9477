use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::{MediaBackend, SecurityConfig};
use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/admin", handlers::admin::routes())
        .nest("/api/club", handlers::club::routes())
        .nest("/api/player", handlers::player::routes());

    if config.media.backend == MediaBackend::Local {
        router = router.nest_service("/uploads", ServeDir::new(&config.media.root));
    }

    let mut router = router
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    if let Some(cors) = cors_layer(&config.security) {
        router = router.layer(cors);
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }

    if security.cors_origins.is_empty() || security.cors_origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    Some(CorsLayer::permissive().allow_origin(AllowOrigin::list(origins)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::AppConfig;
    use crate::database::DatabaseManager;
    use crate::services::media::LocalStore;
    use crate::services::notifier::LogMailer;
    use crate::services::{MediaUploader, Notifier};

    fn router() -> (Router, AppState) {
        let config = AppConfig::development();
        let pool = DatabaseManager::connect_lazy(&config.database).unwrap();
        let media = MediaUploader::new(Arc::new(LocalStore::new(
            std::env::temp_dir().join("club-manager-app-tests"),
            "http://localhost/uploads",
        )));
        let state = AppState::new(pool, config, media, Notifier::new(Arc::new(LogMailer)));
        (build_router(state.clone()), state)
    }

    async fn post(router: Router, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut request = Request::post(path).header("content-type", "application/json");
        if let Some(token) = token {
            request = request.header("token", token);
        }
        let response = router
            .oneshot(request.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn missing_token_is_forbidden() {
        let (router, _) = router();
        let (status, body) = post(router, "/api/admin/viewProfile", None, json!({"adminId": 1})).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["status"], "failed");
        assert_eq!(body["message"], "Token is missing");
    }

    #[tokio::test]
    async fn token_is_checked_before_the_body_is_read() {
        let (router, _) = router();

        let response = router
            .clone()
            .oneshot(Request::post("/api/club/viewAllPlayers").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Token is missing");

        let (status, body) = post(router, "/api/admin/addNews", None, json!({"adminId": 1})).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Token is missing");
    }

    #[tokio::test]
    async fn missing_actor_id_is_unauthorized() {
        let (router, state) = router();
        let token = state.auth.club.issue(4, "club@example.com").unwrap();
        let (status, body) = post(router, "/api/club/viewAllPlayers", Some(&token), json!({})).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Club ID is missing");
    }

    #[tokio::test]
    async fn tokens_do_not_cross_roles() {
        let (router, state) = router();
        let club_token = state.auth.club.issue(1, "club@example.com").unwrap();

        let (status, body) =
            post(router.clone(), "/api/admin/viewAllMatches", Some(&club_token), json!({"adminId": 1})).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Invalid token");

        let (status, _) = post(router, "/api/player/viewAllNews", Some(&club_token), json!({"playerId": "1"})).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn token_for_someone_else_is_rejected() {
        let (router, state) = router();
        let token = state.auth.admin.issue(1, "a@x.com").unwrap();
        let (status, body) = post(router, "/api/admin/viewProfile", Some(&token), json!({"adminId": "2"})).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Unauthorized access");
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let (router, _) = router();
        let response = router
            .oneshot(
                Request::post("/api/admin/login")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn login_validates_before_touching_the_store() {
        let (router, _) = router();
        let (status, body) = post(router, "/api/club/login", None, json!({"clubEmail": "not-an-email"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["results"]["clubEmail"][0], "Invalid email address");
        assert_eq!(body["results"]["clubPassword"][0], "Password is required");
    }

    #[test]
    fn cors_can_be_disabled_or_restricted() {
        let mut security = AppConfig::development().security;
        assert!(cors_layer(&security).is_some());

        security.cors_origins = vec!["*".into()];
        assert!(cors_layer(&security).is_some());

        security.enable_cors = false;
        assert!(cors_layer(&security).is_none());
    }
}
