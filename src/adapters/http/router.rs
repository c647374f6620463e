//! Top-level axum router.
//!
//! ```text
//! GET  /health
//! /api/auth    signup, login
//! /api/plans   generate, save, list, delete, regenerate, study materials, export
//! /api/export  capabilities, draft export
//! ```

use axum::{http::HeaderValue, middleware, routing::get, Json, Router};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;

use super::accounts::{account_routes, AccountHandlers};
use super::export::{export_routes, plan_export_routes, ExportHandlers};
use super::middleware::{auth_middleware, AuthState};
use super::plans::{plan_routes, PlanHandlers};

/// Everything the HTTP layer needs, wired once at startup.
#[derive(Clone)]
pub struct ApiHandlers {
    pub accounts: AccountHandlers,
    pub plans: PlanHandlers,
    pub exports: ExportHandlers,
    pub sessions: AuthState,
}

/// Builds the application router with tracing, CORS, timeout and session layers.
pub fn app_router(handlers: ApiHandlers, server: &ServerConfig) -> Router {
    let plans = plan_routes(handlers.plans).merge(plan_export_routes(handlers.exports.clone()));

    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", account_routes(handlers.accounts))
        .nest("/api/plans", plans)
        .nest("/api/export", export_routes(handlers.exports))
        .layer(middleware::from_fn_with_state(
            handlers.sessions,
            auth_middleware,
        ))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// No configured origins allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring malformed CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use secrecy::Secret;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::adapters::ai::MockCompletionProvider;
    use crate::adapters::auth::{BcryptPasswordHasher, JwtTokens};
    use crate::adapters::document::{DocxBackend, PdfBackend};
    use crate::adapters::memory::{InMemoryCredentialStore, InMemoryPlanStore};
    use crate::application::*;
    use crate::ports::{CredentialStore, PlanStore};

    fn router(completions: MockCompletionProvider) -> Router {
        let plans: Arc<dyn PlanStore> = Arc::new(InMemoryPlanStore::new());
        let credentials: Arc<dyn CredentialStore> = Arc::new(InMemoryCredentialStore::new());
        let completions = Arc::new(completions);
        let hasher = Arc::new(BcryptPasswordHasher::new(4));
        let tokens = Arc::new(JwtTokens::new(
            Secret::new("router-test-secret-router-test-secret".to_string()),
            "lesson-planner",
            chrono::Duration::hours(1),
        ));
        let converter = Arc::new(DocumentConverter::new(
            Arc::new(DocxBackend::new()),
            Arc::new(PdfBackend::new()),
        ));

        let handlers = ApiHandlers {
            accounts: AccountHandlers::new(
                Arc::new(SignupHandler::new(credentials.clone(), hasher.clone())),
                Arc::new(LoginHandler::new(credentials, hasher, tokens.clone())),
            ),
            plans: PlanHandlers {
                generate: Arc::new(GenerateLessonPlanHandler::new(completions.clone())),
                save: Arc::new(SaveLessonPlanHandler::new(plans.clone())),
                list: Arc::new(ListLessonPlansHandler::new(plans.clone())),
                delete: Arc::new(DeleteLessonPlanHandler::new(plans.clone())),
                regenerate: Arc::new(RegenerateLessonPlanHandler::new(
                    plans.clone(),
                    completions.clone(),
                )),
                study_materials: Arc::new(GenerateStudyMaterialsHandler::new(
                    plans.clone(),
                    completions,
                )),
            },
            exports: ExportHandlers {
                converter: converter.clone(),
                plan_export: Arc::new(ExportLessonPlanHandler::new(plans, converter.clone())),
                draft_export: Arc::new(ExportDraftHandler::new(converter)),
            },
            sessions: tokens,
        };
        app_router(handlers, &ServerConfig::default())
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn login(app: &Router) -> String {
        let credentials = json!({"username": "alice", "password": "pw123456"});
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/auth/signup", None, credentials.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/auth/login", None, credentials))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = router(MockCompletionProvider::new())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn capabilities_are_public() {
        let response = router(MockCompletionProvider::new())
            .oneshot(
                Request::get("/api/export/capabilities")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["pdf"], true);
        assert_eq!(body["docx"], true);
        assert_eq!(body["markdown"], true);
    }

    #[tokio::test]
    async fn plans_require_a_session() {
        let response = router(MockCompletionProvider::new())
            .oneshot(Request::get("/api/plans").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let response = router(MockCompletionProvider::new())
            .oneshot(
                Request::get("/api/plans")
                    .header(header::AUTHORIZATION, "Bearer nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn generate_returns_completion() {
        let app = router(MockCompletionProvider::new().with_response("# Intro\n- Variables"));
        let token = login(&app).await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/plans/generate",
                Some(&token),
                json!({
                    "subject": "Math",
                    "topic": "Algebra",
                    "grade": "Grade 8",
                    "duration": "45 minutes",
                    "objectives": "Solve linear equations"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["content"], "# Intro\n- Variables");
    }

    #[tokio::test]
    async fn generate_with_blank_field_is_bad_request() {
        let app = router(MockCompletionProvider::new());
        let token = login(&app).await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/plans/generate",
                Some(&token),
                json!({"subject": "Math"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn draft_export_with_unknown_format_is_bad_request() {
        let app = router(MockCompletionProvider::new());
        let token = login(&app).await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/export/odt",
                Some(&token),
                json!({
                    "subject": "Math",
                    "topic": "Algebra",
                    "grade": "Grade 8",
                    "duration": "45 minutes",
                    "content": "# Intro"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn delete_with_malformed_id_is_bad_request() {
        let app = router(MockCompletionProvider::new());
        let token = login(&app).await;

        let response = app
            .oneshot(
                Request::delete("/api/plans/not-a-uuid")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn malformed_cors_origins_are_skipped() {
        let _ = cors_layer(&["https://ok.example".to_string(), "bad\norigin".to_string()]);
    }
}
