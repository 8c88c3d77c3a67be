//! bobbin-server
//!
//! HTTP adapter over `bobbin-core`. The router is an explicit value built
//! once at startup; nothing is registered globally.

pub mod error;
pub mod routes;
pub mod state;

use axum::{Json, Router, routing::get};
use serde::Serialize;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes(state))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use bobbin_core::impls::{InMemoryTaskStore, SimulatedWork};
    use bobbin_core::{TaskQueue, TaskService, WorkerPool};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        pool: WorkerPool,
        queue: Arc<TaskQueue>,
    }

    fn test_app(work: Duration) -> TestApp {
        let store = Arc::new(InMemoryTaskStore::new());
        let queue = Arc::new(TaskQueue::new(16).unwrap());
        let service = Arc::new(TaskService::new(store.clone(), queue.clone()));
        let pool = WorkerPool::new(queue.clone(), store, Arc::new(SimulatedWork::new(work)));
        TestApp {
            router: router(AppState::new(service)),
            pool,
            queue,
        }
    }

    async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_task(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/tasks")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn create_returns_pending_task() {
        let app = test_app(Duration::from_secs(60));

        let (status, body) = send(&app.router, post_task(r#"{"payload":"X"}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], "1");
        assert_eq!(body["payload"], "X");
        assert_eq!(body["status"], "PENDING");
    }

    #[tokio::test]
    async fn create_accepts_body_without_content_type() {
        let app = test_app(Duration::from_secs(60));
        let req = Request::builder()
            .method("POST")
            .uri("/tasks")
            .body(Body::from(r#"{"payload":"X"}"#))
            .unwrap();

        let (status, body) = send(&app.router, req).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["payload"], "X");
    }

    #[tokio::test]
    async fn missing_payload_defaults_to_empty() {
        let app = test_app(Duration::from_secs(60));

        let (status, body) = send(&app.router, post_task("{}")).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["payload"], "");
        assert_eq!(body["status"], "PENDING");
    }

    #[tokio::test]
    async fn invalid_json_is_bad_request() {
        let app = test_app(Duration::ZERO);

        let (status, body) = send(&app.router, post_task("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("invalid JSON"));

        let (status, _) = send(&app.router, post_task(r#"{"payload":5}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app.router, get("/stats")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_task_is_not_found() {
        let app = test_app(Duration::ZERO);
        let (status, body) = send(&app.router, get("/tasks/404")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "task not found: 404");
    }

    #[tokio::test]
    async fn list_returns_every_task() {
        let app = test_app(Duration::from_secs(60));
        for p in ["a", "b", "c"] {
            send(&app.router, post_task(&format!(r#"{{"payload":"{p}"}}"#))).await;
        }

        let (status, body) = send(&app.router, get("/tasks")).await;
        assert_eq!(status, StatusCode::OK);
        let mut payloads: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["payload"].as_str().unwrap().to_string())
            .collect();
        payloads.sort();
        assert_eq!(payloads, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn wrong_method_is_rejected() {
        let app = test_app(Duration::ZERO);
        let req = Request::builder()
            .method("DELETE")
            .uri("/tasks")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app.router, req).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn submitted_task_is_processed_end_to_end() {
        let app = test_app(Duration::from_millis(10));
        app.pool.start(2).await.unwrap();

        let (_, created) = send(&app.router, post_task(r#"{"payload":"X"}"#)).await;
        let uri = format!("/tasks/{}", created["id"].as_str().unwrap());

        let done = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let (_, task) = send(&app.router, get(&uri)).await;
                if task["status"] == "DONE" {
                    return task;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();
        assert_eq!(done["payload"], "X");

        let (_, stats) = send(&app.router, get("/stats")).await;
        assert_eq!(stats["submitted"], 1);
        assert_eq!(stats["completed"], 1);
        assert_eq!(stats["in_progress"], 0);

        app.pool.stop().await.unwrap();
    }

    #[tokio::test]
    async fn create_after_shutdown_is_unavailable() {
        let app = test_app(Duration::ZERO);
        app.queue.close().await;
        let (status, _) = send(&app.router, post_task(r#"{"payload":"X"}"#)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = test_app(Duration::ZERO);
        let (status, body) = send(&app.router, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
