#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use deployhook_core::guard::{DeployToken, DEPLOY_TOKEN_HEADER};
use deployhook_core::migration::{MigrationError, MigrationReport, MigrationRunner};
use http_body_util::BodyExt;
use tower::ServiceExt;

use deployhook_api::router::build_app_router;
use deployhook_api::state::AppState;

/// Secret configured on the test app unless a test says otherwise.
pub const TEST_TOKEN: &str = "test-deploy-token";

/// Stub runner that records how often it ran.
///
/// The first successful run applies `pending` migrations; later runs find
/// nothing left to apply. A runner built with [`StubRunner::failing`] always
/// fails with the given detail. [`StubRunner::slow`] sleeps before applying.
pub struct StubRunner {
    calls: AtomicUsize,
    finished: AtomicUsize,
    pending: AtomicUsize,
    failure: Option<String>,
    delay: Option<Duration>,
}

impl StubRunner {
    pub fn succeeding(pending: usize) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            finished: AtomicUsize::new(0),
            pending: AtomicUsize::new(pending),
            failure: None,
            delay: None,
        })
    }

    pub fn failing(detail: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            finished: AtomicUsize::new(0),
            pending: AtomicUsize::new(0),
            failure: Some(detail.to_string()),
            delay: None,
        })
    }

    pub fn slow(pending: usize, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            finished: AtomicUsize::new(0),
            pending: AtomicUsize::new(pending),
            failure: None,
            delay: Some(delay),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Runs that reached the end without being dropped.
    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }

    pub fn remaining(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MigrationRunner for StubRunner {
    async fn run(&self) -> Result<MigrationReport, MigrationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let result = match &self.failure {
            Some(detail) => Err(MigrationError::Migrate(detail.clone())),
            None => Ok(MigrationReport {
                applied: self.pending.swap(0, Ordering::SeqCst),
            }),
        };
        self.finished.fetch_add(1, Ordering::SeqCst);
        result
    }
}

/// Build the full application router around `runner`, with [`TEST_TOKEN`]
/// as the configured secret.
pub fn build_test_app(runner: Arc<StubRunner>) -> Router {
    build_test_app_with_token(runner, Some(TEST_TOKEN))
}

/// Build the application router with an explicit (possibly absent) secret.
pub fn build_test_app_with_token(runner: Arc<StubRunner>, token: Option<&str>) -> Router {
    let state = AppState {
        deploy_token: DeployToken::new(token.map(str::to_string)),
        migration_runner: runner,
    };
    build_app_router(state)
}

/// Issue a GET request, optionally carrying a deploy token header.
pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response {
    send(app, Method::GET, uri, token).await
}

pub async fn send(app: Router, method: Method, uri: &str, token: Option<&str>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(DEPLOY_TOKEN_HEADER, token);
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Collect a response body as raw text.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
