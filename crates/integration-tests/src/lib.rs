//! Integration test support for Fieldhouse.
//!
//! Provides [`MockBackend`], an in-process axum server standing in for the
//! backend Product and Order services. Tests point the real engine (with
//! its real `reqwest` client) at the mock's ephemeral port and script the
//! responses, so the whole HTTP boundary is exercised end to end.
//!
//! # Example
//!
//! ```rust,ignore
//! let backend = MockBackend::spawn(BackendScript::with_products(json!([...]))).await;
//! let state = AppState::new(StorefrontConfig::for_base_url(backend.base_url.clone()));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::task::JoinHandle;

/// Scripted response for `POST /api/orders`.
#[derive(Debug, Clone)]
pub enum ScriptedOrder {
    /// Confirm the order with the given id.
    Confirm { id: i64 },
    /// Reject the order with a status code and a raw response body.
    Reject { status: u16, body: String },
}

impl Default for ScriptedOrder {
    fn default() -> Self {
        Self::Confirm { id: 1 }
    }
}

/// Scripted behavior and recorded traffic for the mock backend.
#[derive(Debug, Default)]
pub struct BackendScript {
    /// JSON array served by `GET /api/products`.
    products: Mutex<Value>,
    /// Raw query strings seen by `GET /api/products`, in arrival order.
    product_queries: Mutex<Vec<String>>,
    /// Response for `POST /api/orders`.
    order_response: Mutex<ScriptedOrder>,
    /// JSON payloads received by `POST /api/orders`.
    order_payloads: Mutex<Vec<Value>>,
    /// Whether `POST /api/products/seed` succeeds.
    seed_ok: Mutex<bool>,
    /// Product array swapped in by a successful seed call.
    seeded_products: Mutex<Option<Value>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl BackendScript {
    /// Script serving a fixed product array; orders confirm, seeding works.
    #[must_use]
    pub fn with_products(products: Value) -> Self {
        let script = Self::default();
        *lock(&script.products) = products;
        *lock(&script.seed_ok) = true;
        script
    }

    /// Replace the served product array.
    pub fn set_products(&self, products: Value) {
        *lock(&self.products) = products;
    }

    /// Script the order response.
    pub fn set_order_response(&self, response: ScriptedOrder) {
        *lock(&self.order_response) = response;
    }

    /// Script the seed endpoint: whether it succeeds, and the product
    /// array a success swaps in.
    pub fn set_seed(&self, ok: bool, seeded_products: Option<Value>) {
        *lock(&self.seed_ok) = ok;
        *lock(&self.seeded_products) = seeded_products;
    }

    /// Raw query strings `GET /api/products` has seen.
    #[must_use]
    pub fn product_queries(&self) -> Vec<String> {
        lock(&self.product_queries).clone()
    }

    /// Payloads `POST /api/orders` has received.
    #[must_use]
    pub fn order_payloads(&self) -> Vec<Value> {
        lock(&self.order_payloads).clone()
    }
}

/// In-process mock of the backend Product and Order services.
pub struct MockBackend {
    /// Base URL of the listening server (ephemeral port).
    pub base_url: String,
    /// Shared script handle for steering responses mid-test.
    pub script: Arc<BackendScript>,
    handle: JoinHandle<()>,
}

impl MockBackend {
    /// Bind an ephemeral port and serve the scripted backend.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound; tests have no recovery path.
    pub async fn spawn(script: BackendScript) -> Self {
        let script = Arc::new(script);
        let app = Router::new()
            .route("/api/products", get(list_products))
            .route("/api/products/seed", post(seed_products))
            .route("/api/orders", post(submit_order))
            .with_state(Arc::clone(&script));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock backend");
        let addr = listener.local_addr().expect("mock backend has no address");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                // The task is aborted on drop; real serve errors only.
                panic!("mock backend failed: {e}");
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            script,
            handle,
        }
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn list_products(
    State(script): State<Arc<BackendScript>>,
    RawQuery(query): RawQuery,
) -> Json<Value> {
    lock(&script.product_queries).push(query.unwrap_or_default());
    Json(lock(&script.products).clone())
}

async fn seed_products(State(script): State<Arc<BackendScript>>) -> StatusCode {
    if *lock(&script.seed_ok) {
        if let Some(seeded) = lock(&script.seeded_products).clone() {
            *lock(&script.products) = seeded;
        }
        StatusCode::CREATED
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

async fn submit_order(
    State(script): State<Arc<BackendScript>>,
    Json(payload): Json<Value>,
) -> Response {
    lock(&script.order_payloads).push(payload);
    match lock(&script.order_response).clone() {
        ScriptedOrder::Confirm { id } => {
            (StatusCode::CREATED, Json(json!({ "id": id }))).into_response()
        }
        ScriptedOrder::Reject { status, body } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body,
        )
            .into_response(),
    }
}
