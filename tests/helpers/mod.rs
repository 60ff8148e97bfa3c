//! In-process mock backend for integration tests
//!
//! Serves the same REST surface the real creativity backend exposes,
//! backed by in-memory vectors, with failure injection switches and a
//! delete-call counter for asserting request traffic.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct BackendState {
    pub users: Vec<Value>,
    pub paths: Vec<Value>,
    pub next_id: i64,
    pub delete_calls: usize,
    pub fail_lists: bool,
    pub fail_creates: bool,
    pub fail_deletes: bool,
    /// Ids whose DELETE always fails, for partial-failure scenarios
    pub fail_delete_ids: HashSet<String>,
}

type Shared = Arc<Mutex<BackendState>>;

pub struct TestBackend {
    pub base_url: String,
    state: Shared,
}

impl TestBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(BackendState {
            next_id: 1,
            ..Default::default()
        }));

        let app = Router::new()
            .route("/users", get(list_users).post(create_user))
            .route("/users/:id", delete(delete_user))
            .route("/creativity-paths", get(list_paths).post(create_path))
            .route("/creativity-paths/:id", delete(delete_path))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend serve");
        });

        TestBackend {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn delete_calls(&self) -> usize {
        self.state.lock().unwrap().delete_calls
    }

    pub fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    pub fn path_count(&self) -> usize {
        self.state.lock().unwrap().paths.len()
    }

    pub fn set_fail_lists(&self, fail: bool) {
        self.state.lock().unwrap().fail_lists = fail;
    }

    pub fn set_fail_creates(&self, fail: bool) {
        self.state.lock().unwrap().fail_creates = fail;
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.state.lock().unwrap().fail_deletes = fail;
    }

    pub fn fail_delete_of(&self, id: &str) {
        self.state
            .lock()
            .unwrap()
            .fail_delete_ids
            .insert(id.to_string());
    }

    /// Insert a path directly, bypassing the client (e.g. to seed a
    /// dangling user reference left behind by another client)
    pub fn seed_path(&self, user_id: Value, misfit: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        state.paths.push(json!({
            "id": id,
            "user_id": user_id,
            "misfit": misfit,
        }));
        id
    }
}

fn id_matches(record: &Value, wanted: &str) -> bool {
    match record.get("id") {
        Some(Value::Number(n)) => n.to_string() == wanted,
        Some(Value::String(s)) => s == wanted,
        _ => false,
    }
}

async fn list_users(State(state): State<Shared>) -> Result<Json<Vec<Value>>, StatusCode> {
    let state = state.lock().unwrap();
    if state.fail_lists {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(state.users.clone()))
}

async fn list_paths(State(state): State<Shared>) -> Result<Json<Vec<Value>>, StatusCode> {
    let state = state.lock().unwrap();
    if state.fail_lists {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(state.paths.clone()))
}

fn create_record(state: &Shared, body: Value, is_user: bool) -> Result<Json<Value>, StatusCode> {
    let mut state = state.lock().unwrap();
    if state.fail_creates {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let mut record = body;
    if !record.is_object() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let id = state.next_id;
    state.next_id += 1;
    // Backend-assigned identity is numeric on the wire
    record["id"] = json!(id);

    if is_user {
        state.users.push(record.clone());
    } else {
        state.paths.push(record.clone());
    }
    Ok(Json(record))
}

async fn create_user(
    State(state): State<Shared>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    create_record(&state, body, true)
}

async fn create_path(
    State(state): State<Shared>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    create_record(&state, body, false)
}

fn delete_record(state: &Shared, id: &str, is_user: bool) -> StatusCode {
    let mut state = state.lock().unwrap();
    state.delete_calls += 1;
    if state.fail_deletes || state.fail_delete_ids.contains(id) {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    let records = if is_user {
        &mut state.users
    } else {
        &mut state.paths
    };
    // Unknown ids succeed vacuously
    records.retain(|r| !id_matches(r, id));
    StatusCode::NO_CONTENT
}

async fn delete_user(State(state): State<Shared>, Path(id): Path<String>) -> StatusCode {
    delete_record(&state, &id, true)
}

async fn delete_path(State(state): State<Shared>, Path(id): Path<String>) -> StatusCode {
    delete_record(&state, &id, false)
}
