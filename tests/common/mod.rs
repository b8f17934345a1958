//! Helpers for integration tests.
//!
//! [`StubStore`] runs a small HTTP server that answers the REST, storage and
//! notification calls made by the application and records every request.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use pushkind_classifieds::models::config::StoreConfig;
use pushkind_classifieds::notifications::HttpNotifier;
use pushkind_classifieds::repository::RestRepository;
use serde_json::{Value, json};

pub const BUCKET: &str = "listing-images";

/// Request received by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body should be JSON")
    }
}

#[derive(Default)]
struct StubState {
    rows: Mutex<Vec<Value>>,
    requests: Mutex<Vec<RecordedRequest>>,
    fail_queries: Mutex<bool>,
    fail_inserts: Mutex<bool>,
    fail_uploads: Mutex<bool>,
    fail_notifications: Mutex<bool>,
}

impl StubState {
    fn record(&self, req: &HttpRequest, body: &[u8]) {
        let query = web::Query::<HashMap<String, String>>::from_query(req.query_string())
            .map(|q| q.into_inner())
            .unwrap_or_default();
        let headers = req
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        self.requests.lock().unwrap().push(RecordedRequest {
            method: req.method().to_string(),
            path: req.path().to_string(),
            query,
            headers,
            body: body.to_vec(),
        });
    }

    fn flag(flag: &Mutex<bool>) -> bool {
        *flag.lock().unwrap()
    }
}

async fn select_rows(
    req: HttpRequest,
    query: web::Query<HashMap<String, String>>,
    state: web::Data<StubState>,
) -> HttpResponse {
    state.record(&req, &[]);
    if StubState::flag(&state.fail_queries) {
        return HttpResponse::ServiceUnavailable().body("store unavailable");
    }

    let rows = state.rows.lock().unwrap().clone();
    let rows: Vec<Value> = match query.get("id").and_then(|f| f.strip_prefix("eq.")) {
        // Mirrors an integer `id` column.
        Some(id) if id.parse::<i64>().is_err() => {
            return HttpResponse::BadRequest().json(json!({
                "code": "22P02",
                "message": format!("invalid input syntax for type bigint: \"{id}\""),
            }));
        }
        Some(id) => rows
            .into_iter()
            .filter(|row| match &row["id"] {
                Value::String(s) => s == id,
                other => other.to_string() == id,
            })
            .collect(),
        None => rows,
    };
    HttpResponse::Ok().json(rows)
}

async fn insert_rows(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<StubState>,
) -> HttpResponse {
    state.record(&req, &body);
    if StubState::flag(&state.fail_inserts) {
        return HttpResponse::InternalServerError().body("insert rejected");
    }
    HttpResponse::Created().finish()
}

async fn upload_object(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    body: web::Bytes,
    state: web::Data<StubState>,
) -> HttpResponse {
    state.record(&req, &body);
    if StubState::flag(&state.fail_uploads) {
        return HttpResponse::BadRequest().json(json!({ "error": "upload rejected" }));
    }
    let (bucket, key) = path.into_inner();
    HttpResponse::Ok().json(json!({ "Key": format!("{bucket}/{key}") }))
}

async fn notify(req: HttpRequest, body: web::Bytes, state: web::Data<StubState>) -> HttpResponse {
    state.record(&req, &body);
    if StubState::flag(&state.fail_notifications) {
        return HttpResponse::InternalServerError().finish();
    }
    HttpResponse::Ok().finish()
}

/// Running stub of the hosted store and the notification endpoint.
pub struct StubStore {
    state: web::Data<StubState>,
    base_url: String,
    handle: ServerHandle,
}

impl StubStore {
    /// Start the stub on an ephemeral local port.
    pub async fn start() -> Self {
        let state = web::Data::new(StubState::default());
        let app_state = state.clone();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .route("/rest/v1/{table}", web::get().to(select_rows))
                .route("/rest/v1/{table}", web::post().to(insert_rows))
                .route(
                    "/storage/v1/object/{bucket}/{key:.*}",
                    web::post().to(upload_object),
                )
                .route("/notify", web::post().to(notify))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("stub should bind");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            state,
            base_url: format!("http://{addr}"),
            handle,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            url: self.base_url.clone(),
            api_key: "test-key".to_string(),
            listings_table: "listings".to_string(),
            messages_table: "messages".to_string(),
            image_bucket: BUCKET.to_string(),
        }
    }

    pub fn repository(&self) -> RestRepository {
        RestRepository::with_client(reqwest::Client::new(), self.store_config())
    }

    pub fn notifier(&self) -> HttpNotifier {
        HttpNotifier::new(reqwest::Client::new(), format!("{}/notify", self.base_url))
    }

    /// Add a raw row to the `listings` table.
    pub fn insert_row(&self, row: Value) {
        self.state.rows.lock().unwrap().push(row);
    }

    pub fn fail_queries(&self) {
        *self.state.fail_queries.lock().unwrap() = true;
    }

    pub fn fail_inserts(&self) {
        *self.state.fail_inserts.lock().unwrap() = true;
    }

    pub fn fail_uploads(&self) {
        *self.state.fail_uploads.lock().unwrap() = true;
    }

    pub fn fail_notifications(&self) {
        *self.state.fail_notifications.lock().unwrap() = true;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Requests whose path starts with `prefix`.
    pub fn requests_to(&self, prefix: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.starts_with(prefix))
            .collect()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Listing row in the shape returned by `select=*`.
pub fn listing_row(id: i64, title: &str, category: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "",
        "price": 150,
        "category": category,
        "seller_email": "s@z.com",
        "image_url": "",
        "location": null,
        "created_at": created_at,
    })
}
