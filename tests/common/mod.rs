#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use anyhow::Result;
use gorest_api_tests::{ClientConfig, GorestClient};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const MOCK_TOKEN: &str = "test-token";
pub const MOCK_USER_ID: u64 = 7_000_001;

static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Client for the public service. A missing token is not checked here; the
/// service's 401 fails the test instead.
pub fn live_client() -> Result<GorestClient> {
    init_tracing();
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env()?;
    Ok(GorestClient::new(config)?)
}

/// Collects formatted log lines for assertions
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Install as the subscriber for the current thread until the guard drops
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub fn mock_client(server: &MockServer) -> Result<GorestClient> {
    init_tracing();
    let config = ClientConfig::new(format!("{}/public/v2", server.uri()), MOCK_TOKEN)?;
    Ok(GorestClient::new(config)?)
}

/// Echoes the request body back with an `id`, like a successful create
pub struct EchoUser {
    pub status: u16,
    pub id: Option<u64>,
}

impl Respond for EchoUser {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        if let (Some(id), Some(fields)) = (self.id, body.as_object_mut()) {
            fields.insert("id".to_string(), json!(id));
        }
        ResponseTemplate::new(self.status).set_body_json(body)
    }
}

/// One user record shared by the create, read, update and delete routes.
///
/// POST stores the record, PUT overwrites its fields, DELETE clears it and
/// GET answers 404 once it is cleared.
#[derive(Clone, Default)]
pub struct UserStore {
    record: Arc<Mutex<Option<Value>>>,
}

impl UserStore {
    pub fn current(&self) -> Option<Value> {
        self.record.lock().unwrap().clone()
    }
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({"message": "Resource not found"}))
}

impl Respond for UserStore {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut record = self.record.lock().unwrap();
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);

        match request.method.as_str() {
            "POST" => {
                let mut user = body;
                if let Some(fields) = user.as_object_mut() {
                    fields.insert("id".to_string(), json!(MOCK_USER_ID));
                }
                *record = Some(user.clone());
                ResponseTemplate::new(201).set_body_json(user)
            }
            "GET" => match record.as_ref() {
                Some(user) => ResponseTemplate::new(200).set_body_json(user.clone()),
                None => not_found(),
            },
            "PUT" => match (record.as_mut(), body.as_object()) {
                (Some(Value::Object(user)), Some(changes)) => {
                    for (field, value) in changes {
                        user.insert(field.clone(), value.clone());
                    }
                    ResponseTemplate::new(200).set_body_json(Value::Object(user.clone()))
                }
                (Some(_), _) => ResponseTemplate::new(422).set_body_json(json!([])),
                (None, _) => not_found(),
            },
            "DELETE" => match record.take() {
                Some(_) => ResponseTemplate::new(204),
                None => not_found(),
            },
            _ => ResponseTemplate::new(405),
        }
    }
}

/// A stand-in for the users resource that behaves like the public service
/// for one create/read/update/delete cycle. Every route requires the bearer
/// token; anything else falls through to wiremock's empty 404.
pub async fn mock_gorest() -> MockServer {
    mock_gorest_with_store().await.0
}

pub async fn mock_gorest_with_store() -> (MockServer, UserStore) {
    let server = MockServer::start().await;
    let store = UserStore::default();
    let auth = format!("Bearer {}", MOCK_TOKEN);
    let collection = "/public/v2/users";
    let resource = format!("/public/v2/users/{}", MOCK_USER_ID);

    Mock::given(method("GET"))
        .and(path(collection))
        .and(header("Authorization", auth.as_str()))
        .respond_with({
            let store = store.clone();
            move |_: &Request| {
                let users: Vec<Value> = store.current().into_iter().collect();
                ResponseTemplate::new(200).set_body_json(users)
            }
        })
        .mount(&server)
        .await;

    // The taken address is matched before the generic create below
    Mock::given(method("POST"))
        .and(path(collection))
        .and(header("Authorization", auth.as_str()))
        .and(body_partial_json(json!({"email": "johndoe@example.com"})))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!([
            {"field": "email", "message": "has already been taken"}
        ])))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(collection))
        .and(header("Authorization", auth.as_str()))
        .respond_with(store.clone())
        .with_priority(2)
        .mount(&server)
        .await;

    Mock::given(path(resource.as_str()))
        .and(header("Authorization", auth.as_str()))
        .respond_with(store.clone())
        .mount(&server)
        .await;

    (server, store)
}
