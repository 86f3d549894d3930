#![allow(dead_code)]

use dealership_api::{app, config::Config, db, state::AppState};
use reqwest::Client;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

pub const JWT_SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub addr: SocketAddr,
    pub pool: SqlitePool,
    pub root: TempDir,
    pub client: Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn cars_json_path(&self) -> std::path::PathBuf {
        self.root.path().join("assets/data/cars.json")
    }

    pub fn write_snapshot(&self, cars: &Value) {
        let path = self.cars_json_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, serde_json::to_string_pretty(cars).unwrap()).unwrap();
    }

    pub async fn login(&self) -> String {
        let response = self
            .client
            .post(self.url("/api/admin/login"))
            .json(&json!({"username": "admin", "password": "admin123"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }
}

pub async fn create_test_server() -> TestServer {
    let root = tempfile::tempdir().expect("Failed to create temp site dir");
    let config = Config::for_root(root.path(), JWT_SECRET);

    let pool = db::memory_pool().await.expect("Failed to open test database");
    let state = AppState::new(pool.clone(), config.clone());
    state
        .auth
        .ensure_default_admin(&config.admin_username, &config.admin_password)
        .await
        .expect("Failed to create default admin");

    let app = app::router(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let mut retries = 0;
    while retries < 10 {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        retries += 1;
    }

    TestServer {
        addr,
        pool,
        root,
        client: Client::new(),
    }
}

pub fn focus_json(status: Option<&str>) -> Value {
    let mut car = json!({
        "id": "c1",
        "brand": "Ford",
        "model": "Focus",
        "year": 2020,
        "price": 15000,
        "mileage": 30000,
        "fuel": "Gas",
        "transmission": "Manual",
        "color": "Red",
        "images": ["img1.jpg"],
        "specs": {"engine": "1.5L"}
    });
    if let Some(status) = status {
        car["status"] = json!(status);
    }
    car
}
