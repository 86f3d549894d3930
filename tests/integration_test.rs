mod common;

use common::{create_test_server, focus_json};
use dealership_api::models::Scope;
use dealership_api::repository::CarRepository;
use serde_json::{json, Value};

#[tokio::test]
async fn test_sync_endpoint_publishes_seeded_car() {
    let server = create_test_server().await;
    let token = server.login().await;
    server.write_snapshot(&json!([focus_json(None)]));

    let response = server
        .client
        .post(server.url("/api/cars/sync"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    let status = response.status();
    if status != 200 {
        let error_text = response.text().await.unwrap();
        panic!("Request failed with status {}: {}", status, error_text);
    }
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["synced"], 1);
    assert_eq!(body["failed"], 0);

    let cars: Vec<Value> = server
        .client
        .get(server.url("/api/cars/public"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0]["id"], "c1");
    assert_eq!(cars[0]["status"], "active");
    assert_eq!(cars[0]["images"], json!(["img1.jpg"]));
    assert_eq!(cars[0]["specs"], json!({"engine": "1.5L"}));
}

#[tokio::test]
async fn test_sync_counts_only_rows_written() {
    let server = create_test_server().await;
    let token = server.login().await;
    server.write_snapshot(&json!([
        focus_json(None),
        {"id": "", "brand": "Audi", "model": "A3"},
        {"brand": "Seat", "model": "Ibiza"},
        {"id": "c2", "brand": "Kia", "model": "Rio"}
    ]));

    let body: Value = server
        .client
        .post(server.url("/api/cars/sync"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["synced"], 2);
    assert_eq!(body["failed"], 2);

    let rows = CarRepository::new(server.pool.clone())
        .get_all(Scope::Admin)
        .await
        .expect("Failed to read cars");
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn test_sync_without_snapshot_file_fails() {
    let server = create_test_server().await;
    let token = server.login().await;

    let response = server
        .client
        .post(server.url("/api/cars/sync"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], 500);
}

#[tokio::test]
async fn test_sync_with_corrupt_snapshot_is_server_error() {
    let server = create_test_server().await;
    let token = server.login().await;
    let path = server.cars_json_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "[{\"id\": \"c1\",").unwrap();

    let response = server
        .client
        .post(server.url("/api/cars/sync"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
}

#[tokio::test]
async fn test_sync_endpoint_accepts_null_fields() {
    let server = create_test_server().await;
    let token = server.login().await;
    server.write_snapshot(&json!([
        {"id": "n1", "brand": "Kia", "model": "Rio", "year": null, "images": null, "status": null}
    ]));

    let body: Value = server
        .client
        .post(server.url("/api/cars/sync"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["synced"], 1);
    assert_eq!(body["failed"], 0);

    let cars: Vec<Value> = server
        .client
        .get(server.url("/api/cars/public"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0]["year"], 0);
    assert_eq!(cars[0]["images"], json!([]));
}

#[tokio::test]
async fn test_inactive_car_hidden_from_public_listing() {
    let server = create_test_server().await;
    let token = server.login().await;

    for status in [None, Some("inactive")] {
        let response = server
            .client
            .post(server.url("/api/cars"))
            .bearer_auth(&token)
            .json(&focus_json(status))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"success": true, "id": "c1"}));
    }

    let public: Vec<Value> = server
        .client
        .get(server.url("/api/cars/public"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(public.is_empty());

    let admin: Vec<Value> = server
        .client
        .get(server.url("/api/cars"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(admin.len(), 1);
    assert_eq!(admin[0]["id"], "c1");
    assert_eq!(admin[0]["status"], "inactive");
}

#[tokio::test]
async fn test_save_car_with_missing_fields_is_rejected() {
    let server = create_test_server().await;
    let token = server.login().await;

    let response = server
        .client
        .post(server.url("/api/cars"))
        .bearer_auth(&token)
        .json(&json!({"id": "c1", "brand": "Ford"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        "missing required fields: color, fuel, images, mileage, model, price, specs, transmission, year"
    );

    let rows = CarRepository::new(server.pool.clone())
        .get_all(Scope::Admin)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_get_and_delete_car() {
    let server = create_test_server().await;
    let token = server.login().await;

    server
        .client
        .post(server.url("/api/cars"))
        .bearer_auth(&token)
        .json(&focus_json(None))
        .send()
        .await
        .unwrap();

    let car: Value = server
        .client
        .get(server.url("/api/cars/c1"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(car["brand"], "Ford");
    assert_eq!(car["images"][0], "img1.jpg");

    for _ in 0..2 {
        let response = server
            .client
            .delete(server.url("/api/cars/c1"))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], true);
    }

    let missing = server
        .client
        .get(server.url("/api/cars/c1"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);
}

#[tokio::test]
async fn test_delete_nonexistent_car_leaves_store_unchanged() {
    let server = create_test_server().await;
    let token = server.login().await;
    server
        .client
        .post(server.url("/api/cars"))
        .bearer_auth(&token)
        .json(&focus_json(None))
        .send()
        .await
        .unwrap();

    let response = server
        .client
        .delete(server.url("/api/cars/nonexistent"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let rows = CarRepository::new(server.pool.clone())
        .get_all(Scope::Admin)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "c1");
}

#[tokio::test]
async fn test_admin_car_routes_require_token() {
    let server = create_test_server().await;

    let missing = server.client.get(server.url("/api/cars")).send().await.unwrap();
    assert_eq!(missing.status(), 401);
    let body: Value = missing.json().await.unwrap();
    assert_eq!(body["error"], "Access denied. No token provided.");

    let invalid = server
        .client
        .post(server.url("/api/cars"))
        .bearer_auth("not-a-jwt")
        .json(&focus_json(None))
        .send()
        .await
        .unwrap();
    assert_eq!(invalid.status(), 403);

    let sync = server.client.post(server.url("/api/cars/sync")).send().await.unwrap();
    assert_eq!(sync.status(), 401);

    let public = server.client.get(server.url("/api/cars/public")).send().await.unwrap();
    assert_eq!(public.status(), 200);
}
