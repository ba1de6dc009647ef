mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_reception_lifecycle_over_http() {
    let app = TestApp::spawn().await;
    let employee = app.token_for("employee").await;
    let pvz_id = app.create_pvz("Moscow").await;

    let response = app
        .post_authenticated("/receptions", &employee)
        .json(&json!({ "pvzId": pvz_id }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let reception: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(reception["status"], "in_progress");
    assert_eq!(reception["pvzId"], pvz_id.as_str());

    let mut product_ids = Vec::new();
    for _ in 0..3 {
        let response = app
            .post_authenticated("/products", &employee)
            .json(&json!({ "type": "electronics", "pvzId": pvz_id }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::CREATED);
        let product: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(product["type"], "электроника");
        assert_eq!(product["receptionId"], reception["id"]);
        product_ids.push(product["id"].as_str().unwrap().to_string());
    }

    let response = app
        .post_authenticated(&format!("/pvz/{pvz_id}/delete_last_product"), &employee)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let deleted: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(deleted["id"], product_ids[2].as_str());

    let response = app
        .post_authenticated(&format!("/pvz/{pvz_id}/close_last_reception"), &employee)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let closed: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(closed["status"], "close");

    let response = app
        .post_authenticated("/products", &employee)
        .json(&json!({ "type": "electronics", "pvzId": pvz_id }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let listing: Value = app
        .get_authenticated("/pvz", &employee)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let receptions = listing[0]["receptions"].as_array().unwrap();
    assert_eq!(receptions.len(), 1);
    assert_eq!(receptions[0]["reception"]["status"], "close");
    let products = receptions[0]["products"].as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["id"], product_ids[0].as_str());
    assert_eq!(products[1]["id"], product_ids[1].as_str());
}

#[tokio::test]
async fn test_second_reception_is_rejected() {
    let app = TestApp::spawn().await;
    let employee = app.token_for("employee").await;
    let pvz_id = app.create_pvz("Санкт-Петербург").await;

    let first = app
        .post_authenticated("/receptions", &employee)
        .json(&json!({ "pvzId": pvz_id }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .post_authenticated("/receptions", &employee)
        .json(&json!({ "pvzId": pvz_id }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let body: Value = second.json().await.expect("Failed to parse response");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("active reception"));
}

#[tokio::test]
async fn test_operations_on_unknown_pvz() {
    let app = TestApp::spawn().await;
    let employee = app.token_for("employee").await;
    let missing = "6f1c7a52-3c1e-4c53-9a59-7f0a6f3f9f10";

    let response = app
        .post_authenticated("/receptions", &employee)
        .json(&json!({ "pvzId": missing }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post_authenticated(&format!("/pvz/{missing}/delete_last_product"), &employee)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post_authenticated("/pvz/not-a-uuid/close_last_reception", &employee)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_listing_parameter_validation() {
    let app = TestApp::spawn().await;
    let moderator = app.token_for("moderator").await;

    for query in [
        "?page=0",
        "?limit=0",
        "?limit=31",
        "?startDate=yesterday",
        "?startDate=2025-04-02T00:00:00Z&endDate=2025-04-01T00:00:00Z",
    ] {
        let response = app
            .get_authenticated(&format!("/pvz{query}"), &moderator)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "query {query}");
    }
}

#[tokio::test]
async fn test_listing_empty_store_returns_empty_array() {
    let app = TestApp::spawn().await;
    let employee = app.token_for("employee").await;

    let response = app
        .get_authenticated("/pvz", &employee)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_listing_paginates_newest_first() {
    let app = TestApp::spawn().await;
    let moderator = app.token_for("moderator").await;

    let first = app.create_pvz("Москва").await;
    let second = app.create_pvz("Казань").await;
    let third = app.create_pvz("Санкт-Петербург").await;

    let page: Value = app
        .get_authenticated("/pvz?page=1&limit=2", &moderator)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let ids: Vec<&str> = page
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["pvz"]["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![third.as_str(), second.as_str()]);

    let page: Value = app
        .get_authenticated("/pvz?page=2&limit=2", &moderator)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(page.as_array().unwrap().len(), 1);
    assert_eq!(page[0]["pvz"]["id"], first.as_str());
}
