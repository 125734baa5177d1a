use std::sync::Arc;

use super::*;
use crate::net::token_store::MemoryTokenStore;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), Arc::new(MemoryTokenStore::with_token("abc"))).unwrap()
}

#[test]
fn item_paths_embed_id() {
    assert_eq!(inventory_item_path(12), "/inventory/12");
    assert_eq!(check_out_path(12), "/inventory/12/check-out");
    assert_eq!(check_in_path(12), "/inventory/12/check-in");
}

#[tokio::test]
async fn list_inventory_encodes_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inventory"))
        .and(query_param("status", "available"))
        .and(query_param("search", "pump 2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let params = vec![
        ("status".to_owned(), "available".to_owned()),
        ("search".to_owned(), "pump 2".to_owned()),
    ];
    let value = client_for(&server).list_inventory(&params).await.unwrap();
    assert_eq!(value, serde_json::json!({ "items": [] }));
}

#[tokio::test]
async fn list_inventory_without_params_has_no_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inventory"))
        .respond_with(|req: &Request| {
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "query": req.url.query() }))
        })
        .mount(&server)
        .await;

    let value = client_for(&server).list_inventory(&Vec::new()).await.unwrap();
    assert_eq!(value["query"], Value::Null);
}

#[tokio::test]
async fn check_out_posts_payload() {
    let server = MockServer::start().await;
    let payload = serde_json::json!({ "job_id": 4, "quantity": 1 });
    Mock::given(method("POST"))
        .and(path("/inventory/12/check-out"))
        .and(body_json(payload.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "in-use" })))
        .expect(1)
        .mount(&server)
        .await;

    let value = client_for(&server).check_out_item(12, &payload).await.unwrap();
    assert_eq!(value["status"], "in-use");
}

#[tokio::test]
async fn update_and_delete_use_item_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/inventory/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": 3 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/inventory/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "message": "deleted" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.update_inventory_item(3, &serde_json::json!({ "name": "Hose" })).await.unwrap();
    let value = client.delete_inventory_item(3).await.unwrap();
    assert_eq!(value["message"], "deleted");
}
