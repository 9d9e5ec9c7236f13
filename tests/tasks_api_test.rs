use std::sync::Arc;

use serde_json::{json, Value};

use taskserver::main_module::build_router;
use taskserver::shared::state::AppState;
use taskserver::tasks::MemoryTaskStore;

async fn spawn_server() -> String {
    let app_state = Arc::new(AppState {
        tasks: Arc::new(MemoryTaskStore::new()),
    });
    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("failed to read listener addr");

    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .await
            .expect("test server failed");
    });

    format!("http://{}", addr)
}

async fn create_task(client: &reqwest::Client, base: &str, body: Value) -> reqwest::Response {
    client
        .post(format!("{}/api/tasks", base))
        .json(&body)
        .send()
        .await
        .expect("create request failed")
}

#[tokio::test]
async fn test_create_returns_201_with_assigned_id() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = create_task(
        &client,
        &base,
        json!({"title": "Buy milk", "description": "2 liters"}),
    )
    .await;
    assert_eq!(response.status().as_u16(), 201);

    let first: Value = response.json().await.unwrap();
    assert!(first["id"].is_string());
    assert_eq!(first["title"], "Buy milk");
    assert_eq!(first["description"], "2 liters");
    assert_eq!(first["completed"], false);

    let second: Value = create_task(&client, &base, json!({"title": "Walk the dog"}))
        .await
        .json()
        .await
        .unwrap();
    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn test_create_without_title_returns_400() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = create_task(&client, &base, json!({"description": "no title"})).await;
    assert_eq!(response.status().as_u16(), 400);

    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("title"));
}

#[tokio::test]
async fn test_get_unknown_id_returns_404() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!(
            "{}/api/tasks/00000000-0000-0000-0000-000000000000",
            base
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_partial_update_changes_only_supplied_fields() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let created: Value = create_task(
        &client,
        &base,
        json!({"title": "Write report", "description": "quarterly numbers"}),
    )
    .await
    .json()
    .await
    .unwrap();
    let id = created["id"].as_str().unwrap();

    let response = client
        .patch(format!("{}/api/tasks/{}", base, id))
        .json(&json!({"completed": true}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let fetched: Value = client
        .get(format!("{}/api/tasks/{}", base, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["completed"], true);
    assert_eq!(fetched["title"], "Write report");
    assert_eq!(fetched["description"], "quarterly numbers");
    assert_eq!(fetched["created_at"], created["created_at"]);
    assert_ne!(fetched["updated_at"], created["updated_at"]);
}

#[tokio::test]
async fn test_update_with_empty_title_returns_400() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let created: Value = create_task(&client, &base, json!({"title": "keep me"}))
        .await
        .json()
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap();

    let response = client
        .patch(format!("{}/api/tasks/{}", base, id))
        .json(&json!({"title": ""}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let fetched: Value = client
        .get(format!("{}/api/tasks/{}", base, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["title"], "keep me");
}

#[tokio::test]
async fn test_update_unknown_id_returns_404() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .patch(format!(
            "{}/api/tasks/00000000-0000-0000-0000-000000000000",
            base
        ))
        .json(&json!({"completed": true}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn test_delete_returns_204_then_404() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let created: Value = create_task(&client, &base, json!({"title": "ephemeral"}))
        .await
        .json()
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap();

    let response = client
        .delete(format!("{}/api/tasks/{}", base, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let response = client
        .get(format!("{}/api/tasks/{}", base, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let response = client
        .delete(format!("{}/api/tasks/{}", base, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn test_list_returns_all_created_tasks_in_order() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    for i in 1..=5 {
        let response = create_task(&client, &base, json!({"title": format!("task {}", i)})).await;
        assert_eq!(response.status().as_u16(), 201);
    }

    let tasks: Vec<Value> = client
        .get(format!("{}/api/tasks", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(tasks.len(), 5);
    let titles: Vec<&str> = tasks.iter().map(|t| t["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["task 1", "task 2", "task 3", "task 4", "task 5"]);
}

#[tokio::test]
async fn test_stats_and_clear_completed() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let done: Value = create_task(&client, &base, json!({"title": "done", "completed": true}))
        .await
        .json()
        .await
        .unwrap();
    create_task(&client, &base, json!({"title": "open"})).await;

    let stats: Value = client
        .get(format!("{}/api/tasks/stats", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["active"], 1);
    assert_eq!(stats["completed"], 1);

    let response = client
        .delete(format!("{}/api/tasks/completed", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["deleted"], 1);

    let response = client
        .get(format!("{}/api/tasks/{}", base, done["id"].as_str().unwrap()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn test_health_reports_healthy() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "taskserver");
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn test_landing_page_is_served() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client.get(format!("{}/", base)).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));
    assert!(response.text().await.unwrap().contains("taskForm"));
}
