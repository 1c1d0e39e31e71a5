//! Integration tests for the tree endpoints.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_empty_tree() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/tree", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "success": true, "data": [] }));
}

#[tokio::test]
async fn test_create_folder_returns_node() {
    let app = TestApp::new();
    let response = app
        .request("POST", "/api/folder", Some(json!({ "name": "  Projects " })))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    let node = &response.body["data"];
    assert_eq!(node["name"], "Projects");
    assert_eq!(node["type"], "folder");
    assert_eq!(node["parentId"], serde_json::Value::Null);
    assert!(node["createdAt"].is_string());
    assert!(node["updatedAt"].is_string());
}

#[tokio::test]
async fn test_empty_parent_id_means_root() {
    let app = TestApp::new();
    let response = app
        .request("POST", "/api/file", Some(json!({ "name": "a.txt", "parentId": "" })))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["parentId"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_create_validation_errors() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/folder", Some(json!({ "name": "   " })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body,
        json!({ "success": false, "message": "Folder name is required" })
    );

    let response = app
        .request("POST", "/api/file", Some(json!({ "name": "x", "parentId": "123" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Invalid parent ID");

    let response = app
        .raw_request("POST", "/api/file", "{not json".to_string())
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["message"], "Invalid request body");
}

#[tokio::test]
async fn test_create_under_missing_or_file_parent() {
    let app = TestApp::new();
    let file_id = app.create("file", "plain.txt", None).await;

    let response = app
        .request(
            "POST",
            "/api/file",
            Some(json!({ "name": "x", "parentId": "00000000-0000-0000-0000-000000000001" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Parent folder not found");

    let response = app
        .request(
            "POST",
            "/api/folder",
            Some(json!({ "name": "x", "parentId": file_id })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Parent must be a folder");
}

#[tokio::test]
async fn test_duplicate_name_conflict() {
    let app = TestApp::new();
    let parent = app.create("folder", "P", None).await;
    app.create("folder", "Notes", Some(&parent)).await;

    let response = app
        .request(
            "POST",
            "/api/folder",
            Some(json!({ "name": "Notes", "parentId": parent })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.body["message"],
        "A folder with this name already exists here"
    );
}

#[tokio::test]
async fn test_rename() {
    let app = TestApp::new();
    let id = app.create("file", "draft.md", None).await;
    app.create("file", "taken.md", None).await;

    let response = app
        .request("PUT", "/api/rename", Some(json!({ "id": id, "name": " final.md " })))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "final.md");
    assert_eq!(response.body["data"]["id"], id.as_str());

    let response = app
        .request("PUT", "/api/rename", Some(json!({ "id": id, "name": "taken.md" })))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.body["message"],
        "A node with this name already exists here"
    );

    let response = app
        .request("PUT", "/api/rename", Some(json!({ "name": "x" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Valid node ID is required");

    let response = app
        .request(
            "PUT",
            "/api/rename",
            Some(json!({ "id": "00000000-0000-0000-0000-000000000002", "name": "x" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Node not found");
}

#[tokio::test]
async fn test_rename_to_same_name_is_noop() {
    let app = TestApp::new();
    let id = app.create("folder", "Same", None).await;

    let response = app
        .request("PUT", "/api/rename", Some(json!({ "id": id, "name": "Same " })))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "Same");
}

#[tokio::test]
async fn test_delete_folder_removes_subtree() {
    let app = TestApp::new();
    let a = app.create("folder", "A", None).await;
    app.create("file", "b.txt", Some(&a)).await;
    app.create("file", "keep.txt", None).await;

    let response = app.request("DELETE", &format!("/api/node/{a}"), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "success": true, "message": "Node deleted successfully" })
    );

    assert_eq!(app.tree_names().await, vec!["keep.txt".to_string()]);
}

#[tokio::test]
async fn test_delete_errors() {
    let app = TestApp::new();

    let response = app.request("DELETE", "/api/node/not-a-uuid", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Invalid node ID");

    let response = app
        .request("DELETE", "/api/node/00000000-0000-0000-0000-000000000003", None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Node not found");
}

#[tokio::test]
async fn test_tree_lists_in_creation_order() {
    let app = TestApp::new();
    app.create("file", "z.txt", None).await;
    let dir = app.create("folder", "a", None).await;
    app.create("file", "inner", Some(&dir)).await;

    assert_eq!(app.tree_names().await, vec!["z.txt", "a", "inner"]);
}

#[tokio::test]
async fn test_health_and_unknown_route() {
    let app = TestApp::new();

    let response = app.request("GET", "/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "Server is running");
    assert_eq!(response.body["store"]["provider"], "memory");
    assert_eq!(response.body["store"]["healthy"], true);

    let response = app.request("GET", "/api/nope", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_wrong_method_uses_envelope() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/folder", None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["message"], "Method not allowed");

    let response = app.request("POST", "/api/node/abc", None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body["success"], false);
}
