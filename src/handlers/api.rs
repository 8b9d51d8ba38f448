use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::{
    extractors::AdminAuth,
    models::{DecisionTree, Node},
    names,
    rejections::{AppError, ResultExt},
    store,
    tree::TreeError,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::TREE_API_URL, get(get_tree).post(replace_tree))
        .route(names::NODES_API_URL, post(add_node))
        .route(
            "/api/decision-tree/nodes/{id}",
            put(update_node).delete(delete_node),
        )
        .route(names::AUTH_CHECK_URL, get(auth_check))
}

/// The full `{ nodes }` document.
async fn get_tree(State(state): State<AppState>) -> Result<Json<DecisionTree>, AppError> {
    let doc = state
        .store
        .load()
        .await
        .reject("failed to fetch decision tree data")?;
    Ok(Json(doc))
}

/// Replace the whole document. The payload must carry a `nodes` array.
async fn replace_tree(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, AppError> {
    if !payload.get("nodes").is_some_and(Value::is_array) {
        return Err(AppError::Input("invalid data format"));
    }

    let doc: DecisionTree =
        serde_json::from_value(payload).reject_input("failed to decode decision tree document")?;

    state
        .store
        .replace(&doc)
        .await
        .reject("failed to update decision tree data")?;

    Ok(Json(json!({ "success": true })))
}

async fn add_node(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Json(node): Json<Node>,
) -> Result<Json<Value>, AppError> {
    let id = node.id.clone();
    state
        .store
        .add_node(node)
        .await
        .reject("failed to add node")?;

    tracing::info!("node {id:?} added");
    Ok(Json(json!({ "success": true })))
}

/// Replace the node with the id from the path. An unknown id is a silent
/// no-op, mirroring the in-memory mutation contract.
async fn update_node(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut node): Json<Node>,
) -> Result<Json<Value>, AppError> {
    node.id = id.clone();
    state
        .store
        .update_node(node)
        .await
        .reject("failed to update node")?;

    tracing::info!("node {id:?} updated");
    Ok(Json(json!({ "success": true })))
}

async fn delete_node(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    if let Err(e) = state.store.delete_node(&id).await {
        return Err(match store::tree_error(&e) {
            Some(TreeError::RootDeletion) => {
                AppError::Forbidden("the root node cannot be deleted")
            }
            Some(TreeError::Referenced { .. }) => AppError::Conflict(e.to_string()),
            _ => {
                tracing::error!("failed to delete node {id:?}: {e}");
                AppError::Internal("failed to delete node")
            }
        });
    }

    tracing::info!("node {id:?} deleted");
    Ok(Json(json!({ "success": true })))
}

/// Credential probe used by the admin login flow: 200 with an authenticated
/// flag, or 401 from the extractor.
async fn auth_check(_auth: AdminAuth) -> Json<Value> {
    Json(json!({ "authenticated": true }))
}
