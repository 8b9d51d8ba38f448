use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use maud::Markup;
use serde::Deserialize;

use crate::{
    extractors::IsHtmx,
    rejections::{AppError, ResultExt},
    tree::{self, TreeIndex, Walk},
    views, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(walk_page))
}

#[derive(Deserialize)]
struct WalkQuery {
    /// Comma-joined node ids of a shared traversal.
    #[serde(default)]
    path: Option<String>,
    /// Terminal node id of a shared traversal.
    #[serde(default)]
    node: Option<String>,
}

async fn walk_page(
    IsHtmx(is_htmx): IsHtmx,
    State(state): State<AppState>,
    Query(query): Query<WalkQuery>,
) -> Result<Markup, AppError> {
    let doc = state
        .store
        .load()
        .await
        .reject("could not load decision tree")?;
    let index = TreeIndex::new(&doc);

    let mut walk = match query.path.as_deref() {
        Some(raw) => Walk::replay(&index, tree::split_path_param(raw)),
        None => Walk::start(&index),
    }
    .map_err(|e| {
        tracing::error!("could not start walk: {e}");
        AppError::NotFound("the decision tree has no root node")
    })?;

    // Shared links repeat the path tail in `node`; when it differs, take one
    // extra step to it if an option of the current node leads there.
    if let Some(node_id) = query.node.as_deref() {
        if node_id != walk.current().id {
            let current = walk.current();
            let chosen = current
                .options
                .iter()
                .find(|opt| opt.next_node_id.as_deref() == Some(node_id));
            if let Some(option) = chosen {
                walk.advance(option);
            }
        }
    }

    let title = if walk.current().is_leaf {
        "Your Recommendation"
    } else {
        "Solution Finder"
    };

    Ok(views::render(is_htmx, title, views::walk::walk(&walk)))
}
