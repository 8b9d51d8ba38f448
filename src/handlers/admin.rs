use axum::{extract::State, routing::get, Router};
use maud::Markup;

use crate::{
    names,
    rejections::{AppError, ResultExt},
    views, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route(names::ADMIN_URL, get(admin_panel))
}

async fn admin_panel(State(state): State<AppState>) -> Result<Markup, AppError> {
    let doc = state
        .store
        .load()
        .await
        .reject("could not load decision tree")?;
    let document_json =
        serde_json::to_string_pretty(&doc).reject("could not render document as JSON")?;

    Ok(views::page(
        "Decision Tree Admin",
        views::admin::panel(&doc, &document_json),
    ))
}
