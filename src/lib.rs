pub mod extractors;
pub mod handlers;
pub mod models;
pub mod names;
pub mod rejections;
pub mod statics;
pub mod store;
pub mod tree;
pub mod utils;
pub mod views;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    Router,
};

#[derive(Clone)]
pub struct AppState {
    pub store: store::Store,
    pub admin: AdminCredentials,
}

/// The single admin username/password pair, shared by the `/admin` edge gate
/// and the API-side credential checks.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn check(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }

    pub fn matches_headers(&self, headers: &HeaderMap) -> bool {
        use axum_extra::headers::{authorization::Basic, Authorization, HeaderMapExt};

        headers
            .typed_get::<Authorization<Basic>>()
            .is_some_and(|auth| self.check(auth.username(), auth.password()))
    }
}

pub fn router(state: AppState) -> Router {
    let admin_pages = handlers::admin::routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        admin_gate,
    ));

    Router::new()
        .merge(handlers::walk::routes())
        .merge(handlers::api::routes())
        .merge(admin_pages)
        .nest("/static", statics::routes())
        .with_state(state)
}

/// Network-edge gate for the admin path prefix: demand Basic credentials and
/// answer failures with a browser challenge.
async fn admin_gate(
    State(state): State<AppState>,
    req: axum::http::Request<axum::body::Body>,
    next: middleware::Next,
) -> Response {
    if state.admin.matches_headers(req.headers()) {
        return next.run(req).await;
    }

    tracing::debug!("rejected unauthenticated request to {}", req.uri().path());
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, names::AUTH_CHALLENGE)],
        "Authentication required",
    )
        .into_response()
}
