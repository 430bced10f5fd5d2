use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::app::docs;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(crate::core::http::routes())
        .nest("/api/notes", crate::notes::http::routes())
        .nest("/api/users", crate::users::http::routes())
        .nest("/api/login", crate::auth::http::routes())
        .route("/docs", get(docs::swagger_ui))
        .route("/api-docs/openapi.json", get(docs::openapi_spec))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
