pub mod health;
pub mod notes;

use std::sync::Arc;

use axum::Router;
use quadboard_service::LocalService;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub struct InnerAppState {
    pub service: LocalService,
}

pub type AppState = Arc<InnerAppState>;

pub fn build_router(service: LocalService) -> Router {
    let state = Arc::new(InnerAppState { service });

    Router::new()
        .merge(health::routes())
        .merge(notes::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
