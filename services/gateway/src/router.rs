use crate::handlers::{matches, ratings};
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let api_routes: Router<AppState> = Router::new()
        .route(
            "/matches",
            get(matches::list_matches)
                .post(matches::record_match)
                .delete(matches::delete_match)
                .fallback(matches::unsupported),
        )
        .route(
            "/ratings",
            get(ratings::get_ratings).fallback(ratings::unsupported),
        );

    Router::new()
        .merge(api_routes.clone())
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
