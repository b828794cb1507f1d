use axum::routing::{get, put};
use axum::Router;

use crate::handlers::exchanges;
use crate::state::AppState;

/// Routes mounted at `/exchanges`.
///
/// ```text
/// GET    /        -> list_exchanges
/// POST   /        -> create_exchange
/// PUT    /{id}    -> update_exchange
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(exchanges::list_exchanges).post(exchanges::create_exchange),
        )
        .route("/{id}", put(exchanges::update_exchange))
}
