pub mod health;
pub mod messages;
pub mod nav;
pub mod requests;

use crate::AppState;
use axum::Router;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(requests::router())
        .nest("/api/messages", messages::router())
        .nest("/api/nav", nav::router())
}
