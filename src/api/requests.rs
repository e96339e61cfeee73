//! Requests pages.
//!
//! - GET /requests/moderationRequest/:id - Detail page props for one moderation request

use axum::{
    extract::{rejection::PathRejection, Path},
    routing::get,
    Json, Router,
};

use crate::error::{AppError, Result};
use crate::services::detail_page;
use crate::types::{DetailPage, RouteParams};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/requests/moderationRequest/:id", get(moderation_request))
}

async fn moderation_request(
    params: std::result::Result<Path<RouteParams>, PathRejection>,
) -> Result<Json<DetailPage>> {
    let resolved = async move {
        params
            .map(|Path(params)| params)
            .map_err(|rejection| AppError::RouteParams(rejection.body_text()))
    };
    detail_page::moderation_request_page(resolved).await.map(Json)
}
