//! Navigation menu API
//!
//! - GET /api/nav       - Menu tree, filtered by `?visibility=`
//! - GET /api/nav/:id   - One entry with its subtree

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::types::NavItem;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct NavQuery {
    pub visibility: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(menu))
        .route("/:id", get(entry))
}

async fn menu(State(state): State<AppState>, Query(query): Query<NavQuery>) -> Json<Vec<NavItem>> {
    Json(state.menu.visible_to(query.visibility.as_deref()))
}

async fn entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<NavQuery>,
) -> Result<Json<NavItem>> {
    state
        .menu
        .find(&id)
        .and_then(|item| item.filter_visibility(query.visibility.as_deref()))
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Navigation entry '{}'", id)))
}
