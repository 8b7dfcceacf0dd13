use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use log::debug;
use serde_json::{json, Value};

use crate::{
    error::AppError,
    pagination::{clamp_page, total_pages_signed, view},
    state::State as AppState,
    types::pagination::{GotoQuery, PaginationQuery, WindowBudget},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pagination))
        .route("/goto", get(goto))
}

/// Button strip for a listing, or `null` when the listing fits on one page.
pub async fn pagination(
    Query(query): Query<PaginationQuery>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let items_per_page = query
        .items_per_page
        .unwrap_or(state.default_page_size.get() as i64);
    let total_pages = total_pages_signed(query.total_items.unwrap_or(0), items_per_page)
        .map_err(AppError::bad_request)?;
    let current_page = clamp_page(query.current_page.unwrap_or(1), total_pages);
    let budget = match (query.budget, query.viewport_width) {
        (Some(budget), _) => WindowBudget::new(budget),
        (None, Some(width)) => state.budgets.budget_for(width),
        (None, None) => state.budgets.narrow,
    };
    debug!(
        "pagination page {}/{} with budget {}",
        current_page,
        total_pages,
        budget.get()
    );

    Ok(Json(json!({
        "data": view(current_page, total_pages, budget),
    })))
}

/// Resolve a navigation request against the listing's current bounds.
pub async fn goto(
    Query(query): Query<GotoQuery>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let items_per_page = query
        .items_per_page
        .unwrap_or(state.default_page_size.get() as i64);
    let total_pages = total_pages_signed(query.total_items.unwrap_or(0), items_per_page)
        .map_err(AppError::bad_request)?;
    let current_page = clamp_page(query.current_page.unwrap_or(1), total_pages);
    let page = clamp_page(query.requested_page, total_pages);

    Ok(Json(json!({
        "data": {
            "page": page,
            "changed": page != current_page,
        },
    })))
}
