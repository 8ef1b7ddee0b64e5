//! Share page shown to the organizer after creating an event.

use axum::extract::State;
use axum::response::{IntoResponse, Response};

use super::params::QueryParams;
use super::{load_event, not_found};
use crate::error::AppError;
use crate::render;
use crate::state::AppState;

/// Handle `GET /share`.
pub async fn share_page(
    State(state): State<AppState>,
    query: Result<QueryParams, AppError>,
) -> Response {
    let params = match query {
        Ok(QueryParams(params)) => params,
        Err(err) => return err.into_page(&state.renderer),
    };

    let Some(event_id) = params.first("event") else {
        return not_found().await.into_response();
    };

    match load_event(&state, event_id).await {
        Ok(event) => state
            .renderer
            .render(render::share::share(&event, &state.config.base_url))
            .into_response(),
        Err(err) => err.into_page(&state.renderer),
    }
}
