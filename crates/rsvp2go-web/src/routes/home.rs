//! Landing page. With `?event=<id>` the same path serves the RSVP form.

use axum::extract::State;
use axum::response::{IntoResponse, Response};

use super::params::QueryParams;
use crate::error::AppError;
use crate::render;
use crate::state::AppState;

/// Handle `GET /`.
///
/// Any `event` parameter selects the RSVP form, even an empty one.
pub async fn root(
    State(state): State<AppState>,
    query: Result<QueryParams, AppError>,
) -> Response {
    let params = match query {
        Ok(QueryParams(params)) => params,
        Err(err) => return err.into_page(&state.renderer),
    };

    match params.first("event") {
        Some(event_id) => super::event::event_page(&state, event_id).await,
        None => state
            .renderer
            .render(render::home::home(state.renderer.site_name()))
            .into_response(),
    }
}
