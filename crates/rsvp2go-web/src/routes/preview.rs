//! Organizer preview, as an HTML page and as JSON.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::params::QueryParams;
use crate::error::AppError;
use crate::render;
use crate::state::AppState;
use rsvp2go_core::EventWithRsvps;

#[derive(Debug, Serialize)]
struct PreviewResponse<'a> {
    email: &'a str,
    count: usize,
    events: &'a [EventWithRsvps],
}

/// Handle `GET /preview`.
///
/// Without an `email` parameter this is the entry form. With one, even
/// empty, it is the results table.
pub async fn preview_page(
    State(state): State<AppState>,
    query: Result<QueryParams, AppError>,
) -> Response {
    let params = match query {
        Ok(QueryParams(params)) => params,
        Err(err) => return err.into_page(&state.renderer),
    };

    let Some(email) = params.first("email") else {
        return state
            .renderer
            .render(render::preview::preview_form())
            .into_response();
    };

    match state.preview.preview(email).await {
        Ok(preview) => {
            tracing::debug!(events = preview.len(), "preview served");
            no_store(
                state
                    .renderer
                    .render(render::preview::preview_results(&preview))
                    .into_response(),
            )
        }
        Err(err) => AppError::from(err).into_page(&state.renderer),
    }
}

/// Handle `GET /preview.json`.
pub async fn preview_json(
    State(state): State<AppState>,
    QueryParams(params): QueryParams,
) -> Result<Response, AppError> {
    let email = params
        .first("email")
        .ok_or_else(|| AppError::Validation("email is required".to_string()))?;

    let preview = state.preview.preview(email).await?;
    let body = PreviewResponse {
        email: &preview.email,
        count: preview.len(),
        events: &preview.events,
    };

    Ok(no_store(Json(body).into_response()))
}

/// Preview results are per-organizer and must not be cached by proxies.
fn no_store(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
