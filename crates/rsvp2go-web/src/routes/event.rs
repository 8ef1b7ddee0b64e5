//! Guest-facing RSVP page for a single event.

use axum::response::{IntoResponse, Response};

use super::load_event;
use crate::render;
use crate::state::AppState;

/// Render the RSVP form for `event_id`, or the not-found page.
pub async fn event_page(state: &AppState, event_id: &str) -> Response {
    match load_event(state, event_id).await {
        Ok(event) => state
            .renderer
            .render(render::event::rsvp_form(&event))
            .into_response(),
        Err(err) => err.into_page(&state.renderer),
    }
}
