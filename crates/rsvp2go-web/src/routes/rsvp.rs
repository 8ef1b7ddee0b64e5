//! RSVP submission.

use axum::extract::State;

use super::params::FormParams;
use super::required;
use crate::error::AppError;
use crate::state::AppState;

/// Handle `POST /rsvp`.
///
/// The event id is not checked against stored events.
pub async fn submit_rsvp(
    State(state): State<AppState>,
    FormParams(params): FormParams,
) -> Result<&'static str, AppError> {
    let event_id = required(params.take("eventId"), "eventId")?;
    let name = required(params.take("name"), "name")?;
    let email = required(params.take("email"), "email")?;

    let rsvp_id = state.rsvps.append(&event_id, &name, &email).await?;
    tracing::info!(%event_id, %rsvp_id, "rsvp recorded");

    Ok("RSVP recorded")
}
