//! Event creation: the form page and its submission endpoint.

use axum::Json;
use axum::extract::State;
use maud::Markup;
use serde::Serialize;

use super::params::{FormParams, Params};
use super::required;
use crate::error::AppError;
use crate::render;
use crate::state::AppState;
use rsvp2go_core::EventDetails;

/// Fields posted by the creation form. Empty strings count as absent.
#[derive(Debug, Default)]
pub struct CreateEventForm {
    name: Option<String>,
    date: Option<String>,
    timezone: Option<String>,
    description: Option<String>,
    creator_email: Option<String>,
}

impl From<&Params> for CreateEventForm {
    fn from(params: &Params) -> Self {
        Self {
            name: params.take("name"),
            date: params.take("date"),
            timezone: params.take("timezone"),
            description: params.take("description"),
            creator_email: params.take("creatorEmail"),
        }
    }
}

impl CreateEventForm {
    fn into_details(self) -> Result<EventDetails, AppError> {
        Ok(EventDetails {
            name: required(self.name, "name")?,
            date: required(self.date, "date")?,
            timezone: self.timezone.filter(|tz| !tz.is_empty()),
            description: self.description.unwrap_or_default(),
            creator_email: required(self.creator_email, "creatorEmail")?,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEvent {
    event_id: String,
}

/// Handle `GET /create`.
pub async fn create_form(State(state): State<AppState>) -> Markup {
    state.renderer.render(render::home::create_form())
}

/// Handle `POST /create`.
pub async fn create_event(
    State(state): State<AppState>,
    FormParams(params): FormParams,
) -> Result<Json<CreatedEvent>, AppError> {
    let details = CreateEventForm::from(&params).into_details()?;

    let event_id = state.events.create(&details).await?;
    tracing::info!(%event_id, "event created");

    Ok(Json(CreatedEvent { event_id }))
}
