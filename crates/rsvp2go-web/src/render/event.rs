//! Guest-facing event page with the RSVP form.

use maud::{Markup, PreEscaped, html};

use super::components::back_link;
use rsvp2go_core::Event;

/// Event details and the RSVP form. Submits to `POST /rsvp`.
pub fn rsvp_form(event: &Event) -> Markup {
    let details = &event.details;
    html! {
        div class="card" {
            div {
                h1 { (details.name) }
                p class="accent" { "📅 " (details.date) }
                @if let Some(timezone) = details.timezone.as_deref().filter(|tz| !tz.is_empty()) {
                    p class="accent" { "Timezone: " (timezone) }
                }
                @if !details.description.is_empty() {
                    p class="muted" { (details.description) }
                }
            }
            form id="rsvpForm" class="stack actions" {
                input name="name" placeholder="Your Name" required;
                input type="email" name="email" placeholder="Email" required;
                input type="hidden" name="eventId" value=(event.id);
                p id="formStatus" class="form-error" {}
                button { "Submit RSVP" }
            }
            (back_link())
        }
        script { (PreEscaped(RSVP_SCRIPT)) }
    }
}

/// Shown when an event id has no record.
///
/// Events never expire; the wording covers ids that were never valid.
pub fn not_found() -> Markup {
    html! {
        div class="card center" {
            h2 { "Event Not Found" }
            p { "This event doesn't exist or has expired" }
            (back_link())
        }
    }
}

const RSVP_SCRIPT: &str = r#"
document.getElementById('rsvpForm').addEventListener('submit', async (e) => {
  e.preventDefault();
  const status = document.getElementById('formStatus');
  status.textContent = '';
  try {
    const res = await fetch('/rsvp', { method: 'POST', body: new URLSearchParams(new FormData(e.target)) });
    if (!res.ok) { status.textContent = 'Could not record your RSVP.'; return; }
    alert('Thank you for RSVPing!');
    e.target.reset();
  } catch (_) {
    status.textContent = 'Could not record your RSVP.';
  }
});
"#;
