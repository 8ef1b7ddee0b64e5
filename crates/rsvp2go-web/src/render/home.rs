//! Landing page and event creation form.

use maud::{Markup, PreEscaped, html};

use super::components::back_link;

/// Landing page.
pub fn home(site_name: &str) -> Markup {
    html! {
        div class="card center" {
            h1 { (site_name) }
            p { "A free event RSVP app. There are no signups required." }
            p { "Manage your event in one place. Send your invite link via WhatsApp, SMS or email." }
            p { "Free · No personal details · Calendar integration" }
            div class="stack actions" {
                a href="/create" class="btn" { "Create Event" }
                a href="/preview" class="btn outline" { "Preview RSVPs" }
            }
        }
    }
}

/// Event creation form. Submits to `POST /create`, then opens the share page.
pub fn create_form() -> Markup {
    html! {
        div class="card" {
            h1 { "Create Event" }
            form id="createForm" class="stack" {
                input name="name" placeholder="What's the event?" required;
                input type="date" name="date" required;
                input name="timezone" placeholder="Time Zone (e.g. America/New_York)";
                textarea name="description" placeholder="Description" rows="3" {}
                input type="email" name="creatorEmail" placeholder="Your Email (for preview)" required;
                p id="formError" class="form-error" {}
                button { "Start Inviting >" }
            }
            (back_link())
        }
        script { (PreEscaped(CREATE_SCRIPT)) }
    }
}

const CREATE_SCRIPT: &str = r#"
document.getElementById('createForm').addEventListener('submit', async (e) => {
  e.preventDefault();
  const error = document.getElementById('formError');
  error.textContent = '';
  try {
    const res = await fetch('/create', { method: 'POST', body: new URLSearchParams(new FormData(e.target)) });
    const body = await res.json();
    if (!res.ok) { error.textContent = body.message || 'Could not create the event.'; return; }
    window.location = '/share?event=' + encodeURIComponent(body.eventId);
  } catch (_) {
    error.textContent = 'Could not create the event.';
  }
});
"#;
