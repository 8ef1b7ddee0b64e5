//! Share page: invite link, embed code and a live preview of the RSVP page.

use maud::{Markup, PreEscaped, html};

use super::components::back_link;
use rsvp2go_core::Event;

/// Public URL of an event's RSVP page.
pub fn invite_url(base_url: &str, event_id: &str) -> String {
    format!("{base_url}/?event={event_id}")
}

/// Iframe snippet organizers paste into their own site.
pub fn embed_code(base_url: &str, event_id: &str) -> String {
    format!(
        r#"<iframe src="{}" width="600" height="400" frameborder="0"></iframe>"#,
        invite_url(base_url, event_id)
    )
}

pub fn share(event: &Event, base_url: &str) -> Markup {
    let url = invite_url(base_url, &event.id);
    let embed = embed_code(base_url, &event.id);

    html! {
        div class="card" {
            h1 { "Share Your RSVP Page" }
            p { "Send this link to your guests:" }
            div class="stack actions" {
                input id="inviteLink" value=(url) readonly;
                button type="button" data-copy="inviteLink" { "Copy Link" }
                button type="button" id="nativeShare" data-title=(event.details.name) data-url=(url) hidden { "Share" }
            }
            h3 { "Embed code" }
            p { "Paste this into your website to display your event RSVP page." }
            div class="stack" {
                textarea id="embedCode" rows="4" readonly { (embed) }
                button type="button" data-copy="embedCode" { "Copy Embed Code" }
            }
            h3 { "Preview:" }
            iframe src=(url) height="400" {}
            (back_link())
        }
        script { (PreEscaped(SHARE_SCRIPT)) }
    }
}

const SHARE_SCRIPT: &str = r#"
document.querySelectorAll('[data-copy]').forEach((button) => {
  button.addEventListener('click', async () => {
    const source = document.getElementById(button.dataset.copy);
    const label = button.textContent;
    try {
      await navigator.clipboard.writeText(source.value);
      button.textContent = 'Copied!';
    } catch (_) {
      source.select();
      button.textContent = 'Press Ctrl+C to copy';
    }
    setTimeout(() => { button.textContent = label; }, 2000);
  });
});
const share = document.getElementById('nativeShare');
if (navigator.share) {
  share.hidden = false;
  share.addEventListener('click', () => {
    navigator.share({ title: share.dataset.title, url: share.dataset.url }).catch(() => {});
  });
}
"#;
