//! Organizer preview: email entry form and the events/RSVPs table.

use maud::{Markup, html};

use super::components::back_link;
use rsvp2go_core::{CreatorPreview, EventWithRsvps, Rsvp};

/// Email entry form. Submits back to `GET /preview`.
pub fn preview_form() -> Markup {
    html! {
        div class="card" {
            h1 { "Preview Your Events" }
            form class="stack" method="get" action="/preview" {
                input type="email" name="email" placeholder="Enter your email" required;
                button { "Preview" }
            }
            (back_link())
        }
    }
}

/// Every event of the queried creator, each with its RSVPs.
pub fn preview_results(preview: &CreatorPreview) -> Markup {
    html! {
        div class="card" {
            h1 { "Your Created Events and RSVPs" }
            div class="table-wrap" {
                table {
                    thead {
                        tr {
                            th { "Event Name" }
                            th { "Date" }
                            th { "Description" }
                            th { "RSVPs" }
                        }
                    }
                    tbody {
                        @if preview.is_empty() {
                            tr {
                                td colspan="4" class="center" {
                                    "No events found for " (preview.email)
                                }
                            }
                        }
                        @for entry in &preview.events {
                            (event_row(entry))
                        }
                    }
                }
            }
            (back_link())
        }
    }
}

fn event_row(entry: &EventWithRsvps) -> Markup {
    let details = &entry.event.details;
    html! {
        tr {
            td {
                a href={ "/share?event=" (entry.event.id) } { (details.name) }
            }
            td { (details.date) }
            td { (details.description) }
            td {
                @if entry.rsvps.is_empty() {
                    "No RSVPs"
                } @else {
                    (rsvp_table(&entry.rsvps))
                }
            }
        }
    }
}

fn rsvp_table(rsvps: &[Rsvp]) -> Markup {
    html! {
        table {
            thead {
                tr {
                    th { "Name" }
                    th { "Email" }
                    th { "Timestamp" }
                }
            }
            tbody {
                @for rsvp in rsvps {
                    tr {
                        td { (rsvp.record.name) }
                        td { (rsvp.record.email) }
                        td { (format_timestamp(rsvp.record.timestamp)) }
                    }
                }
            }
        }
    }
}

/// Epoch milliseconds as a UTC date-time.
pub fn format_timestamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| millis.to_string())
}
