//! rsvp2go - account-free event RSVP pages.
//!
//! Organizers create an event, share its link or embed it in their own
//! site, and later look up everything they created by email. Guests answer
//! with a name and an email. Nobody signs up.
//!
//! # Architecture
//!
//! - **Storage**: event and RSVP records in a key-value store (Redis, or
//!   in-memory for development), see [`rsvp2go_core`]
//! - **Render**: themed HTML pages using maud (compile-time templates)
//! - **Routes**: a fixed set of exact paths; everything else is `404 Not found`
//!
//! # Security
//!
//! - All dynamic content is HTML-escaped by maud
//! - Server-side failures are logged and answered with a generic message
//! - Pages may be framed by any site so events can be embedded

pub mod config;
pub mod error;
pub mod render;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
