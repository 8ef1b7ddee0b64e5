//! Shared HTML components used across all pages.

use maud::{Markup, html};

/// Layout CSS. Colors come from the theme's custom properties.
pub const BASE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.5;background:var(--bg);color:var(--fg);min-height:100vh;padding:1rem}
.container{max-width:28rem;margin:0 auto}
.card{background:var(--card);padding:1rem;border-radius:.5rem}
.center{text-align:center}
h1{font-size:1.5rem;font-weight:700;margin-bottom:1rem}
h2{font-size:1.25rem;font-weight:700;margin-bottom:.5rem}
h3{font-size:1.1rem;font-weight:600;margin:1rem 0 .5rem}
p+p{margin-top:.5rem}
.accent{color:var(--accent);font-size:.9rem}
.muted{opacity:.75;font-size:.9rem;margin-top:.5rem}
.stack{display:flex;flex-direction:column;gap:.75rem}
.actions{margin-top:1.5rem}
input,textarea{width:100%;padding:.5rem;border-radius:.25rem;color:var(--fg);background:var(--input-bg);border:1px solid #475569;font:inherit}
button,a.btn{display:block;width:100%;padding:.5rem;border-radius:.25rem;border:none;background:var(--accent);color:#fff;font:inherit;font-weight:500;text-align:center;text-decoration:none;cursor:pointer}
a.btn.outline{background:transparent;border:1px solid #6b7280}
.back{margin-top:1rem;text-align:center}
.back a{font-size:.875rem;color:#9ca3af}
.form-error{color:#f87171;font-size:.9rem;min-height:1.2em}
.error{color:#f87171}
table{width:100%;border-collapse:collapse;border-spacing:0}
th,td{border:1px solid #4b5563;padding:.25rem .5rem;text-align:left;vertical-align:top}
td table th,td table td{font-size:.75rem;padding:.25rem}
.table-wrap{overflow-x:auto}
iframe{border:0;width:100%;border-radius:.25rem;background:#fff}
"#;

/// Content-Security-Policy header value.
///
/// Pages use small inline scripts and styles. RSVP pages are meant to be
/// embedded in other sites, so `frame-ancestors` is left open and the share
/// page may frame any origin (the configured base URL need not be ours).
pub const CSP_HEADER: &str = "default-src 'self'; style-src 'unsafe-inline'; script-src 'unsafe-inline'; img-src 'self' data:; connect-src 'self'; frame-src *; form-action 'self'";

/// "Back to Home" link shown under every card.
pub fn back_link() -> Markup {
    html! {
        div class="back" {
            a href="/" { "Back to Home" }
        }
    }
}

/// Card describing a failure.
pub fn error_card(title: &str, message: &str) -> Markup {
    html! {
        div class="card center error" {
            h2 { (title) }
            p { (message) }
            (back_link())
        }
    }
}
