//! HTML rendering.
//!
//! Routes build page *fragments* (the card in the middle of the page) with
//! the functions in the submodules, then hand them to [`PageRenderer`],
//! which wraps them in a complete themed document. The theme is fixed at
//! construction; nothing else in the crate reads it.
//!
//! All rendering uses [maud](https://maud.lambda.xyz/), so every dynamic
//! value (event names, guest input, emails) is HTML-escaped.

pub mod components;
pub mod event;
pub mod home;
pub mod preview;
pub mod share;

use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Page colors. Any CSS color value is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: String,
    pub card: String,
    pub text: String,
    pub accent: String,
    pub input_bg: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "#0f172a".to_string(),
            card: "#1e293b".to_string(),
            text: "#f8fafc".to_string(),
            accent: "#818cf8".to_string(),
            input_bg: "#334155".to_string(),
        }
    }
}

impl Theme {
    /// CSS custom properties consumed by [`components::BASE_CSS`].
    fn css_variables(&self) -> String {
        format!(
            ":root{{--bg:{};--card:{};--fg:{};--accent:{};--input-bg:{}}}",
            self.background, self.card, self.text, self.accent, self.input_bg
        )
    }
}

/// Wraps page fragments in a full HTML document.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    site_name: String,
    stylesheet: String,
}

impl PageRenderer {
    pub fn new(theme: Theme, site_name: String) -> Self {
        let stylesheet = format!("{}{}", theme.css_variables(), components::BASE_CSS);
        Self {
            site_name,
            stylesheet,
        }
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    /// Wrap `content` in the site's document shell.
    pub fn render(&self, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (self.site_name) }
                    meta name="robots" content="noindex";
                    style { (PreEscaped(&self.stylesheet)) }
                }
                body {
                    main class="container" {
                        (content)
                    }
                }
            }
        }
    }
}
