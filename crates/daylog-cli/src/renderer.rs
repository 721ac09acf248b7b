//! Terminal color rendering.
//!
//! Group colors come from the settings file as plain names; this module
//! maps them onto ANSI styles, falling back to uncolored text for
//! unknown names or when color is disabled.

use ansi_term::{Colour, Style};

/// Renderer that can switch between colored and plain output.
pub struct TerminalRenderer {
    color_enabled: bool,
}

impl TerminalRenderer {
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Styles `text` with the named color, or returns it unchanged when
    /// color is off or the name is unknown.
    pub fn paint(&self, color: &str, text: &str) -> String {
        match self.style_of(color) {
            Some(style) if self.color_enabled => style.paint(text).to_string(),
            _ => text.to_string(),
        }
    }

    fn style_of(&self, color: &str) -> Option<Style> {
        let style = match color.to_ascii_lowercase().as_str() {
            "red" => Colour::Red.normal(),
            "green" | "lightgreen" => Colour::Green.bold(),
            "yellow" => Colour::Yellow.bold(),
            "blue" => Colour::Blue.normal(),
            "purple" => Colour::Purple.normal(),
            "cyan" => Colour::Cyan.normal(),
            "white" => Colour::White.normal(),
            _ => return None,
        };
        Some(style)
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
