use crossterm::event::KeyCode;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::model::text::StyledRun;
use crate::ui::{Controller, RenderContext, ViewResult};

pub mod ability;

pub use ability::*;

/// Trait for rendering views in the TUI
pub trait RenderableView {
    /// Render the view into a ratatui Frame with scroll support
    fn render(&self, rc: RenderContext) -> ViewResult;

    /// React to key presses while the view is open.
    fn update(&mut self, _controller: &Controller, _key: KeyCode) {}

    fn title(&self) -> &str;
}

/// Convert formatter output into ratatui lines. Runs map to spans; a run
/// whose text begins with a newline starts a new line, and empty runs render
/// nothing.
pub fn styled_runs_to_lines(runs: &[StyledRun]) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];

    for run in runs {
        if run.text.is_empty() {
            continue;
        }

        let mut style = Style::default();
        if run.style.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if run.style.underline {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        if let Some(color) = run.style.color.as_deref().and_then(parse_hex_color) {
            style = style.fg(color);
        }

        for (i, chunk) in run.text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            if !chunk.is_empty() {
                let span = Span::styled(chunk.to_string(), style);
                if let Some(line) = lines.last_mut() {
                    line.spans.push(span);
                }
            }
        }
    }

    lines
}

/// Parse a "#RRGGBB" literal into a terminal colour.
fn parse_hex_color(color: &str) -> Option<Color> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
