use super::constants::UiStyle;
use super::widgets::{default_block, popup_rect};
use crate::types::{SystemTimeTick, Tick};
use ratatui::layout::{Margin, Rect};
use ratatui::widgets::{Clear, Paragraph, Wrap};
use ratatui::Frame;
use strum_macros::Display;

#[derive(Debug, Display, Clone, PartialEq)]
pub enum PopupMessage {
    Ok { message: String, tick: Tick },
    Error { message: String, tick: Tick },
}

impl PopupMessage {
    pub fn message(&self) -> &str {
        match self {
            Self::Ok { message, .. } | Self::Error { message, .. } => message,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let rect = popup_rect(area);
        let (title, style, tick) = match self {
            Self::Ok { tick, .. } => ("Ok", UiStyle::OK, tick),
            Self::Error { tick, .. } => ("Error", UiStyle::ERROR, tick),
        };

        frame.render_widget(Clear, rect);
        frame.render_widget(
            default_block()
                .border_style(style)
                .title(format!("{title} {}", tick.formatted_as_time()))
                .title_bottom("Enter to close"),
            rect,
        );
        frame.render_widget(
            Paragraph::new(self.message().to_string())
                .centered()
                .wrap(Wrap { trim: true }),
            rect.inner(Margin {
                horizontal: 2,
                vertical: 2,
            }),
        );
    }
}
