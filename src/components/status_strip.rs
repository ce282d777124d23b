use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::state::{Severity, StatusMessage};

pub struct StatusStrip;

pub struct StatusStripProps<'a> {
    pub status: &'a StatusMessage,
}

fn strip_style(severity: Severity) -> Style {
    let (r, g, b) = severity.rgb();
    let fg = match severity {
        Severity::Info => Color::Black,
        Severity::Success | Severity::Error => Color::White,
    };
    Style::default().bg(Color::Rgb(r, g, b)).fg(fg)
}

impl Component<Action> for StatusStrip {
    type Props<'a> = StatusStripProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let line = Line::from(format!(" {}", props.status.text));
        frame.render_widget(
            Paragraph::new(line).style(strip_style(props.status.severity)),
            area,
        );
    }
}
