use artbox::{
    integrations::ratatui::ArtBox, Alignment as ArtAlignment, Color as ArtColor, Fill,
    LinearGradient, Renderer, fonts,
};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::state::CardContent;
use crate::transition::Transition;

pub const CLOSE_LABEL: &str = "[ × Close ]";

const CARD_WIDTH: u16 = 40;
const CARD_HEIGHT: u16 = 14;

/// Overlay card with the loaded weather
pub struct WeatherCard;

pub struct WeatherCardProps<'a> {
    pub content: Option<&'a CardContent>,
    pub transition: Transition,
    pub close_focused: bool,
}

fn temperature_gradient(label: &str) -> Fill {
    let celsius = label
        .trim_end_matches("°C")
        .parse::<i32>()
        .unwrap_or_default();
    let (start, end) = match celsius {
        t if t < 0 => (
            ArtColor::rgb(150, 200, 255), // Ice blue
            ArtColor::rgb(200, 230, 255),
        ),
        t if t < 15 => (
            ArtColor::rgb(100, 180, 255), // Cool blue
            ArtColor::rgb(150, 220, 200),
        ),
        t if t < 25 => (
            ArtColor::rgb(100, 200, 150), // Green
            ArtColor::rgb(255, 220, 100),
        ),
        _ => (
            ArtColor::rgb(255, 180, 80), // Orange
            ArtColor::rgb(255, 120, 80),
        ),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}

fn card_area(area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(CARD_HEIGHT.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [card] = Layout::horizontal([Constraint::Length(CARD_WIDTH.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    card
}

impl Component<Action> for WeatherCard {
    type Props<'a> = WeatherCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let Some(content) = props.content else {
            return;
        };
        if props.transition.is_hidden() {
            return;
        }

        // Entering/Leaving draw faded, like an opacity transition
        let fade = if props.transition.is_fading() {
            Modifier::DIM
        } else {
            Modifier::empty()
        };
        let text = |color: Color| Style::default().fg(color).add_modifier(fade);

        let area = card_area(area);
        frame.render_widget(Clear, area);
        let block = Block::default()
            .title(format!(" {} ", content.city_name))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(text(Color::Cyan))
            .style(Style::default().bg(Color::Rgb(30, 34, 44)));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Max(6),    // Temperature (FIGlet)
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Condition
            Constraint::Min(1),    // Advice
            Constraint::Length(1), // Close control
        ])
        .split(inner);

        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(temperature_gradient(&content.temperature));
        frame.render_widget(ArtBox::new(&renderer, &content.temperature), chunks[0]);

        let condition = Line::from(Span::styled(
            content.condition.clone(),
            text(Color::White).add_modifier(Modifier::BOLD),
        ))
        .centered();
        frame.render_widget(Paragraph::new(condition), chunks[2]);

        let advice = Line::from(Span::styled(content.advice.clone(), text(Color::Gray))).centered();
        frame.render_widget(
            Paragraph::new(advice).wrap(Wrap { trim: true }),
            chunks[3],
        );

        let close_style = if props.close_focused {
            text(Color::Red).add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            text(Color::Red)
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(CLOSE_LABEL, close_style)).centered()),
            chunks[4],
        );
    }
}
