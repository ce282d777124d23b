use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::state::{AppState, Focus};

pub const PLACEHOLDER_LABEL: &str = "Select a city";
pub const FETCH_LABEL: &str = "[ Get Weather ]";

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// City picker, fetch control and loading spinner on one line
pub struct ControlsRow;

pub struct ControlsRowProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

fn focus_style(base: Style, focused: bool) -> Style {
    if focused {
        base.add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        base
    }
}

impl Component<Action> for ControlsRow {
    type Props<'a> = ControlsRowProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let chunks = Layout::horizontal([
            Constraint::Length(26), // Picker
            Constraint::Length(2),
            Constraint::Length(FETCH_LABEL.chars().count() as u16),
            Constraint::Length(2),
            Constraint::Fill(1), // Spinner
        ])
        .split(area);

        // City picker
        let name = state
            .selected_city()
            .map(|c| c.name.as_str())
            .unwrap_or(PLACEHOLDER_LABEL);
        let picker_focused = props.is_focused && state.focus == Focus::CitySelect;
        let name_style = if state.selected_city().is_some() {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let picker = Line::from(vec![
            Span::styled("City: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("◀ {name} ▶"),
                focus_style(name_style, picker_focused),
            ),
        ]);
        frame.render_widget(Paragraph::new(picker), chunks[0]);

        // Fetch control
        let fetch_focused = props.is_focused && state.focus == Focus::FetchButton;
        let fetch_style = if state.fetch_enabled {
            focus_style(Style::default().fg(Color::Cyan), fetch_focused)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(FETCH_LABEL, fetch_style))),
            chunks[2],
        );

        // Loading indicator
        if !state.loading.is_hidden() {
            let frame_idx = (state.tick_count / 2) as usize % SPINNER.len();
            let style = if state.loading.is_fading() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Yellow)
            };
            let spinner = Line::from(vec![
                Span::styled(SPINNER[frame_idx], style),
                Span::styled(" Loading weather...", style),
            ]);
            frame.render_widget(Paragraph::new(spinner), chunks[4]);
        }
    }
}
