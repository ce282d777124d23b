use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    Component, ControlsRow, ControlsRowProps, SceneView, SceneViewProps, StatusStrip,
    StatusStripProps, WeatherCard, WeatherCardProps,
};
use crate::action::Action;
use crate::state::{AppState, Focus};

/// Props for Dashboard - read-only view of state
pub struct DashboardProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole dashboard screen
#[derive(Default)]
pub struct Dashboard;

impl Component<Action> for Dashboard {
    type Props<'a> = DashboardProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };

        let state = props.state;
        let on_picker = state.focus == Focus::CitySelect;
        match key.code {
            KeyCode::Tab => Some(Action::FocusNext),
            KeyCode::BackTab => Some(Action::FocusPrev),
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') if on_picker => {
                Some(Action::CitySelect(state.selected.saturating_sub(1)))
            }
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') if on_picker => {
                Some(Action::CitySelect(state.selected + 1))
            }
            KeyCode::Char(ch @ '0'..='9') => ch
                .to_digit(10)
                .map(|digit| digit as usize)
                .filter(|&index| index < state.option_count())
                .map(Action::CitySelect),
            KeyCode::Enter => match state.focus {
                Focus::CitySelect | Focus::FetchButton => Some(Action::FetchRequest),
                Focus::CloseButton => Some(Action::CardClose),
            },
            KeyCode::Char('f') | KeyCode::F(5) => Some(Action::FetchRequest),
            KeyCode::Char('c') => Some(Action::CardClose),
            KeyCode::Esc if !state.card.is_hidden() => Some(Action::CardClose),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DashboardProps<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Length(1), // Status strip
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Controls
            Constraint::Min(3),    // Scene + card
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let mut status = StatusStrip;
        status.render(
            frame,
            chunks[0],
            StatusStripProps {
                status: &state.status,
            },
        );

        let mut controls = ControlsRow;
        controls.render(
            frame,
            chunks[2],
            ControlsRowProps {
                state,
                is_focused: props.is_focused,
            },
        );

        let mut scene = SceneView;
        scene.render(
            frame,
            chunks[3],
            SceneViewProps {
                scene: &state.scene,
                icon_glyphs: state.icon_glyphs_ready(),
            },
        );

        let mut card = WeatherCard;
        card.render(
            frame,
            chunks[3],
            WeatherCardProps {
                content: state.card_content.as_ref(),
                transition: state.card,
                close_focused: props.is_focused && state.focus == Focus::CloseButton,
            },
        );

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[4],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("tab", "focus"),
                    StatusBarHint::new("↑↓", "city"),
                    StatusBarHint::new("f", "fetch"),
                    StatusBarHint::new("c", "close"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn press(state: &AppState, event: EventKind) -> Vec<Action> {
        let mut component = Dashboard;
        let props = DashboardProps {
            state,
            is_focused: true,
        };
        component.handle_event(&event, props).into_iter().collect()
    }

    fn special(code: KeyCode) -> EventKind {
        EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_fetch_key() {
        let state = AppState::default();
        let actions = press(&state, EventKind::Key(key("f")));
        actions.assert_count(1);
        actions.assert_first(Action::FetchRequest);
    }

    #[test]
    fn test_digit_picks_city() {
        let state = AppState::default();
        press(&state, EventKind::Key(key("3"))).assert_first(Action::CitySelect(3));
        press(&state, EventKind::Key(key("9"))).assert_empty();
    }

    #[test]
    fn test_arrows_move_picker_only_when_focused() {
        let mut state = AppState::default();
        press(&state, special(KeyCode::Down)).assert_first(Action::CitySelect(1));

        state.focus = Focus::FetchButton;
        press(&state, special(KeyCode::Down)).assert_empty();
    }

    #[test]
    fn test_enter_follows_focus() {
        let mut state = AppState::default();
        state.focus = Focus::FetchButton;
        press(&state, special(KeyCode::Enter)).assert_first(Action::FetchRequest);

        state.focus = Focus::CloseButton;
        press(&state, special(KeyCode::Enter)).assert_first(Action::CardClose);
    }

    #[test]
    fn test_escape_closes_card_before_quitting() {
        let mut state = AppState::default();
        press(&state, special(KeyCode::Esc)).assert_first(Action::Quit);

        state.card.show_now();
        press(&state, special(KeyCode::Esc)).assert_first(Action::CardClose);
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let state = AppState::default();
        let mut component = Dashboard;
        let props = DashboardProps {
            state: &state,
            is_focused: false,
        };
        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("f")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_initial_layout() {
        let mut render = RenderHarness::new(80, 24);
        let mut component = Dashboard;
        let mut state = AppState::default();
        crate::reducer::reducer(&mut state, Action::Init);

        let output = render.render_to_string_plain(|frame| {
            let props = DashboardProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("Dashboard ready"));
        assert!(output.contains("Select a city"));
        assert!(output.contains("Get Weather"));
        assert!(output.contains("fetch"));
    }
}
