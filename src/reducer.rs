//! Reducer - pure function: (state, action) -> DispatchResult

use tracing::{debug, info, warn};
use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::catalog::{WeatherRecord, WeatherType};
use crate::effect::{Effect, Timer};
use crate::scene::{ElementKind, MountOptions, StyleClass};
use crate::state::{
    AppState, CardContent, Focus, Severity, StatusMessage, ANIM_TICK_MS, ICON_FONT_HREF,
    STATUS_HISTORY_LIMIT,
};
use crate::transition::Visibility;

pub const RAINDROP_COUNT: usize = 40;
pub const SNOWFLAKE_COUNT: usize = 25;
pub const WIND_LINE_COUNT: usize = 3;

const FOCUS_ORDER: [Focus; 3] = [Focus::CitySelect, Focus::FetchButton, Focus::CloseButton];

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            report_status(
                state,
                "Dashboard ready. Select a city to begin.",
                Severity::Info,
            );
            DispatchResult::changed()
        }

        // ===== Selection =====
        Action::CitySelect(index) => {
            let index = index.min(state.option_count() - 1);
            if index == state.selected {
                return DispatchResult::unchanged();
            }
            state.selected = index;
            if state.selected_city().is_some() {
                state.focus = Focus::FetchButton;
            }
            DispatchResult::changed()
        }

        Action::FocusNext => cycle_focus(state, true),
        Action::FocusPrev => cycle_focus(state, false),

        // ===== Fetch cycle =====
        Action::FetchRequest => {
            if !state.fetch_enabled {
                debug!("fetch ignored while a request is in flight");
                return DispatchResult::unchanged();
            }
            let Some(city) = state.selected_city().cloned() else {
                report_status(state, "Please select a city first.", Severity::Error);
                return DispatchResult::changed();
            };

            state.fetch_enabled = false;
            state.loading.show_now();
            state.tick_count = 0;
            report_status(
                state,
                format!("Fetching weather data for {}...", city.name),
                Severity::Info,
            );

            state.request_seq = state.request_seq.wrapping_add(1);
            let token = state.request_seq;
            state.pending_request = Some((token, city.id));
            DispatchResult::changed_with(Effect::schedule(
                Timer::Fetch,
                state.timings.fetch_latency_ms,
                Action::FetchDidComplete(token),
            ))
        }

        Action::FetchDidComplete(token) => {
            let city_id = match state.pending_request.take() {
                Some((pending, city_id)) if pending == token => city_id,
                other => {
                    debug!(token, "dropping stale fetch completion");
                    state.pending_request = other;
                    return DispatchResult::unchanged();
                }
            };

            let mut effects = match state.catalog.record(&city_id).cloned() {
                Ok(record) => {
                    let weather_type = state.catalog.weather_type(&city_id);
                    let name = state
                        .catalog
                        .position(&city_id)
                        .and_then(|index| state.catalog.option(index))
                        .map(|opt| opt.name.clone())
                        .unwrap_or_else(|| city_id.clone());
                    present_weather(state, weather_type, &record, &name)
                }
                Err(err) => {
                    report_status(
                        state,
                        format!("Could not load weather: {err}."),
                        Severity::Error,
                    );
                    Vec::new()
                }
            };

            state.fetch_enabled = true;
            let epoch = state.loading.begin_hide();
            effects.push(Effect::schedule(
                Timer::Loading,
                state.timings.fade_out_ms,
                Action::LoadingDidHide(epoch),
            ));
            DispatchResult::changed_with_many(effects)
        }

        Action::LoadingDidHide(epoch) => {
            if state.loading.settle_hide(epoch) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Card =====
        Action::CardClose => {
            if matches!(
                state.card.visibility,
                Visibility::Hidden | Visibility::Leaving
            ) {
                return DispatchResult::unchanged();
            }
            let epoch = state.card.begin_hide();
            if state.focus == Focus::CloseButton {
                state.focus = Focus::FetchButton;
            }
            DispatchResult::changed_with(Effect::schedule(
                Timer::Card,
                state.timings.fade_out_ms,
                Action::CardDidHide(epoch),
            ))
        }

        Action::CardDidShow(epoch) => {
            if state.card.settle_show(epoch) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::CardDidHide(epoch) => {
            if !state.card.settle_hide(epoch) {
                return DispatchResult::unchanged();
            }
            state.card_content = None;
            state.scene.reset();
            state.current_type = None;
            if state.focus == Focus::CloseButton {
                state.focus = Focus::FetchButton;
            }
            report_status(
                state,
                "Weather closed. Ready for next query.",
                Severity::Info,
            );
            DispatchResult::changed()
        }

        // ===== Icon font =====
        Action::IconFontDidLoad(sheet) => {
            info!(href = %sheet.href, bytes = sheet.bytes, "icon font loaded");
            state.icon_font = DataResource::Loaded(sheet);
            DispatchResult::changed()
        }

        Action::IconFontDidError(msg) => {
            warn!(error = %msg, "icon font unavailable, using plain snow glyphs");
            state.icon_font = DataResource::Failed(msg);
            DispatchResult::changed()
        }

        // ===== Global =====
        Action::Tick => {
            if !state.is_animating() {
                return DispatchResult::unchanged();
            }
            state.tick_count = state.tick_count.wrapping_add(1);
            if !state.scene.elements.is_empty() {
                state.scene.advance(ANIM_TICK_MS);
            }
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Show a message in the status strip and keep it in the history
pub fn report_status(state: &mut AppState, text: impl Into<String>, severity: Severity) {
    let message = StatusMessage::new(text, severity);
    match severity {
        Severity::Error => warn!(target: "status", "{}", message.text),
        Severity::Info | Severity::Success => info!(target: "status", "{}", message.text),
    }

    if state.status_log.len() >= STATUS_HISTORY_LIMIT {
        state.status_log.remove(0);
    }
    state.status_log.push(message.clone());
    state.status = message;
}

/// Fill the card and mount the scene for one weather type.
///
/// Returns the follow-ups to schedule: the card fade-in, and the icon-font
/// fetch the first time snow is shown.
pub fn present_weather(
    state: &mut AppState,
    weather_type: WeatherType,
    record: &WeatherRecord,
    display_name: &str,
) -> Vec<Effect> {
    let mut effects = Vec::new();
    state.scene.reset();

    state.card_content = Some(CardContent {
        city_name: display_name.to_string(),
        temperature: record.temperature_label(),
        condition: record.condition.to_string(),
        advice: record.advice.clone(),
    });
    let epoch = state.card.begin_show();
    effects.push(Effect::schedule(
        Timer::Card,
        state.timings.card_show_delay_ms,
        Action::CardDidShow(epoch),
    ));

    state.scene.marker = Some(weather_type);
    match weather_type {
        WeatherType::Sunny => state.scene.mount_anchored(ElementKind::SunRays),
        WeatherType::Rainy => {
            state
                .scene
                .mount(ElementKind::Raindrop, RAINDROP_COUNT, MountOptions::spread(2.0));
        }
        WeatherType::Snowy => {
            state.scene.mount(
                ElementKind::Snowflake,
                SNOWFLAKE_COUNT,
                MountOptions::spread(5.0).with_class(StyleClass::IconGlyph),
            );
            if state.icon_font.is_empty() {
                state.icon_font = DataResource::Loading;
                effects.push(Effect::LoadIconFont {
                    href: ICON_FONT_HREF.to_string(),
                });
            }
        }
        WeatherType::Cloudy => state.scene.mount_anchored(ElementKind::Cloud),
        WeatherType::Windy => {
            state.scene.mount(
                ElementKind::WindLine,
                WIND_LINE_COUNT,
                MountOptions::fixed_duration(2.5),
            );
        }
    }

    state.current_type = Some(weather_type);
    report_status(
        state,
        format!("Weather loaded: {} in {}", record.condition, display_name),
        Severity::Success,
    );
    effects
}

fn cycle_focus(state: &mut AppState, forward: bool) -> DispatchResult<Effect> {
    let order = if state.card.is_hidden() {
        &FOCUS_ORDER[..2]
    } else {
        &FOCUS_ORDER[..]
    };
    let len = order.len();
    let pos = order.iter().position(|f| *f == state.focus).unwrap_or(0);
    let next = if forward {
        (pos + 1) % len
    } else {
        (pos + len - 1) % len
    };
    state.focus = order[next];
    DispatchResult::changed()
}
