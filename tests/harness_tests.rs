//! Tests using EffectStoreTestHarness
//!
//! Scheduled follow-ups are fed back through `complete_action`, standing
//! in for the timers the runtime would spawn.

use std::time::Duration;

use tui_dispatch::testing::*;
use tui_dispatch::NumericComponentId;
use weather_dash::{
    action::Action,
    catalog::WeatherType,
    components::{Component, Dashboard, DashboardProps},
    effect::{Effect, Timer},
    reducer::reducer,
    scene::ElementKind,
    state::{AppState, Focus, Severity},
    transition::Visibility,
};

type Harness = EffectStoreTestHarness<AppState, Action, Effect>;

/// Feed every scheduled action back into the store until nothing is pending.
/// Returns the non-timer effects seen along the way.
fn run_timers(harness: &mut Harness) -> Vec<Effect> {
    let mut other = Vec::new();
    loop {
        let effects = harness.drain_effects();
        if effects.is_empty() {
            return other;
        }
        for effect in effects {
            match effect {
                Effect::Schedule { action, .. } => harness.complete_action(action),
                effect => other.push(effect),
            }
        }
        harness.process_emitted();
    }
}

fn dashboard_keys(harness: &mut Harness, keys: &str) -> Vec<Action> {
    let mut component = Dashboard;
    harness.send_keys::<NumericComponentId, _, _>(keys, |state, event| {
        let props = DashboardProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    })
}

// ============================================================================
// Fetch cycle
// ============================================================================

#[test]
fn test_fetch_flow_with_harness() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::CitySelect(1));
    harness.assert_state(|s| s.focus == Focus::FetchButton);

    harness.dispatch_collect(Action::FetchRequest);
    harness.assert_state(|s| s.is_loading());
    harness.assert_state(|s| !s.fetch_enabled);
    harness.assert_state(|s| s.status.text == "Fetching weather data for Nairobi...");

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(
            e,
            Effect::Schedule { timer: Timer::Fetch, after, action: Action::FetchDidComplete(_) }
                if *after == Duration::from_millis(1800)
        )
    });

    // Simulate the fetch timer firing
    for effect in effects {
        if let Effect::Schedule { action, .. } = effect {
            harness.complete_action(action);
        }
    }
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 1);
    assert_eq!(changed, 1);

    harness.assert_state(|s| s.fetch_enabled);
    harness.assert_state(|s| s.card.visibility == Visibility::Entering);
    harness.assert_state(|s| s.loading.visibility == Visibility::Leaving);
    harness.assert_state(|s| s.status.severity == Severity::Success);

    let effects = harness.drain_effects();
    effects.effects_count(2);
    assert!(effects.iter().any(|e| {
        matches!(e, Effect::Schedule { timer: Timer::Card, after, .. }
            if *after == Duration::from_millis(50))
    }));
    assert!(effects.iter().any(|e| {
        matches!(e, Effect::Schedule { timer: Timer::Loading, after, .. }
            if *after == Duration::from_millis(600))
    }));
}

#[test]
fn test_full_show_and_close_cycle() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::CitySelect(2));
    harness.dispatch_collect(Action::FetchRequest);
    run_timers(&mut harness);

    harness.assert_state(|s| s.card.is_visible());
    harness.assert_state(|s| s.loading.is_hidden());
    harness.assert_state(|s| s.current_type == Some(WeatherType::Rainy));

    harness.dispatch_collect(Action::CardClose);
    harness.assert_state(|s| s.card.visibility == Visibility::Leaving);
    // Content stays until the fade completes
    harness.assert_state(|s| s.card_content.is_some());

    run_timers(&mut harness);
    harness.assert_state(|s| s.card.is_hidden());
    harness.assert_state(|s| s.card_content.is_none());
    harness.assert_state(|s| s.scene.is_empty());
    harness.assert_state(|s| s.current_type.is_none());
    harness.assert_state(|s| s.status.severity == Severity::Info);
}

#[test]
fn test_close_while_hidden_is_ignored() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::CardClose);
    harness.assert_state(|s| s.card.is_hidden());
    harness.drain_effects().effects_empty();
}

#[test]
fn test_second_close_during_fade_is_ignored() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::CitySelect(5));
    harness.dispatch_collect(Action::FetchRequest);
    run_timers(&mut harness);

    harness.dispatch_collect(Action::CardClose);
    harness.drain_effects().effects_count(1);

    harness.dispatch_collect(Action::CardClose);
    harness.drain_effects().effects_empty();
}

#[test]
fn test_fetch_while_pending_is_single_flight() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::CitySelect(1));
    harness.dispatch_collect(Action::FetchRequest);
    harness.drain_effects();

    harness.dispatch_collect(Action::FetchRequest);
    harness.assert_state(|s| s.request_seq == 1);
    harness.drain_effects().effects_empty();
}

// ============================================================================
// Icon font
// ============================================================================

#[test]
fn test_icon_font_loaded_once_across_snow_sessions() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::CitySelect(3));
    harness.dispatch_collect(Action::FetchRequest);
    let first = run_timers(&mut harness);
    assert_eq!(first.len(), 1);
    assert!(matches!(&first[0], Effect::LoadIconFont { href } if href.contains("Material")));

    harness.dispatch_collect(Action::CardClose);
    run_timers(&mut harness);

    harness.dispatch_collect(Action::FetchRequest);
    let second = run_timers(&mut harness);
    assert!(second.is_empty());

    harness.assert_state(|s| s.scene.count(ElementKind::Snowflake) == 25);
}

#[test]
fn test_icon_font_failure_keeps_snow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::CitySelect(3));
    harness.dispatch_collect(Action::FetchRequest);
    run_timers(&mut harness);

    harness.complete_action(Action::IconFontDidError("HTTP 503".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.icon_font.is_failed());
    harness.assert_state(|s| !s.icon_glyphs_ready());
    harness.assert_state(|s| s.scene.count(ElementKind::Snowflake) == 25);
    harness.assert_state(|s| s.status.severity == Severity::Success);
}

// ============================================================================
// Keyboard
// ============================================================================

#[test]
fn test_keyboard_select_then_fetch() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    let actions = dashboard_keys(&mut harness, "2");
    actions.assert_count(1);
    actions.assert_first(Action::CitySelect(2));
    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.selected_city().map(|c| c.id.as_str()) == Some("tokyo"));

    let actions = dashboard_keys(&mut harness, "f");
    actions.assert_first(Action::FetchRequest);
    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.is_loading());
    harness
        .drain_effects()
        .effects_all_match(|e| matches!(e, Effect::Schedule { timer: Timer::Fetch, .. }));
}

#[test]
fn test_keyboard_close_key() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::CitySelect(4));
    harness.dispatch_collect(Action::FetchRequest);
    run_timers(&mut harness);

    let actions = dashboard_keys(&mut harness, "c");
    actions.assert_first(Action::CardClose);
}

// ============================================================================
// Render
// ============================================================================

#[test]
fn test_render_after_fetch_shows_card() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::CitySelect(2));
    harness.dispatch_collect(Action::FetchRequest);
    run_timers(&mut harness);

    let mut component = Dashboard;
    let output = harness.render_plain(90, 32, |frame, area, state| {
        let props = DashboardProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    assert!(
        output.contains("Tokyo"),
        "City name should be visible in output:\n{}",
        output
    );
    assert!(output.contains("Rainy"));
    assert!(output.contains("Close"));
}
