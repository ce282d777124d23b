//! Weather dashboard TUI

use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weather_dash::action::Action;
use weather_dash::api;
use weather_dash::catalog::Catalog;
use weather_dash::components::{Component, Dashboard, DashboardProps};
use weather_dash::effect::Effect;
use weather_dash::error::CatalogError;
use weather_dash::reducer::reducer;
use weather_dash::scene::DEFAULT_SEED;
use weather_dash::state::{AppState, Timings, ANIM_TICK_MS};

/// Weather dashboard - pick a city and watch the weather roll in
#[derive(Parser, Debug)]
#[command(name = "weather-dash")]
#[command(about = "An animated weather dashboard for the terminal")]
struct Args {
    /// City id to preselect (nairobi, tokyo, new-york, sydney, oslo)
    #[arg(long, short)]
    city: Option<String>,

    /// Simulated fetch latency in milliseconds
    #[arg(long, default_value = "1800", value_parser = clap::value_parser!(u64).range(1..))]
    latency_ms: u64,

    /// Seed for scene placement
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Write tracing output to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum DashComponentId {
    Dashboard,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum DashContext {
    Main,
}

impl EventRoutingState<DashComponentId, DashContext> for AppState {
    fn focused(&self) -> Option<DashComponentId> {
        Some(DashComponentId::Dashboard)
    }

    fn modal(&self) -> Option<DashComponentId> {
        None
    }

    fn binding_context(&self, _id: DashComponentId) -> DashContext {
        DashContext::Main
    }

    fn default_context(&self) -> DashContext {
        DashContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        city,
        latency_ms,
        seed,
        log_file,
        debug: debug_args,
    } = Args::parse();

    if let Some(path) = log_file {
        init_tracing(&path)?;
    }

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            let catalog = Catalog::builtin();
            if let Err(e) = catalog.validate() {
                eprintln!("Error: city catalog is inconsistent: {}", e);
                std::process::exit(1);
            }

            let timings = Timings {
                fetch_latency_ms: latency_ms,
                ..Timings::default()
            };
            let mut state = AppState::new(catalog, timings, seed);
            if let Some(id) = city {
                if !state.select_by_id(&id) {
                    eprintln!("Error: {}", CatalogError::UnknownCity(id));
                    let known: Vec<_> =
                        state.catalog.options.iter().map(|opt| opt.id.as_str()).collect();
                    eprintln!("Known cities: {}", known.join(", "));
                    std::process::exit(1);
                }
            }
            Ok::<AppState, io::Error>(state)
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

/// Log to a file; the terminal belongs to the UI
fn init_tracing(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_dash=info,status=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| io::Error::other(format!("tracing init failed: {e}")))
}

struct DashUi {
    dashboard: Dashboard,
}

impl DashUi {
    fn new() -> Self {
        Self {
            dashboard: Dashboard,
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<DashComponentId>,
    ) {
        event_ctx.set_component_area(DashComponentId::Dashboard, area);

        let props = DashboardProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.dashboard.render(frame, area, props);
    }

    fn handle_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = DashboardProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .dashboard
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(DashUi::new()));
    let mut bus: EventBus<AppState, Action, DashComponentId, DashContext> = EventBus::new();
    let keybindings: Keybindings<DashContext> = Keybindings::new();

    let ui_dashboard = Rc::clone(&ui);
    bus.register(DashComponentId::Dashboard, move |event, state| {
        ui_dashboard.borrow_mut().handle_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(ANIM_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::Schedule {
            timer,
            after,
            action,
        } => {
            tracing::debug!(timer = timer.key(), ?after, ?action, "scheduling follow-up");
            ctx.tasks().spawn(timer.key(), async move {
                tokio::time::sleep(after).await;
                action
            });
        }
        Effect::LoadIconFont { href } => {
            ctx.tasks().spawn("icon_font", async move {
                match api::fetch_icon_font(&href).await {
                    Ok(sheet) => Action::IconFontDidLoad(sheet),
                    Err(e) => Action::IconFontDidError(e.to_string()),
                }
            });
        }
    }
}
